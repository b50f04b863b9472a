//! Top-level error for a chromashift run.

use std::path::PathBuf;

use chromashift_core::TransferError;

use crate::canvas::CanvasError;
use crate::image_loader::ImageIoError;

/// Any failure that aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Image(#[from] ImageIoError),
    #[error("color transfer failed: {0}")]
    Transfer(#[from] TransferError),
    #[error("could not compose comparison image: {0}")]
    Canvas(#[from] CanvasError),
    #[error("could not serialize transfer report: {0}")]
    Report(#[from] serde_json::Error),
    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
