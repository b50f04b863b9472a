//! Chromashift Core: statistical color transfer between two images.
//!
//! Restyles a target image so that its per-channel mean and standard
//! deviation in CIE L\*a\*b\* match those of a source image (Reinhard et al.,
//! "Color Transfer between Images", 2001). No I/O or framework dependencies.

pub mod color_space;
pub mod error;
pub mod image;
pub mod pipeline;
pub mod recolor;
pub mod statistics;

// Re-exports for convenience.
pub use color_space::{from_lab, to_lab};
pub use error::{Result, StatisticsRole, TransferError};
pub use image::{BitDepth, ColorImage, LabImage};
pub use pipeline::{TransferReport, apply_transfer, apply_transfer_with_report};
pub use recolor::options::{ScaleMode, TransferOptions, ZeroDeviation};
pub use recolor::{flat_channels, scale_factors, transfer_color};
pub use statistics::{
    Channel, ChannelSummary, ImageStatistics, extract_statistics, merge_channels, split_channels,
};
