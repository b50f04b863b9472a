//! Chromashift: restyle one image with the colors of another.
//!
//! Loads a source and a target image, transfers the source's L\*a\*b\*
//! statistics onto the target, and writes a `target | source | result`
//! comparison strip.

#[cfg(feature = "alloc-metrics")]
mod alloc_metrics;
mod canvas;
mod config;
mod error;
mod image_loader;

use std::path::Path;
use std::process::ExitCode;

use chromashift_core::{TransferReport, apply_transfer_with_report};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::image_loader::{load_image, save_image, to_rgb8};

#[cfg(feature = "alloc-metrics")]
static METRICS: alloc_metrics::AllocationMetrics = alloc_metrics::AllocationMetrics::new();

#[cfg(feature = "alloc-metrics")]
#[global_allocator]
static GLOBAL: alloc_metrics::CountingAllocator<alloc_metrics::AllocationMetrics> =
    alloc_metrics::CountingAllocator::new(&METRICS);

fn main() -> ExitCode {
    init_tracing();

    let config = AppConfig::default().with_args(std::env::args().skip(1));
    if let Ok(json) = serde_json::to_string(&config) {
        tracing::debug!(config = %json, "configuration");
    }

    let result = run(&config);
    // Everything `run` allocated has been dropped by now.
    report_memory_usage("after teardown");

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &AppConfig) -> Result<(), AppError> {
    let source = load_image(&config.source)?;
    let target = load_image(&config.target)?;

    let (result, report) = apply_transfer_with_report(&source, &target, &config.transfer)?;
    tracing::info!(
        source_mean = ?report.source.mean,
        target_mean = ?report.target.mean,
        scale = ?report.scale,
        flat_source = ?report.flat_source_channels,
        "transfer statistics"
    );
    if let Some(path) = &config.report_path {
        write_report(&report, path)?;
    }

    let (target, source, result) = (to_rgb8(&target), to_rgb8(&source), to_rgb8(&result));
    let strip = canvas::concat_horizontal(&[&target, &source, &result])?;
    let preview = canvas::resize(&strip, config.preview_scale)?;
    save_image(&preview, &config.output)?;

    tracing::info!(
        output = %config.output.display(),
        "color transfer completed"
    );
    report_memory_usage("before teardown");
    Ok(())
}

fn write_report(report: &TransferReport, path: &Path) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).map_err(|source| AppError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "transfer report written");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(feature = "alloc-metrics")]
fn report_memory_usage(stage: &str) {
    let snapshot = METRICS.snapshot();
    tracing::info!(
        stage,
        current_bytes = snapshot.current_usage,
        total_allocated = snapshot.total_allocated,
        total_freed = snapshot.total_freed,
        "memory usage"
    );
    if let Ok(json) = serde_json::to_string(&snapshot) {
        tracing::debug!(stage, snapshot = %json, "allocation snapshot");
    }
}

#[cfg(not(feature = "alloc-metrics"))]
fn report_memory_usage(_stage: &str) {}
