//! Runtime configuration for the command-line tool.

use std::path::PathBuf;
use std::str::FromStr;

use chromashift_core::{ScaleMode, TransferOptions, ZeroDeviation};
use serde::Serialize;

/// Default source image (colors are taken from here).
const DEFAULT_SOURCE: &str = "images/castle.jpg";
/// Default target image (recolored).
const DEFAULT_TARGET: &str = "images/comp.jpg";
/// Default output path for the comparison strip.
const DEFAULT_OUTPUT: &str = "result.png";
/// Default scale applied to the comparison strip.
const DEFAULT_PREVIEW_SCALE: f32 = 0.5;

/// Runtime configuration for one chromashift run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppConfig {
    /// Image whose color statistics are adopted.
    pub source: PathBuf,
    /// Image that is recolored.
    pub target: PathBuf,
    /// Where the `target | source | result` strip is written.
    pub output: PathBuf,
    /// Resize factor for the strip.
    pub preview_scale: f32,
    /// Scale mode and zero-deviation policy.
    pub transfer: TransferOptions,
    /// Optional JSON dump of the transfer statistics.
    pub report_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl AppConfig {
    /// Build from a key lookup (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = |key: &str, default: &str| {
            PathBuf::from(lookup(key).unwrap_or_else(|| default.to_string()))
        };

        let preview_scale = parse_or(&lookup, "CHROMASHIFT_PREVIEW_SCALE", DEFAULT_PREVIEW_SCALE);
        let preview_scale = if preview_scale.is_finite() && preview_scale > 0.0 {
            preview_scale
        } else {
            tracing::warn!(preview_scale, "preview scale must be positive, using default");
            DEFAULT_PREVIEW_SCALE
        };

        Self {
            source: path("CHROMASHIFT_SOURCE", DEFAULT_SOURCE),
            target: path("CHROMASHIFT_TARGET", DEFAULT_TARGET),
            output: path("CHROMASHIFT_OUTPUT", DEFAULT_OUTPUT),
            preview_scale,
            transfer: TransferOptions {
                scale_mode: parse_or(&lookup, "CHROMASHIFT_SCALE_MODE", ScaleMode::default()),
                zero_deviation: parse_or(
                    &lookup,
                    "CHROMASHIFT_ZERO_STDDEV",
                    ZeroDeviation::default(),
                ),
            },
            report_path: lookup("CHROMASHIFT_REPORT")
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Apply positional overrides: `[source] [target] [output]`.
    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        let mut args = args.into_iter();
        if let Some(source) = args.next() {
            self.source = source.into();
        }
        if let Some(target) = args.next() {
            self.target = target.into();
        }
        if let Some(output) = args.next() {
            self.output = output.into();
        }
        let extra: Vec<String> = args.collect();
        if !extra.is_empty() {
            tracing::warn!(?extra, "ignoring extra arguments");
        }
        self
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "ignoring unparseable config value");
            default
        }),
        None => default,
    }
}
