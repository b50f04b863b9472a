//! Statistics extractor: per-channel mean and standard deviation of an
//! L\*a\*b\* image.

pub mod channel;

use serde::{Deserialize, Serialize};

pub use channel::{Channel, merge_channels, split_channels};

use crate::error::{Result, TransferError};
use crate::image::LabImage;

/// Per-channel first and second moments, detached from the pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelSummary {
    /// Arithmetic mean of L\*, a\*, b\*.
    pub mean: [f64; 3],
    /// Population standard deviation of L\*, a\*, b\*.
    pub stdev: [f64; 3],
}

/// The three planes of one image plus their moments.
///
/// Index `i` of `mean` and `stdev` always describes `channels[i]`. Records are
/// only built from channel data, so the moments can never drift from the
/// planes they describe.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageStatistics {
    channels: [Channel; 3],
    mean: [f64; 3],
    stdev: [f64; 3],
}

impl ImageStatistics {
    /// Build a record from three equally sized planes, computing their moments.
    pub fn from_channels(channels: [Channel; 3]) -> Result<Self> {
        let [l, a, b] = &channels;
        if !l.same_shape(a) || !l.same_shape(b) {
            return Err(TransferError::invalid_input(
                "statistics channels must share dimensions",
            ));
        }
        let moments = [l.mean_std_dev(), a.mean_std_dev(), b.mean_std_dev()];
        Ok(Self {
            mean: moments.map(|(m, _)| m),
            stdev: moments.map(|(_, s)| s),
            channels,
        })
    }

    /// The L\*, a\*, b\* planes in order.
    pub fn channels(&self) -> &[Channel; 3] {
        &self.channels
    }

    /// Per-channel means.
    pub fn mean(&self) -> [f64; 3] {
        self.mean
    }

    /// Per-channel population standard deviations.
    pub fn stdev(&self) -> [f64; 3] {
        self.stdev
    }

    /// Width and height shared by all channels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.channels[0].width(), self.channels[0].height())
    }

    /// Moments without the pixel data.
    pub fn summary(&self) -> ChannelSummary {
        ChannelSummary {
            mean: self.mean,
            stdev: self.stdev,
        }
    }

    /// Give up the planes, e.g. to recombine them into an image.
    pub fn into_channels(self) -> [Channel; 3] {
        self.channels
    }
}

/// Compute per-channel statistics of an L\*a\*b\* image.
///
/// The image must be non-empty, its buffer must match its dimensions, and
/// every sample must be finite.
pub fn extract_statistics(image: &LabImage) -> Result<ImageStatistics> {
    image.validate()?;
    if let Some(idx) = image
        .pixels
        .iter()
        .position(|px| px.iter().any(|v| !v.is_finite()))
    {
        return Err(TransferError::invalid_input(format!(
            "non-finite sample at pixel {idx}"
        )));
    }

    let stats = ImageStatistics::from_channels(split_channels(image)?)?;
    tracing::debug!(
        width = image.width,
        height = image.height,
        mean = ?stats.mean,
        stdev = ?stats.stdev,
        "extracted channel statistics"
    );
    Ok(stats)
}
