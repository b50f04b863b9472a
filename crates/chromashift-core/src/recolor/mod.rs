//! Channel recolorer: the affine part of Reinhard color transfer.
//!
//! Each target channel is recentered on zero, scaled, and recentered on the
//! source mean:
//!
//! ```text
//! out = (in − target.mean) × ratio + source.mean
//! ratio = source.stdev / target.stdev      (ScaleMode::Reinhard)
//! ```
//!
//! The order is fixed. Scaling before the first recenter would scale around
//! zero instead of the target mean and shift the result off the source mean.

pub mod options;

use crate::error::{Result, TransferError};
use crate::statistics::{Channel, ImageStatistics};
use options::{TransferOptions, ZeroDeviation};

/// Deviations below this are treated as zero.
const MIN_DEVIATION: f64 = 1e-10;

/// Indices of the channels whose deviation counts as zero.
pub fn flat_channels(stats: &ImageStatistics) -> Vec<usize> {
    (0..3)
        .filter(|&c| stats.stdev()[c] < MIN_DEVIATION)
        .collect()
}

/// Per-channel scale factors for a transfer.
///
/// A zero divisor is handled according to `options.zero_deviation`; the
/// returned factors are always finite. A zero numerator yields a factor of
/// zero, collapsing that channel onto the source mean, and is logged.
pub fn scale_factors(
    source: &ImageStatistics,
    target: &ImageStatistics,
    options: &TransferOptions,
) -> Result<[f64; 3]> {
    let (src_stdev, tgt_stdev) = (source.stdev(), target.stdev());
    let mut ratios = [1.0_f64; 3];

    for c in 0..3 {
        let (num, den) = options.scale_mode.operands(src_stdev[c], tgt_stdev[c]);
        let ratio = num / den;
        if den >= MIN_DEVIATION && ratio.is_finite() {
            if num < MIN_DEVIATION {
                tracing::warn!(
                    channel = c,
                    role = %options.scale_mode.numerator_role(),
                    stdev = num,
                    "zero standard deviation, channel collapses to a constant"
                );
            }
            ratios[c] = ratio;
            continue;
        }

        let role = options.scale_mode.divisor_role();
        match options.zero_deviation {
            ZeroDeviation::Reject => {
                return Err(TransferError::DegenerateStatistics {
                    channel: c,
                    role,
                    stdev: den,
                });
            }
            ZeroDeviation::Unscaled => {
                tracing::warn!(
                    channel = c,
                    %role,
                    stdev = den,
                    "zero standard deviation, recentering without scaling"
                );
                ratios[c] = 1.0;
            }
        }
    }

    tracing::debug!(?ratios, mode = %options.scale_mode, "scale factors");
    Ok(ratios)
}

/// Recolor the target's channels so they adopt the source's statistics.
///
/// Neither input is modified. The returned record holds the transformed
/// channels with their moments recomputed; with `ScaleMode::Reinhard` those
/// equal the source's moments up to `f32` rounding.
pub fn transfer_color(
    source: &ImageStatistics,
    target: &ImageStatistics,
    options: &TransferOptions,
) -> Result<ImageStatistics> {
    let ratios = scale_factors(source, target, options)?;
    recolor_with_factors(source, target, ratios)
}

/// Recolor with precomputed, finite scale factors.
pub(crate) fn recolor_with_factors(
    source: &ImageStatistics,
    target: &ImageStatistics,
    ratios: [f64; 3],
) -> Result<ImageStatistics> {
    let (src_mean, tgt_mean) = (source.mean(), target.mean());
    let channels = target.channels();

    let recolored: [Channel; 3] = std::array::from_fn(|c| {
        recolor_channel(&channels[c], tgt_mean[c], ratios[c], src_mean[c])
    });
    ImageStatistics::from_channels(recolored)
}

fn recolor_channel(channel: &Channel, target_mean: f64, ratio: f64, source_mean: f64) -> Channel {
    channel.map(|v| {
        let centered = v as f64 - target_mean;
        let scaled = centered * ratio;
        (scaled + source_mean) as f32
    })
}
