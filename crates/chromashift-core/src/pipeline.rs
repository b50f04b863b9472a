//! Composed transfer: sRGB → L\*a\*b\* → statistics → recolor → sRGB.

use serde::{Deserialize, Serialize};

use crate::color_space::{from_lab, to_lab};
use crate::error::Result;
use crate::image::ColorImage;
use crate::recolor::options::TransferOptions;
use crate::recolor::{flat_channels, recolor_with_factors, scale_factors};
use crate::statistics::{ChannelSummary, extract_statistics, merge_channels};

/// What a transfer did, in L\*a\*b\* units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferReport {
    pub options: TransferOptions,
    pub source: ChannelSummary,
    pub target: ChannelSummary,
    /// Moments of the recolored channels before conversion back to sRGB.
    pub result: ChannelSummary,
    /// Scale factor applied to each channel.
    pub scale: [f64; 3],
    /// Source channels with zero deviation. With `ScaleMode::Reinhard` the
    /// matching result channels are constant.
    pub flat_source_channels: Vec<usize>,
}

/// Restyle `target` with the color statistics of `source`.
///
/// The result has the target's dimensions. Its `source_bit_depth` is copied
/// from the target as metadata only; the samples are always `f32` in `[0, 1]`
/// and the caller picks the encoding when writing them out.
pub fn apply_transfer(
    source: &ColorImage,
    target: &ColorImage,
    options: &TransferOptions,
) -> Result<ColorImage> {
    apply_transfer_with_report(source, target, options).map(|(image, _)| image)
}

/// Same as [`apply_transfer`], also returning the statistics involved.
pub fn apply_transfer_with_report(
    source: &ColorImage,
    target: &ColorImage,
    options: &TransferOptions,
) -> Result<(ColorImage, TransferReport)> {
    let source_stats = extract_statistics(&to_lab(source)?)?;
    let target_stats = extract_statistics(&to_lab(target)?)?;

    let scale = scale_factors(&source_stats, &target_stats, options)?;
    let recolored = recolor_with_factors(&source_stats, &target_stats, scale)?;

    let report = TransferReport {
        options: *options,
        source: source_stats.summary(),
        target: target_stats.summary(),
        result: recolored.summary(),
        scale,
        flat_source_channels: flat_channels(&source_stats),
    };

    let lab = merge_channels(&recolored.into_channels())?;
    let image = from_lab(&lab, target.source_bit_depth);

    tracing::info!(
        width = image.width,
        height = image.height,
        mode = %options.scale_mode,
        "color transfer applied"
    );
    Ok((image, report))
}
