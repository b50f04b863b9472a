//! Conversion between encoded sRGB and CIE L\*a\*b\* (D65).
//!
//! L\*a\*b\* is the working space of the transfer: its lightness and two
//! color-opponent axes are close to decorrelated for natural images, so each
//! channel can be matched independently.

use palette::{FromColor, Lab, Srgb};

use crate::error::Result;
use crate::image::{BitDepth, ColorImage, LabImage};

/// Convert an encoded sRGB triplet in `[0, 1]` to `[L, a, b]`.
pub fn srgb_to_lab(rgb: [f32; 3]) -> [f32; 3] {
    let lab: Lab = Lab::from_color(Srgb::new(rgb[0], rgb[1], rgb[2]));
    [lab.l, lab.a, lab.b]
}

/// Convert `[L, a, b]` to encoded sRGB, clamped to the displayable gamut.
pub fn lab_to_srgb(lab: [f32; 3]) -> [f32; 3] {
    let lab: Lab = Lab::new(lab[0], lab[1], lab[2]);
    let srgb: Srgb = Srgb::from_color(lab);
    [
        clamp_unit(srgb.red),
        clamp_unit(srgb.green),
        clamp_unit(srgb.blue),
    ]
}

/// Convert a whole image into L\*a\*b\*.
pub fn to_lab(image: &ColorImage) -> Result<LabImage> {
    image.validate()?;
    Ok(LabImage {
        width: image.width,
        height: image.height,
        pixels: image.pixels.iter().map(|&px| srgb_to_lab(px)).collect(),
    })
}

/// Convert an L\*a\*b\* image back to display sRGB.
///
/// Out-of-gamut results are clamped; this is the only place the transfer
/// clips values.
pub fn from_lab(image: &LabImage, source_bit_depth: BitDepth) -> ColorImage {
    ColorImage {
        width: image.width,
        height: image.height,
        pixels: image.pixels.iter().map(|&px| lab_to_srgb(px)).collect(),
        source_bit_depth,
    }
}

fn clamp_unit(v: f32) -> f32 {
    // NaN maps to black rather than leaking into the encoder.
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
