//! Image representations used by the transfer pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, TransferError};

/// Per-sample depth of a decoded image file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BitDepth {
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 32-bit floating point.
    F32,
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8 => write!(f, "8-bit"),
            Self::U16 => write!(f, "16-bit"),
            Self::F32 => write!(f, "32-bit float"),
        }
    }
}

/// Display-referred RGB image. Pixels are encoded sRGB in `[0, 1]`, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data as encoded sRGB triplets.
    pub pixels: Vec<[f32; 3]>,
    /// Bit depth of the file the image was decoded from.
    pub source_bit_depth: BitDepth,
}

impl ColorImage {
    /// Create an image filled with a single color.
    pub fn filled(width: u32, height: u32, rgb: [f32; 3], source_bit_depth: BitDepth) -> Self {
        Self {
            width,
            height,
            pixels: vec![rgb; pixel_count(width, height)],
            source_bit_depth,
        }
    }

    /// Number of pixels implied by the dimensions.
    pub fn pixel_count(&self) -> usize {
        pixel_count(self.width, self.height)
    }

    /// Check that the image is non-empty and its buffer matches its dimensions.
    pub fn validate(&self) -> Result<()> {
        validate_shape(self.width, self.height, self.pixels.len())
    }
}

/// Image in CIE L\*a\*b\* (D65). Each pixel is `[L, a, b]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data as `[L, a, b]` triplets, row-major.
    pub pixels: Vec<[f32; 3]>,
}

impl LabImage {
    /// Number of pixels implied by the dimensions.
    pub fn pixel_count(&self) -> usize {
        pixel_count(self.width, self.height)
    }

    /// Check that the image is non-empty and its buffer matches its dimensions.
    pub fn validate(&self) -> Result<()> {
        validate_shape(self.width, self.height, self.pixels.len())
    }
}

pub(crate) fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

pub(crate) fn validate_shape(width: u32, height: u32, len: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(TransferError::invalid_input(format!(
            "image has zero dimensions ({width}x{height})"
        )));
    }
    let expected = pixel_count(width, height);
    if len != expected {
        return Err(TransferError::invalid_input(format!(
            "pixel buffer holds {len} samples, expected {expected} for {width}x{height}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_image_is_valid() {
        let image = ColorImage::filled(4, 3, [0.5; 3], BitDepth::U8);
        assert_eq!(image.pixels.len(), 12);
        assert!(image.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_image() {
        let image = ColorImage::filled(0, 0, [0.0; 3], BitDepth::U8);
        assert!(matches!(
            image.validate(),
            Err(TransferError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_short_buffer() {
        let image = LabImage {
            width: 2,
            height: 2,
            pixels: vec![[50.0, 0.0, 0.0]; 3],
        };
        assert!(image.validate().is_err());
    }
}
