//! Image decoding and encoding for the command-line tool.

use std::path::{Path, PathBuf};

use chromashift_core::image::{BitDepth, ColorImage};
use image::RgbImage;

/// Load an image from disk and convert to the internal `ColorImage` format.
///
/// Supports the formats enabled in the `image` crate (PNG, JPEG, TIFF, ...).
/// Alpha is dropped; samples are normalized to `[0, 1]` encoded sRGB.
pub fn load_image(path: &Path) -> Result<ColorImage, ImageIoError> {
    let img = image::open(path).map_err(|source| ImageIoError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let rgb = img.to_rgb32f();
    let (width, height) = rgb.dimensions();
    let pixels: Vec<[f32; 3]> = bytemuck::cast_slice(rgb.as_raw()).to_vec();

    let bit_depth = match img.color() {
        image::ColorType::L16
        | image::ColorType::La16
        | image::ColorType::Rgb16
        | image::ColorType::Rgba16 => BitDepth::U16,
        image::ColorType::Rgb32F | image::ColorType::Rgba32F => BitDepth::F32,
        _ => BitDepth::U8,
    };

    tracing::info!(
        path = %path.display(),
        width,
        height,
        channels = img.color().channel_count(),
        depth = %bit_depth,
        "image read"
    );

    Ok(ColorImage {
        width,
        height,
        pixels,
        source_bit_depth: bit_depth,
    })
}

/// Quantize to 8-bit sRGB for display and encoding.
pub fn to_rgb8(image: &ColorImage) -> RgbImage {
    let width = image.width;
    RgbImage::from_fn(image.width, image.height, |x, y| {
        let px = image.pixels[(y as usize) * (width as usize) + x as usize];
        image::Rgb(px.map(quantize))
    })
}

/// Write an 8-bit image; the format is chosen from the file extension.
pub fn save_image(image: &RgbImage, path: &Path) -> Result<(), ImageIoError> {
    image.save(path).map_err(|source| ImageIoError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "image written"
    );
    Ok(())
}

fn quantize(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Errors that can occur while reading or writing image files.
#[derive(Debug, thiserror::Error)]
pub enum ImageIoError {
    #[error("could not read image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("could not write image {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
