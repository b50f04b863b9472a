//! Side-by-side comparison strips.

use image::RgbImage;
use image::imageops::{self, FilterType};

/// Place images left to right on one canvas.
///
/// The canvas is as tall as the tallest input; shorter images are aligned
/// to the top and the remainder stays black.
pub fn concat_horizontal(images: &[&RgbImage]) -> Result<RgbImage, CanvasError> {
    if images.is_empty() {
        return Err(CanvasError::Empty);
    }

    let width = images
        .iter()
        .try_fold(0u32, |acc, img| acc.checked_add(img.width()))
        .ok_or(CanvasError::TooLarge)?;
    let height = images.iter().map(|img| img.height()).max().unwrap_or(0);
    if width == 0 || height == 0 {
        return Err(CanvasError::Empty);
    }

    let mut canvas = RgbImage::new(width, height);
    let mut x = 0i64;
    for img in images {
        imageops::replace(&mut canvas, *img, x, 0);
        x += i64::from(img.width());
    }
    Ok(canvas)
}

/// Scale both dimensions by `scale` with a bilinear filter.
///
/// Each output dimension is rounded and kept at least one pixel.
pub fn resize(image: &RgbImage, scale: f32) -> Result<RgbImage, CanvasError> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(CanvasError::InvalidScale(scale));
    }
    if image.width() == 0 || image.height() == 0 {
        return Err(CanvasError::Empty);
    }
    let width = scaled(image.width(), scale);
    let height = scaled(image.height(), scale);
    Ok(imageops::resize(image, width, height, FilterType::Triangle))
}

fn scaled(dim: u32, scale: f32) -> u32 {
    // `as` saturates, so absurd scales clamp to u32::MAX instead of wrapping.
    ((f64::from(dim) * f64::from(scale)).round() as u32).max(1)
}

/// Errors produced while composing comparison images.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CanvasError {
    #[error("nothing to draw: no images or zero-sized canvas")]
    Empty,
    #[error("combined canvas width exceeds u32::MAX")]
    TooLarge,
    #[error("resize scale must be finite and positive, got {0}")]
    InvalidScale(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, image::Rgb(rgb))
    }

    #[test]
    fn test_concat_places_images_left_to_right() {
        let red = solid(2, 2, [255, 0, 0]);
        let green = solid(3, 2, [0, 255, 0]);
        let strip = concat_horizontal(&[&red, &green]).unwrap();
        assert_eq!(strip.dimensions(), (5, 2));
        assert_eq!(strip.get_pixel(1, 1).0, [255, 0, 0]);
        assert_eq!(strip.get_pixel(2, 0).0, [0, 255, 0]);
        assert_eq!(strip.get_pixel(4, 1).0, [0, 255, 0]);
    }

    #[test]
    fn test_concat_pads_shorter_images_with_black() {
        let tall = solid(1, 4, [9, 9, 9]);
        let short = solid(1, 2, [200, 100, 50]);
        let strip = concat_horizontal(&[&tall, &short]).unwrap();
        assert_eq!(strip.dimensions(), (2, 4));
        assert_eq!(strip.get_pixel(1, 1).0, [200, 100, 50]);
        assert_eq!(strip.get_pixel(1, 3).0, [0, 0, 0]);
    }

    #[test]
    fn test_concat_rejects_empty_input() {
        assert_eq!(concat_horizontal(&[]), Err(CanvasError::Empty));
    }

    #[test]
    fn test_resize_halves_dimensions() {
        let img = solid(10, 6, [40, 80, 120]);
        let small = resize(&img, 0.5).unwrap();
        assert_eq!(small.dimensions(), (5, 3));
        assert_eq!(small.get_pixel(2, 1).0, [40, 80, 120]);
    }

    #[test]
    fn test_resize_keeps_at_least_one_pixel() {
        let img = solid(3, 1, [1, 2, 3]);
        assert_eq!(resize(&img, 0.01).unwrap().dimensions(), (1, 1));
    }

    #[test]
    fn test_resize_rejects_bad_scale() {
        let img = solid(2, 2, [0, 0, 0]);
        assert_eq!(resize(&img, 0.0), Err(CanvasError::InvalidScale(0.0)));
        assert!(resize(&img, f32::NAN).is_err());
        assert!(resize(&img, -1.0).is_err());
    }
}
