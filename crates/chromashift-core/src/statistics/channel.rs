//! Single-channel planes and their moments.

use crate::error::{Result, TransferError};
use crate::image::{LabImage, validate_shape};

/// One scalar plane of a three-channel image, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl Channel {
    /// Wrap a plane, checking that `data` matches the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        validate_shape(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Plane width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Plane height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Samples, row-major.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Arithmetic mean and population standard deviation.
    ///
    /// Accumulates in `f64` with a two-pass variance so large planes with a
    /// big offset (L\* sits around 50) do not lose precision.
    pub fn mean_std_dev(&self) -> (f64, f64) {
        let n = self.data.len() as f64;
        if n < 1.0 {
            return (0.0, 0.0);
        }
        let mean = self.data.iter().map(|&v| v as f64).sum::<f64>() / n;
        let variance = self
            .data
            .iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;
        (mean, variance.max(0.0).sqrt())
    }

    /// Apply `f` to every sample, producing a new plane of the same shape.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    pub(crate) fn same_shape(&self, other: &Channel) -> bool {
        self.width == other.width && self.height == other.height
    }
}

/// Split an L\*a\*b\* image into its three planes, preserving channel order.
pub fn split_channels(image: &LabImage) -> Result<[Channel; 3]> {
    image.validate()?;
    let n = image.pixels.len();
    let mut planes = [
        Vec::with_capacity(n),
        Vec::with_capacity(n),
        Vec::with_capacity(n),
    ];
    for px in &image.pixels {
        for (plane, &v) in planes.iter_mut().zip(px) {
            plane.push(v);
        }
    }
    let [l, a, b] = planes;
    Ok([
        Channel::new(image.width, image.height, l)?,
        Channel::new(image.width, image.height, a)?,
        Channel::new(image.width, image.height, b)?,
    ])
}

/// Recombine three planes into an L\*a\*b\* image.
pub fn merge_channels(channels: &[Channel; 3]) -> Result<LabImage> {
    let [l, a, b] = channels;
    if !l.same_shape(a) || !l.same_shape(b) {
        return Err(TransferError::invalid_input(format!(
            "channel dimensions differ: {}x{}, {}x{}, {}x{}",
            l.width, l.height, a.width, a.height, b.width, b.height
        )));
    }
    let pixels = l
        .data
        .iter()
        .zip(&a.data)
        .zip(&b.data)
        .map(|((&lv, &av), &bv)| [lv, av, bv])
        .collect();
    Ok(LabImage {
        width: l.width,
        height: l.height,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lab_image() -> LabImage {
        LabImage {
            width: 2,
            height: 2,
            pixels: vec![
                [10.0, 1.0, -1.0],
                [20.0, 2.0, -2.0],
                [30.0, 3.0, -3.0],
                [40.0, 4.0, -4.0],
            ],
        }
    }

    #[test]
    fn test_mean_std_dev_is_population() {
        let ch = Channel::new(4, 1, vec![2.0, 4.0, 4.0, 6.0]).unwrap();
        let (mean, stdev) = ch.mean_std_dev();
        assert!((mean - 4.0).abs() < 1e-12);
        // population variance = (4 + 0 + 0 + 4) / 4 = 2
        assert!((stdev - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_constant_channel_has_zero_deviation() {
        let ch = Channel::new(3, 3, vec![128.0; 9]).unwrap();
        let (mean, stdev) = ch.mean_std_dev();
        assert_eq!(mean, 128.0);
        assert_eq!(stdev, 0.0);
    }

    #[test]
    fn test_split_preserves_channel_order() {
        let [l, a, b] = split_channels(&lab_image()).unwrap();
        assert_eq!(l.data(), &[10.0, 20.0, 30.0, 40.0]);
        assert_eq!(a.data(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(b.data(), &[-1.0, -2.0, -3.0, -4.0]);
    }

    #[test]
    fn test_split_then_merge_is_identity() {
        let image = lab_image();
        let merged = merge_channels(&split_channels(&image).unwrap()).unwrap();
        assert_eq!(merged, image);
    }

    #[test]
    fn test_merge_rejects_mismatched_planes() {
        let l = Channel::new(2, 2, vec![0.0; 4]).unwrap();
        let a = Channel::new(4, 1, vec![0.0; 4]).unwrap();
        let result = merge_channels(&[l.clone(), a, l]);
        assert!(matches!(result, Err(TransferError::InvalidInput { .. })));
    }

    #[test]
    fn test_channel_new_rejects_wrong_length() {
        assert!(Channel::new(3, 3, vec![0.0; 8]).is_err());
    }

    #[test]
    fn test_map_keeps_shape() {
        let ch = Channel::new(2, 1, vec![1.0, 2.0]).unwrap();
        let doubled = ch.map(|v| v * 2.0);
        assert_eq!(doubled.data(), &[2.0, 4.0]);
        assert_eq!((doubled.width(), doubled.height()), (2, 1));
    }
}
