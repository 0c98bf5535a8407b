// Ink binarization module
// Separates dark pen strokes from the paper background under uneven lighting

use crate::error::{check_dimensions, PipelineError};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use imageproc::contrast::equalize_histogram;
use imageproc::filter::separable_filter_equal;
use log::debug;
use sketchpath_common::BinarizeConfig;

/// Convert a color frame into a binary ink mask
/// Ink pixels become 255, paper pixels 0
pub fn binarize(image: &DynamicImage, config: &BinarizeConfig) -> Result<GrayImage, PipelineError> {
    check_dimensions(image.width(), image.height())?;
    config.validate()?;
    Ok(binarize_checked(image, config))
}

/// Binarize with dimensions and config already validated
pub(crate) fn binarize_checked(image: &DynamicImage, config: &BinarizeConfig) -> GrayImage {
    let gray = image.to_luma8();
    let equalized = equalize_histogram(&gray);
    let blurred = separable_filter_equal(&equalized, &gaussian_kernel(config.blur_kernel));
    let mask = adaptive_threshold_inv(&blurred, config.block_size, config.offset);

    debug!(
        "binarized {}x{} frame (blur {}, block {}, offset {}): {} ink pixels",
        image.width(),
        image.height(),
        config.blur_kernel,
        config.block_size,
        config.offset,
        mask.pixels().filter(|p| p[0] != 0).count()
    );

    mask
}

/// Normalized 1D Gaussian kernel for an odd kernel size
/// Sigma follows the size: 0.3 * ((size - 1) * 0.5 - 1) + 0.8
fn gaussian_kernel(size: u32) -> Vec<f32> {
    let radius = (size / 2) as i32;
    let sigma = 0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let two_sigma2 = 2.0 * sigma * sigma;

    let mut kernel: Vec<f32> = (-radius..=radius)
        .map(|i| (-((i * i) as f32) / two_sigma2).exp())
        .collect();

    let sum: f32 = kernel.iter().sum();
    for k in &mut kernel {
        *k /= sum;
    }
    kernel
}

/// Inverted adaptive threshold against the Gaussian-weighted local mean
/// A pixel at or below (local mean - offset) is ink
fn adaptive_threshold_inv(image: &GrayImage, block_size: u32, offset: f32) -> GrayImage {
    // local mean stays unrounded
    let values: ImageBuffer<Luma<f32>, Vec<f32>> =
        ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
            Luma([image.get_pixel(x, y)[0] as f32])
        });
    let local_mean = separable_filter_equal(&values, &gaussian_kernel(block_size));

    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let value = values.get_pixel(x, y)[0];
        let threshold = local_mean.get_pixel(x, y)[0] - offset;
        if value <= threshold {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn sheet_with_stroke() -> DynamicImage {
        let mut img = RgbImage::from_pixel(40, 40, Rgb([250, 250, 245]));
        for y in 19..=21 {
            for x in 5..35 {
                img.put_pixel(x, y, Rgb([10, 10, 10]));
            }
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_kernel_is_normalized_and_symmetric() {
        for size in [3, 5, 7, 11] {
            let k = gaussian_kernel(size);
            assert_eq!(k.len(), size as usize);
            let sum: f32 = k.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5);
            for i in 0..k.len() / 2 {
                assert!((k[i] - k[k.len() - 1 - i]).abs() < 1e-6);
            }
            assert!(k[k.len() / 2] > k[0]);
        }
    }

    #[test]
    fn test_dark_stroke_becomes_foreground() {
        let mask = binarize(&sheet_with_stroke(), &BinarizeConfig::default()).unwrap();

        assert_eq!(mask.dimensions(), (40, 40));
        assert_eq!(mask.get_pixel(20, 20)[0], 255);
        assert_eq!(mask.get_pixel(20, 3)[0], 0);
        assert_eq!(mask.get_pixel(2, 36)[0], 0);
        assert!(mask.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }

    #[test]
    fn test_blank_sheet_has_no_ink() {
        let blank = DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 24, Rgb([255, 255, 255])));
        let mask = binarize(&blank, &BinarizeConfig::default()).unwrap();
        assert!(mask.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_empty_image_is_invalid_input() {
        let empty = DynamicImage::new_rgb8(0, 0);
        let err = binarize(&empty, &BinarizeConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput(_)));
    }

    #[test]
    fn test_even_block_size_is_invalid_config() {
        let config = BinarizeConfig {
            block_size: 10,
            ..BinarizeConfig::default()
        };
        let err = binarize(&sheet_with_stroke(), &config).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));
    }
}
