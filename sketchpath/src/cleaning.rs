// Mask cleaning module
// Removes speckle noise from the binary ink mask while keeping strokes connected

use crate::error::{check_dimensions, PipelineError};
use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::filter::median_filter;
use imageproc::morphology::{close, erode};
use log::debug;
use sketchpath_common::CleanConfig;

/// Median filter, then closing, then erosion
/// Closing runs first so the erosion cannot split a stroke the closing reconnects
pub fn clean_mask(mask: &GrayImage, config: &CleanConfig) -> Result<GrayImage, PipelineError> {
    check_dimensions(mask.width(), mask.height())?;
    config.validate()?;
    Ok(clean_mask_checked(mask, config))
}

/// Clean with dimensions and config already validated
pub(crate) fn clean_mask_checked(mask: &GrayImage, config: &CleanConfig) -> GrayImage {
    let radius = config.median_kernel / 2;
    let filtered = if radius > 0 {
        median_filter(mask, radius, radius)
    } else {
        mask.clone()
    };

    let mut cleaned = close(&filtered, Norm::LInf, config.close_radius);
    for _ in 0..config.erode_iterations {
        cleaned = erode(&cleaned, Norm::LInf, 1);
    }

    debug!(
        "cleaned mask (median {}, close radius {}, {} erosion pass(es)): {} ink pixels left",
        config.median_kernel,
        config.close_radius,
        config.erode_iterations,
        cleaned.pixels().filter(|p| p[0] != 0).count()
    );

    cleaned
}
