// Pipeline module
// Runs binarize -> clean -> trace on one still image and fans the toolpath out to the exporters

use crate::binarize::binarize_checked;
use crate::cleaning::clean_mask_checked;
use crate::error::{check_dimensions, ExportError, PipelineError};
use crate::export_gcode::export_gcode;
use crate::export_svg::export_svg;
use crate::export_xml::export_xml;
use crate::tracing::extract_path;
use image::{DynamicImage, GrayImage};
use log::debug;
use sketchpath_common::{OutputFormat, PipelineConfig, ToolPath};
use std::path::{Path, PathBuf};

/// Output of one processed image
#[derive(Debug, Clone)]
pub struct Traced {
    /// Cleaned binary ink mask the path was traced from
    pub mask: GrayImage,
    pub path: ToolPath,
}

/// Validate the input and configuration, then trace the image into a toolpath
/// The whole config, exporter options included, is checked once here
pub fn trace_image(image: &DynamicImage, config: &PipelineConfig) -> Result<Traced, PipelineError> {
    check_dimensions(image.width(), image.height())?;
    config.validate()?;

    let binary = binarize_checked(image, &config.binarize);
    let mask = clean_mask_checked(&binary, &config.clean);
    let path = extract_path(&mask);

    debug!(
        "traced {}x{} image into {} segment(s)",
        image.width(),
        image.height(),
        path.segment_count()
    );

    Ok(Traced { mask, path })
}

/// `<stem>.<ext>` for a concrete format; the stem's own dots are kept
pub fn output_path(stem: &Path, format: OutputFormat) -> Result<PathBuf, ExportError> {
    let ext = format.extension().ok_or(ExportError::AmbiguousFormat)?;
    let mut name = stem.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    Ok(PathBuf::from(name))
}

/// Write one concrete format to `output_path`
pub fn export(
    path: &ToolPath,
    config: &PipelineConfig,
    format: OutputFormat,
    output_path: &Path,
) -> Result<(), ExportError> {
    match format {
        OutputFormat::Xml => export_xml(path, output_path),
        OutputFormat::Svg => export_svg(path, &config.svg, output_path),
        OutputFormat::Gcode => export_gcode(path, &config.gcode, output_path),
        OutputFormat::All => Err(ExportError::AmbiguousFormat),
    }
}

/// Write every format selected by `formats` next to `stem`
/// Returns the written files in XML, SVG, G-code order; stops at the first failure
pub fn export_all(
    path: &ToolPath,
    config: &PipelineConfig,
    stem: &Path,
    formats: OutputFormat,
) -> Result<Vec<PathBuf>, ExportError> {
    let mut written = Vec::new();
    for format in OutputFormat::CONCRETE {
        if !formats.includes(format) {
            continue;
        }
        let target = output_path(stem, format)?;
        export(path, config, format, &target)?;
        written.push(target);
    }
    Ok(written)
}
