//! Photographed sketch to pen-plotter toolpath.
//!
//! The pipeline binarizes a color frame, cleans the ink mask, traces the outer
//! contour of every ink region into a [`ToolPath`] and serializes it as an XML
//! point list, SVG line drawing or G-code program.

pub mod binarize;
pub mod cleaning;
pub mod error;
pub mod export_gcode;
pub mod export_svg;
pub mod export_xml;
pub mod pipeline;
pub mod tracing;

pub use error::{ExportError, PipelineError};
pub use pipeline::{export, export_all, output_path, trace_image, Traced};
pub use sketchpath_common::{
    BinarizeConfig, CleanConfig, GcodeOptions, OutputFormat, PathEvent, PipelineConfig, Point,
    Segment, SvgOptions, ToolPath,
};
