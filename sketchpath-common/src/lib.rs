//! Toolpath model and configuration shared by the sketchpath pipeline and its exporters.

mod config;
mod types;

pub use config::{
    BinarizeConfig, CleanConfig, ConfigError, GcodeOptions, PipelineConfig, SvgOptions,
};
pub use types::{OutputFormat, PathEvent, Point, Segment, ToolPath};
