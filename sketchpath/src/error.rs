use sketchpath_common::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised before or during image processing
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid input image: {0}")]
    InvalidInput(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Failures raised while writing serialized toolpaths
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("output format `all` has no single file extension")]
    AmbiguousFormat,
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Rejects images with a zero dimension
pub(crate) fn check_dimensions(width: u32, height: u32) -> Result<(), PipelineError> {
    if width == 0 || height == 0 {
        return Err(PipelineError::InvalidInput(format!(
            "image must have non-zero dimensions, got {}x{}",
            width, height
        )));
    }
    Ok(())
}
