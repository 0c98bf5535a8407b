use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A configuration parameter outside its valid range
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be an odd integer >= {min}, got {value}")]
    KernelSize { name: &'static str, min: u32, value: u32 },
    #[error("{name} must be at least {min}, got {value}")]
    TooSmall { name: &'static str, min: u32, value: u32 },
    #[error("{name} must be a finite positive number, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },
}

fn check_odd_kernel(name: &'static str, value: u32, min: u32) -> Result<(), ConfigError> {
    if value < min || value % 2 == 0 {
        return Err(ConfigError::KernelSize { name, min, value });
    }
    Ok(())
}

/// Parameters of the ink binarization stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinarizeConfig {
    /// Gaussian smoothing kernel size (odd, >= 3)
    pub blur_kernel: u32,
    /// Adaptive threshold neighborhood size (odd, >= 3)
    pub block_size: u32,
    /// Subtracted from the local weighted mean to form the threshold
    pub offset: f32,
}

impl Default for BinarizeConfig {
    fn default() -> Self {
        Self {
            blur_kernel: 7,
            block_size: 11,
            offset: 2.0,
        }
    }
}

impl BinarizeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_odd_kernel("blur_kernel", self.blur_kernel, 3)?;
        check_odd_kernel("block_size", self.block_size, 3)?;
        if !self.offset.is_finite() {
            return Err(ConfigError::NotFinite {
                name: "offset",
                value: self.offset as f64,
            });
        }
        Ok(())
    }
}

/// Parameters of the speckle removal stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    /// Median filter window size (odd, >= 1; 1 disables the filter)
    pub median_kernel: u32,
    /// Closing element radius; the element is a (2r+1)x(2r+1) square
    pub close_radius: u8,
    /// Number of 3x3 erosion passes after closing
    pub erode_iterations: u32,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            median_kernel: 5,
            close_radius: 1,
            erode_iterations: 1,
        }
    }
}

impl CleanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_odd_kernel("median_kernel", self.median_kernel, 1)?;
        if self.close_radius < 1 {
            return Err(ConfigError::TooSmall {
                name: "close_radius",
                min: 1,
                value: self.close_radius as u32,
            });
        }
        Ok(())
    }
}

/// SVG canvas settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self { width: 800, height: 600 }
    }
}

impl SvgOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("svg.width", self.width), ("svg.height", self.height)] {
            if value < 1 {
                return Err(ConfigError::TooSmall { name, min: 1, value });
            }
        }
        Ok(())
    }
}

/// G-code program settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcodeOptions {
    /// Feed rate for drawing moves, in mm/min
    pub feed_rate: u32,
    /// Multiplier from pixel coordinates to machine units
    pub scale: f64,
}

impl Default for GcodeOptions {
    fn default() -> Self {
        Self {
            feed_rate: 1000,
            scale: 1.0,
        }
    }
}

impl GcodeOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feed_rate < 1 {
            return Err(ConfigError::TooSmall {
                name: "gcode.feed_rate",
                min: 1,
                value: self.feed_rate,
            });
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigError::NotPositive {
                name: "gcode.scale",
                value: self.scale,
            });
        }
        Ok(())
    }
}

/// Full set of parameters for one image-to-toolpath run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub binarize: BinarizeConfig,
    pub clean: CleanConfig,
    pub svg: SvgOptions,
    pub gcode: GcodeOptions,
}

impl PipelineConfig {
    /// Reports the first invalid parameter
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.binarize.validate()?;
        self.clean.validate()?;
        self.svg.validate()?;
        self.gcode.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_even_kernel_rejected() {
        let mut config = PipelineConfig::default();
        config.binarize.blur_kernel = 4;

        assert_eq!(
            config.validate(),
            Err(ConfigError::KernelSize { name: "blur_kernel", min: 3, value: 4 })
        );
    }

    #[test]
    fn test_non_positive_scale_rejected() {
        let mut config = PipelineConfig::default();
        config.gcode.scale = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::NotPositive { .. })));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "binarize": { "blur_kernel": 5 }, "gcode": { "scale": 0.25 } }"#;
        let config: PipelineConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.binarize.blur_kernel, 5);
        assert_eq!(config.binarize.block_size, 11);
        assert_eq!(config.gcode.scale, 0.25);
        assert_eq!(config.gcode.feed_rate, 1000);
        assert_eq!(config.svg, SvgOptions::default());
    }
}
