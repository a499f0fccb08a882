//! Job configuration loaded from YAML.
//!
//! Every section and field is optional:
//!
//! ```yaml
//! raster:
//!   size: 1025
//! contour:
//!   smoothing_window: 7
//! color:
//!   scheme: red_ramp
//!   min: 220.0
//!   max: 320.0
//! ```

use anyhow::{Context, Result};
use geodraw_common::GeoDrawError;
use renderer::{ContourConfig, RasterConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level job configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    /// Canvas geometry for raster jobs
    pub raster: RasterConfig,

    /// Tuning for contour jobs
    pub contour: ContourConfig,

    /// Coloring applied to raster jobs
    pub color: ColorConfig,
}

impl JobConfig {
    /// Load and validate configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Parse and validate configuration from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: JobConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), GeoDrawError> {
        self.raster.validate()?;
        self.contour.validate()?;
        self.color.validate()
    }
}

/// Built-in coloring schemes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    /// Value written to red and alpha, saturated to 0..=255
    #[default]
    Default,
    /// Transparent-to-red ramp over `[min, max]`
    RedRamp,
    /// Blue-yellow-red ramp over the magnitude of two values
    Magnitude,
}

/// Coloring section. A missing bound is taken from the data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub scheme: ColorScheme,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ColorConfig {
    pub fn validate(&self) -> Result<(), GeoDrawError> {
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if !(min <= max) {
                return Err(GeoDrawError::Config(format!(
                    "color range min {} exceeds max {}",
                    min, max
                )));
            }
        }
        Ok(())
    }

    /// Fill missing bounds from the data range, falling back to `0..=255`.
    pub fn range(&self, data: Option<(f64, f64)>) -> (f64, f64) {
        let (data_min, data_max) = data.unwrap_or((0.0, 255.0));
        (self.min.unwrap_or(data_min), self.max.unwrap_or(data_max))
    }
}
