//! Command-line configuration.
//!
//! The `viewport-breakpoints` binary reads a single `breakpoints.toml`. Every
//! key is optional; a missing file means stock defaults (no images, a short
//! demo width sequence).
//!
//! ## Configuration Options
//!
//! ```toml
//! # Image applied while the viewport is at least this many pixels wide.
//! # Keys are quoted because TOML table keys are strings.
//! [images]
//! "0" = "img/xs.jpg"
//! "320" = "img/sm.jpg"
//! "768" = "img/md.jpg"
//! "1024" = "img/lg.jpg"
//!
//! [simulate]
//! widths = [0, 400, 700, 800, 1200, 200]  # Sequence fed to `simulate`
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::background::ImageSizes;
use crate::breakpoints::check_width;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `breakpoints.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Width → image URL table.
    pub images: ImageSizes,
    /// Widths replayed by the `simulate` command.
    pub simulate: SimulateConfig,
}

impl Config {
    /// Validate values the type system does not already enforce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some((width, _)) = self.images.iter().find(|(_, url)| url.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "images.\"{width}\" must not be empty"
            )));
        }
        for &width in &self.simulate.widths {
            if check_width(width).is_err() {
                return Err(ConfigError::Validation(format!(
                    "simulate.widths contains {width}; widths must be finite and non-negative"
                )));
            }
        }
        Ok(())
    }
}

/// Width sequence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulateConfig {
    pub widths: Vec<f64>,
}

impl Default for SimulateConfig {
    fn default() -> Self {
        Self {
            widths: vec![0.0, 400.0, 700.0, 800.0, 1200.0, 200.0],
        }
    }
}

/// Parse and validate config text.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`.
///
/// Returns stock defaults when the file does not exist; a file that exists but
/// fails to parse or validate is an error.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Returns a fully-commented stock `breakpoints.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# viewport-breakpoints configuration
# ==================================
# All settings are optional. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Background images
# ---------------------------------------------------------------------------
# Image applied while the viewport is at least this many pixels wide.
# The active entry is the one with the greatest width not exceeding the
# viewport width; below the lowest key nothing is applied, so "0" is the
# usual catch-all. Keys must be quoted non-negative integers.
[images]
"0" = "img/xs.jpg"
"320" = "img/sm.jpg"
"768" = "img/md.jpg"
"1024" = "img/lg.jpg"

# ---------------------------------------------------------------------------
# Simulation
# ---------------------------------------------------------------------------
# Viewport widths replayed, in order, by `viewport-breakpoints simulate`
# when no widths are given on the command line.
[simulate]
widths = [0, 400, 700, 800, 1200, 200]
"##
}
