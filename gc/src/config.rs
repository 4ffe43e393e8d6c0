//! Configuration for the gc command-line tool

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;

/// Main gc configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputConfig,

    /// Default log filter, overridden by `--log-level` and `RUST_LOG`
    #[serde(rename = "log-level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            log_level: "warn".to_string(),
        }
    }
}

/// How results are printed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (text or json)
    pub format: OutputFormat,

    /// Colorize text output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    ///
    /// An explicit path must load. Otherwise the first fallback that parses
    /// wins, and broken fallbacks are skipped with a warning.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::read(path).context(format!("Failed to load config from {}", path.display()));
        }

        for path in fallback_paths().iter().filter(|p| p.exists()) {
            match Self::read(path) {
                Ok(config) => return Ok(config),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable config"),
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }
}

/// Project-local config first, then the user config directory
fn fallback_paths() -> Vec<PathBuf> {
    let user = dirs::config_dir().map(|dir| dir.join("globalcoords").join("globalcoords.yml"));
    std::iter::once(PathBuf::from(".globalcoords.yml")).chain(user).collect()
}
