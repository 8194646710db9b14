//! Configuration schema definitions and loading.
//!
//! Defines the configuration structure for gpubus, covering general
//! settings and the bus endpoint of the GPU management daemon. All
//! configurations are serializable to/from TOML format.

mod bus;
mod general;
mod paths;

#[cfg(test)]
mod tests;

pub use bus::{BusConfig, BusKind};
pub use general::{GeneralConfig, LogLevel};
pub use paths::ConfigPaths;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{GpubusError, Result};

/// Main configuration structure for gpubus.
///
/// Represents the complete configuration schema that can be loaded
/// from TOML files. All fields have sensible defaults; an absent
/// config file yields the default configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Bus endpoint of the GPU management daemon.
    #[serde(default)]
    pub bus: BusConfig,
}

impl Config {
    /// Loads the configuration from the default config file location.
    ///
    /// Returns the default configuration when no config file exists.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be resolved, the
    /// file cannot be read, or its contents fail to parse.
    pub fn load() -> Result<Self> {
        let path = ConfigPaths::config_file()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Loads the configuration from an explicit file path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or fails to parse.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|err| GpubusError::toml_parse(err, Some(path)))
    }
}
