mod log_level;

pub use log_level::LogLevel;
use serde::{Deserialize, Serialize};

/// General configuration settings for gpubus.
///
/// Contains global settings that affect the overall behavior of the
/// client, such as logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Logging level for the application.
    pub log_level: LogLevel,
}
