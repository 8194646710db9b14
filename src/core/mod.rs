use std::path::Path;

use thiserror::Error;

/// Error types for crate bootstrap concerns.
///
/// Covers configuration loading, parsing and log-file setup. Failures of
/// the GPU service itself use [`crate::services::gpu::GpuError`].
#[derive(Error, Debug)]
pub enum GpubusError {
    /// Configuration field missing or invalid
    #[error("invalid config field '{field}': {reason}")]
    InvalidConfigField {
        /// The field that is invalid
        field: String,
        /// Reason why the field is invalid
        reason: String,
    },

    /// I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParse {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },
}

/// A specialized `Result` type for gpubus operations.
pub type Result<T> = std::result::Result<T, GpubusError>;

impl GpubusError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl std::fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        GpubusError::TomlParse {
            location,
            details: error.to_string(),
        }
    }
}
