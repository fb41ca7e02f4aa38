//! Configuration errors.

use std::path::PathBuf;

use super::error_code::{self, PolytrimErrorCode};

/// Errors raised while resolving `PolytrimConfig` layers.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {message}")]
    Unreadable { path: PathBuf, message: String },

    /// `origin` is a file path, or `<string>` for inline TOML.
    #[error("Malformed TOML in {origin}: {message}")]
    Toml { origin: String, message: String },

    #[error("Invalid setting {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Unusable value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Config could not be serialized: {0}")]
    Serialize(String),
}

impl PolytrimErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
