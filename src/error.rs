//! Error types for the Docvy utilities.
//!
//! These cover failures of the helpers themselves (filesystem, configuration
//! sources, logging setup). Application-level error kinds are produced by
//! [`crate::define_error`] instead.

use std::path::PathBuf;
use thiserror::Error;

/// Utility-related errors
#[derive(Debug, Error)]
pub enum UtilsError {
    #[error("Could not determine home directory")]
    HomeNotFound,

    #[error("Unknown application path: {0}")]
    UnknownPath(String),

    #[error("Failed to create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Configuration source {name:?} is not a mapping")]
    NotAMapping { name: String },

    #[error("Logging error: {0}")]
    LoggingError(String),
}

impl From<config::ConfigError> for UtilsError {
    fn from(err: config::ConfigError) -> Self {
        UtilsError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for UtilsError {
    fn from(err: serde_json::Error) -> Self {
        UtilsError::ConfigError(err.to_string())
    }
}
