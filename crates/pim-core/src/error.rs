//! Error types for pim-export

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pim-export
#[derive(Debug, Error)]
pub enum PimError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// A container (account, folder, calendar, list) could not be enumerated
    #[error("Cannot read {kind} '{name}': {message}")]
    Container {
        kind: &'static str,
        name: String,
        message: String,
    },

    /// The scripting bridge to the PIM store failed
    #[error("Bridge operation '{operation}' failed: {message}")]
    Bridge { operation: String, message: String },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PimError>,
    },
}

impl PimError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PimError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Build a container-level error
    pub fn container(kind: &'static str, name: impl Into<String>, message: impl Into<String>) -> Self {
        PimError::Container {
            kind,
            name: name.into(),
            message: message.into(),
        }
    }
}

impl From<toml::de::Error> for PimError {
    fn from(err: toml::de::Error) -> Self {
        PimError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for PimError {
    fn from(err: toml::ser::Error) -> Self {
        PimError::Toml(err.to_string())
    }
}

/// Result type alias for pim-export
pub type Result<T> = std::result::Result<T, PimError>;
