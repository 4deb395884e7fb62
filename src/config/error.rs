//! Errors raised while loading `notifications` settings

use thiserror::Error;

use crate::error::TransportError;

/// Why settings could not be turned into a usable client configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A named settings file is missing
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Sources merged but did not deserialize into [`Settings`](super::Settings)
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A setting has an unusable value, e.g. `client.base_url` is not http(s)
    #[error("Validation error: {field} - {message}")]
    ValidationError {
        /// Dotted key, such as `client.username`
        field: String,
        message: String,
    },

    /// Timeouts were accepted but reqwest refused to build a client
    #[error("Failed to build HTTP client")]
    HttpClient(#[source] TransportError),

    /// Raised by the `config` crate while reading the file or environment
    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found<S: Into<String>>(path: S) -> Self {
        ConfigError::FileNotFound(path.into())
    }
}
