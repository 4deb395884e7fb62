//! Configuration settings structures for notifications-rs
//!
//! This module defines the configuration structures that can be loaded from
//! a TOML file and environment variables.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::ClientConfig;
use crate::config::error::ConfigError;
use crate::logger::{LogFormat, LoggerConfig};
use crate::transport::default_http_client;

// ============================================================================
// Default value functions
// ============================================================================

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "full".to_string()
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Client Configuration
// ============================================================================

/// Connection settings for the notification service
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Base URL of the notification API
    #[serde(default)]
    pub base_url: String,

    /// Basic auth username
    #[serde(default)]
    pub username: String,

    /// Basic auth password
    #[serde(default)]
    pub password: String,

    /// Overall request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// TCP connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            username: String::new(),
            password: String::new(),
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl ClientSettings {
    /// Builds a client configuration with a reqwest executor honoring the
    /// configured timeouts
    pub fn to_client_config(&self) -> Result<ClientConfig, ConfigError> {
        let http = default_http_client(
            Duration::from_secs(self.timeout),
            Duration::from_secs(self.connect_timeout),
        )
        .map_err(ConfigError::HttpClient)?;

        Ok(
            ClientConfig::new(&self.base_url, &self.username, &self.password)
                .with_executor(Arc::new(http)),
        )
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Logger settings as they appear in configuration files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format (full, compact, json)
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Whether to use colored output on a terminal
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            colored: default_true(),
        }
    }
}

impl LoggerSettings {
    /// Convert to the logger's runtime configuration
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let format: LogFormat = self.format.parse().map_err(|_| {
            ConfigError::ValidationError {
                field: "logger.format".to_string(),
                message: format!("Invalid log format '{}'", self.format),
            }
        })?;

        Ok(LoggerConfig {
            level: self.level,
            format,
            colored: self.colored,
        })
    }
}

// ============================================================================
// Root Settings
// ============================================================================

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub client: ClientSettings,

    #[serde(default)]
    pub logger: LoggerSettings,
}
