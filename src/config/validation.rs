//! Configuration validation logic
//!
//! This module provides validation methods for the configuration structures
//! to ensure values are usable before a client is built from them.

use reqwest::Url;

use crate::config::error::ConfigError;
use crate::config::settings::{ClientSettings, LoggerSettings, Settings};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ClientSettings {
    /// Validate client configuration
    ///
    /// # Validation Rules
    /// - Base URL must be an absolute http or https URL
    /// - Username must not be empty
    /// - Timeouts must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::validation(
                "client.base_url",
                "Base URL is required. Please specify the notification API URL.",
            ));
        }

        match Url::parse(self.base_url.trim()) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            _ => {
                return Err(ConfigError::ValidationError {
                    field: "client.base_url".to_string(),
                    message: format!(
                        "Invalid base URL '{}'. Expected format: http(s)://host[:port][/path]",
                        self.base_url
                    ),
                });
            }
        }

        if self.username.is_empty() {
            return Err(ConfigError::validation(
                "client.username",
                "Username is required for authentication.",
            ));
        }

        if self.timeout == 0 {
            return Err(ConfigError::validation(
                "client.timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.connect_timeout == 0 {
            return Err(ConfigError::validation(
                "client.connect_timeout",
                "Connect timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - Log format must be one of: full, compact, json
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.client.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        Settings {
            client: ClientSettings {
                base_url: "https://notify.example.com/api".to_string(),
                username: "user".to_string(),
                password: "pass".to_string(),
                ..Default::default()
            },
            logger: LoggerSettings::default(),
        }
    }

    fn assert_invalid_field(settings: &Settings, expected: &str) {
        match settings.validate() {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, expected),
            other => panic!("Expected ValidationError for {expected}, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_settings() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_missing_base_url() {
        let mut settings = valid_settings();
        settings.client.base_url = String::new();
        assert_invalid_field(&settings, "client.base_url");
    }

    #[test]
    fn test_non_http_base_url() {
        let mut settings = valid_settings();
        settings.client.base_url = "ftp://notify.example.com".to_string();
        assert_invalid_field(&settings, "client.base_url");
    }

    #[test]
    fn test_missing_username() {
        let mut settings = valid_settings();
        settings.client.username = String::new();
        assert_invalid_field(&settings, "client.username");
    }

    #[test]
    fn test_empty_password_is_allowed() {
        let mut settings = valid_settings();
        settings.client.password = String::new();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_timeouts() {
        let mut settings = valid_settings();
        settings.client.timeout = 0;
        assert_invalid_field(&settings, "client.timeout");

        let mut settings = valid_settings();
        settings.client.connect_timeout = 0;
        assert_invalid_field(&settings, "client.connect_timeout");
    }

    #[test]
    fn test_invalid_logger_settings() {
        let mut settings = valid_settings();
        settings.logger.level = "verbose".to_string();
        assert_invalid_field(&settings, "logger.level");

        let mut settings = valid_settings();
        settings.logger.format = "xml".to_string();
        assert_invalid_field(&settings, "logger.format");
    }
}
