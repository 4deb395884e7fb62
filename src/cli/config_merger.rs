//! Configuration merger for CLI arguments and config files
//!
//! This module handles merging CLI argument overrides with file and
//! environment configuration, implementing the configuration precedence logic.

use std::path::Path;

use super::parser::Cli;
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};

/// Configuration merger that handles CLI argument integration with loaded configuration
///
/// CLI arguments override values from the configuration file and environment.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    /// Create a new configuration merger with base configuration
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Create a configuration merger by loading configuration from the
    /// specified path, or from `NOTIFICATIONS_CONFIG_FILE` when none is given
    ///
    /// The loaded configuration is not validated yet; CLI overrides may still
    /// supply required values.
    ///
    /// # Errors
    /// Returns ConfigError if the file is missing or cannot be parsed
    pub fn from_config_path(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new();
        if let Some(path) = config_path {
            loader = loader.with_file(path);
        }

        Ok(Self::new(loader.load_unvalidated()?))
    }

    /// Merge CLI arguments with the base configuration
    ///
    /// # Returns
    /// A new, validated Settings instance with CLI overrides applied
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if let Some(base_url) = &cli.base_url {
            config.client.base_url = base_url.clone();
        }
        if let Some(username) = &cli.username {
            config.client.username = username.clone();
        }
        if let Some(password) = &cli.password {
            config.client.password = password.clone();
        }
        if let Some(level) = cli.log_level_override() {
            config.logger.level = level.to_string();
        }
        if let Some(format) = cli.log_format {
            config.logger.format = crate::logger::LogFormat::from(format).as_str().to_string();
        }

        config.validate()?;

        Ok(config)
    }
}
