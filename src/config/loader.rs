//! Configuration loader for notifications-rs
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable naming a configuration file
const CONFIG_FILE_ENV: &str = "NOTIFICATIONS_CONFIG_FILE";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "NOTIFICATIONS";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

type Builder = config::ConfigBuilder<config::builder::DefaultState>;

/// Configuration loader that handles layered configuration loading
///
/// The loader supports the following configuration sources (in order of priority):
/// 1. Built-in defaults
/// 2. A TOML configuration file (optional; required to exist when named)
/// 3. `NOTIFICATIONS_*` environment variables (highest priority)
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Configuration file path
    config_file: Option<PathBuf>,
    /// Replaces the process environment as the env source
    env_vars: Option<Vec<(String, String)>>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    ///
    /// Reads `NOTIFICATIONS_CONFIG_FILE` to find an optional configuration file.
    pub fn new() -> Self {
        Self {
            config_file: std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from),
            env_vars: None,
        }
    }

    /// Use a specific configuration file, overriding `NOTIFICATIONS_CONFIG_FILE`
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Read overrides from the given variables instead of the process environment
    pub fn with_env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Get the configuration file path, if any
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Load and validate configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The named configuration file does not exist
    /// - Configuration parsing fails
    /// - Configuration validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings = self.load_unvalidated()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration without validating it, for callers that apply
    /// further overrides first
    pub fn load_unvalidated(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })
    }

    /// Build the config::Config instance from all sources
    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref config_file) => Self::add_file_source(builder, config_file)?,
            None => builder,
        };

        // Environment variables are case-insensitive and converted to lowercase
        // NOTIFICATIONS_CLIENT__BASE_URL -> client.base_url
        let builder = self.add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    /// Add a required TOML file source to the config builder
    fn add_file_source(builder: Builder, path: &Path) -> Result<Builder, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(
            File::new(path.to_str().unwrap_or_default(), FileFormat::Toml).required(true),
        ))
    }

    /// Add environment variable source to the config builder
    ///
    /// Values stay strings; numeric and boolean settings are converted during
    /// deserialization, so credentials that look like numbers are not mangled.
    ///
    /// Examples:
    /// - `NOTIFICATIONS_CLIENT__BASE_URL` -> `client.base_url`
    /// - `NOTIFICATIONS_LOGGER__LEVEL` -> `logger.level`
    fn add_env_source(&self, builder: Builder) -> Builder {
        let mut env = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator(ENV_SEPARATOR)
            .ignore_empty(true);

        if let Some(vars) = &self.env_vars {
            env = env.source(Some(vars.iter().cloned().collect()));
        }

        builder.add_source(env)
    }
}
