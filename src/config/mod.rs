//! Configuration management module for notifications-rs
//!
//! This module provides layered configuration loading with support for:
//! - A TOML configuration file
//! - Environment variable overrides
//!
//! # Configuration Priority (lowest to highest)
//! 1. Built-in defaults
//! 2. The file named by `--config` or `NOTIFICATIONS_CONFIG_FILE`
//! 3. `NOTIFICATIONS_*` environment variables

pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

// Re-export public types
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{ClientSettings, LoggerSettings, Settings};
