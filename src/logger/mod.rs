//! Logger Module
//!
//! A logging setup based on `tracing-subscriber` with support for:
//! - Full, compact and JSON output formats
//! - Level filtering through `EnvFilter` directives
//! - Color control (only when stderr is a terminal)
//!
//! Logs go to stderr so that command output on stdout stays machine-readable.
//! The library itself only emits `tracing` events and never installs a
//! subscriber; this module is for binaries.

pub mod config;

#[cfg(test)]
mod tests;

// Re-export main types
pub use config::*;

use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global subscriber with the given configuration
///
/// # Errors
/// Returns an error if the level is invalid or a global subscriber is
/// already installed.
pub fn init_logger(config: &LoggerConfig) -> anyhow::Result<()> {
    config.validate()?;

    let filter = build_filter(&config.level);
    let use_ansi = config.colored && std::io::stderr().is_terminal();

    match config.format {
        LogFormat::Full => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_ansi(use_ansi)
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_ansi(use_ansi)
                    .with_target(true)
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
    }

    Ok(())
}

/// `RUST_LOG` wins when set; otherwise the configured level applies
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
