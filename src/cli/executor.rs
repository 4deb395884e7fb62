//! Command executor for dispatching CLI commands
//!
//! This module runs a parsed subcommand against the notification API and
//! prints the service's answer as pretty JSON.

use std::io::Write;

use anyhow::Context;
use serde::Serialize;

use super::parser::{Cli, Commands};
use crate::client::NotificationApi;

/// Execute a CLI command against `api`, writing the result to `out`
///
/// # Errors
/// Returns the client error (with its cause chain) when the call fails, or
/// an I/O error when the output cannot be written.
pub async fn execute_command<W: Write>(
    cli: &Cli,
    api: &dyn NotificationApi,
    out: &mut W,
) -> anyhow::Result<()> {
    cli.validate().map_err(anyhow::Error::msg)?;

    match &cli.command {
        Commands::Providers => {
            let providers = api.list_providers().await?;
            tracing::info!(count = providers.len(), "Fetched providers");
            write_json(out, &providers)
        }
        Commands::Channels => {
            let channels = api.list_channels().await?;
            tracing::info!(count = channels.len(), "Fetched channels");
            write_json(out, &channels)
        }
        Commands::Send(args) => {
            let request = args.to_request();
            let response = api.send_notification(&args.provider, &request).await?;
            tracing::info!(
                uuid = %response.uuid,
                success = response.success,
                error = response.error,
                pending = response.pending().count(),
                "Notification accepted"
            );
            write_json(out, &response)
        }
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("Failed to serialize output")?;
    writeln!(out).context("Failed to write output")?;
    out.flush().context("Failed to flush output")?;
    Ok(())
}
