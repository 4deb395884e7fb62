//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::logger::LogFormat;
use crate::models::{ContentType, NotificationRequest};

/// Command-line client for the notification service
#[derive(Parser, Debug)]
#[command(name = "notifications")]
#[command(about = "Command-line client for the notification service")]
#[command(long_about = "
Lists the providers and channels a notification service offers and sends
notifications through a chosen provider. Results are printed as JSON on
stdout; logs go to stderr.

EXAMPLES:
    # List providers using a configuration file
    notifications --config notifications.toml providers

    # List channels, credentials from the environment
    NOTIFICATIONS_CLIENT__BASE_URL=https://notify.example.com/api \\
    NOTIFICATIONS_CLIENT__USERNAME=svc \\
    NOTIFICATIONS_CLIENT__PASSWORD=secret \\
    notifications channels

    # Send an SMS to two recipients
    notifications send --provider sms-gw -r +15551234567 -r +15557654321 -m 'Hello'

    # Send an HTML email with a subject
    notifications send --provider smtp -r user@example.com -m '<b>Hi</b>' \\
        --subject 'Greetings' --content-type html
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// TOML file with [client] and [logger] sections. Environment variables
    /// prefixed with NOTIFICATIONS_ override values from the file.
    ///
    /// Example: --config /etc/notifications/client.toml
    #[arg(short, long, value_name = "FILE", global = true, value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Base URL of the notification API
    #[arg(long, value_name = "URL", global = true, env = "NOTIFICATIONS_CLIENT__BASE_URL")]
    pub base_url: Option<String>,

    /// Username for basic authentication
    #[arg(long, global = true, env = "NOTIFICATIONS_CLIENT__USERNAME")]
    pub username: Option<String>,

    /// Password for basic authentication
    ///
    /// Prefer NOTIFICATIONS_CLIENT__PASSWORD to keep it out of shell history.
    #[arg(long, global = true, env = "NOTIFICATIONS_CLIENT__PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Enable verbose logging
    ///
    /// Increases log output to debug level, including each HTTP round trip.
    /// Cannot be used with --quiet.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Reduces log output to error level only.
    /// Cannot be used with --verbose.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormatArg>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the delivery providers configured on the service
    Providers,

    /// List the delivery channels known to the service
    Channels,

    /// Send a notification through a provider
    ///
    /// Examples:
    ///   notifications send --provider sms-gw -r +15551234567 -m 'Hello'
    ///   notifications send --provider smtp -r a@example.com -m 'Hi' --subject 'Hello'
    Send(SendArgs),
}

/// Arguments of the `send` subcommand
#[derive(Args, Debug, Clone)]
pub struct SendArgs {
    /// Provider id to send through (see `providers`)
    #[arg(short = 'P', long)]
    pub provider: String,

    /// Recipient address; repeat for several recipients
    #[arg(short, long = "recipient", value_name = "ADDRESS", required = true)]
    pub recipients: Vec<String>,

    /// Message body
    #[arg(short, long, value_name = "TEXT")]
    pub message: String,

    /// External id echoed back in the response
    #[arg(long)]
    pub id: Option<String>,

    /// Provider option as KEY=VALUE; repeatable. Prefix the key with
    /// `provider__` to scope it to one provider.
    #[arg(short, long = "option", value_name = "KEY=VALUE", value_parser = super::validation::parse_key_value)]
    pub options: Vec<(String, String)>,

    /// Channel field as KEY=VALUE; repeatable
    #[arg(short, long = "field", value_name = "KEY=VALUE", value_parser = super::validation::parse_key_value)]
    pub fields: Vec<(String, String)>,

    /// Message subject (email)
    #[arg(long)]
    pub subject: Option<String>,

    /// Payload content type: text, html or markdown
    #[arg(long, value_name = "TYPE")]
    pub content_type: Option<String>,
}

impl SendArgs {
    /// Builds the request described by the arguments.
    ///
    /// Values are not checked here; the client validates the request before
    /// sending it.
    pub fn to_request(&self) -> NotificationRequest {
        let mut request = NotificationRequest::new(self.recipients.iter().cloned(), &self.message);

        if let Some(id) = &self.id {
            request = request.with_id(id);
        }
        for (key, value) in &self.options {
            request = request.with_option(key, value);
        }
        for (key, value) in &self.fields {
            request = request.with_field(key, value);
        }
        if let Some(subject) = &self.subject {
            request = request.with_subject(subject);
        }
        if let Some(content_type) = &self.content_type {
            request = request.with_content_type(ContentType::from(content_type.as_str()));
        }

        request
    }
}

/// Log format values accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormatArg {
    Full,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Full => LogFormat::Full,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

impl Cli {
    /// Validate CLI arguments for logical consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet flags simultaneously".to_string());
        }
        Ok(())
    }

    /// Log level implied by --verbose / --quiet, if any
    pub fn log_level_override(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FIELD_CONTENT_TYPE, FIELD_SUBJECT};
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_connection_flags_read_from_env() {
        let command = Cli::command();
        let env_of = |id: &str| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .map(|name| name.to_string_lossy().into_owned())
        };

        assert_eq!(env_of("base_url").as_deref(), Some("NOTIFICATIONS_CLIENT__BASE_URL"));
        assert_eq!(env_of("username").as_deref(), Some("NOTIFICATIONS_CLIENT__USERNAME"));
        assert_eq!(env_of("password").as_deref(), Some("NOTIFICATIONS_CLIENT__PASSWORD"));
    }

    #[test]
    fn test_parse_providers() {
        let cli = Cli::try_parse_from(["notifications", "providers"]).unwrap();
        assert!(matches!(cli.command, Commands::Providers));
        assert!(cli.log_level_override().is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "notifications",
            "channels",
            "--base-url",
            "http://localhost:3000",
            "--username",
            "svc",
            "--verbose",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Channels));
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:3000"));
        assert_eq!(cli.username.as_deref(), Some("svc"));
        assert_eq!(cli.log_level_override(), Some("debug"));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = Cli::try_parse_from(["notifications", "-v", "-q", "providers"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_send() {
        let cli = Cli::try_parse_from([
            "notifications",
            "send",
            "--provider",
            "smtp",
            "-r",
            "a@example.com",
            "-r",
            "b@example.com",
            "-m",
            "Hello",
            "--id",
            "ext-1",
            "-o",
            "smtp__from=noreply@example.com",
            "--field",
            "priority=high",
            "--subject",
            "Greetings",
            "--content-type",
            "html",
        ])
        .unwrap();

        let Commands::Send(args) = cli.command else {
            panic!("Expected send command");
        };
        let request = args.to_request();

        assert_eq!(request.recipients, vec!["a@example.com", "b@example.com"]);
        assert_eq!(request.payload, "Hello");
        assert_eq!(request.id.as_deref(), Some("ext-1"));
        assert_eq!(request.options["smtp__from"], "noreply@example.com");
        assert_eq!(request.fields["priority"], "high");
        assert_eq!(request.fields[FIELD_SUBJECT], "Greetings");
        assert_eq!(request.fields[FIELD_CONTENT_TYPE], "html");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_send_requires_recipient() {
        let result =
            Cli::try_parse_from(["notifications", "send", "--provider", "sms-gw", "-m", "hi"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_send_rejects_malformed_option() {
        let result = Cli::try_parse_from([
            "notifications",
            "send",
            "--provider",
            "sms-gw",
            "-r",
            "+15551234567",
            "-m",
            "hi",
            "-o",
            "no-equals-sign",
        ]);
        assert!(result.is_err());
    }
}
