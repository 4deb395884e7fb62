use clap::Parser;

use notifications::NotificationClient;
use notifications::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_and_merge_config(&cli)?;
    init_logger_from_settings(&settings)?;

    let client = NotificationClient::new(settings.client.to_client_config()?)?;
    tracing::debug!(base_url = %client.base_url(), "Client ready");

    let mut stdout = std::io::stdout().lock();
    execute_command(&cli, &client, &mut stdout).await
}
