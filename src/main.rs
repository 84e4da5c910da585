use clap::Parser;
use std::sync::Arc;
use tracing::info;
use weaviate_spy::{
    api::{HttpClient, SpyApi},
    cli::{self, Cli, Command},
    config::Config,
    utils::logger,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Load configuration
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(api_url) = args.api_url {
        config.api_url = api_url;
        config.validate()?;
    }

    let client = HttpClient::from_config(&config)?;
    let command = args.command.unwrap_or(Command::Tui);

    if command == Command::Tui {
        // The terminal belongs to the UI, so logs go to a file
        let _guard = logger::init_tui_logging(&config)?;
        info!(api_url = %config.api_url, "Configuration loaded");
        let api: Arc<dyn SpyApi> = Arc::new(client);
        return weaviate_spy::tui::run(config, api).await;
    }

    logger::init_cli_logging(&config);
    info!(api_url = %config.api_url, "Configuration loaded");
    cli::execute(command, &config, &client).await
}
