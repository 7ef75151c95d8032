//! Graphmill CLI - batch knowledge-graph extraction from cleaned documents.

use clap::Parser;
use graphmill_cli::{commands, AppConfig, Cli, Command};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> graphmill_cli::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;

    match cli.command {
        Command::Run => commands::execute_run(&config).await,
        Command::Clear => commands::execute_clear(&config).await,
        Command::Probe => commands::execute_probe(&config).await,
    }
}
