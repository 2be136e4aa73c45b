mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use maskit_config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        cli::Commands::Mask(args) => {
            let config = Config::load()?;
            commands::mask::handle(args, &config).await
        }
        cli::Commands::Init => commands::init::handle(&Config::config_path()),
    }
}
