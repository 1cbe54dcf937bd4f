mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use restomod_config::Config;

use crate::commands::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        // Works even when the config file is unreadable
        cli::Commands::Config(cmd) => commands::config::handle(cmd),
        command => {
            let ctx = AppContext::new(Config::load()?, cli.api_url, cli.json)?;
            commands::run(&ctx, command).await
        }
    }
}
