//! Skuport CLI
//!
//! Command-line front end for the product importer: submit a catalog CSV,
//! watch the server-side import job, cancel it.

mod commands;
mod config;
mod render;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "skuport")]
#[command(about = "Product catalog CSV import client", long_about = None)]
struct Cli {
    /// Importer API URL
    #[arg(
        long,
        env = "SKUPORT_API_URL",
        default_value = "http://localhost:5000"
    )]
    api_url: String,

    /// Seconds between progress checks
    #[arg(long, env = "SKUPORT_POLL_INTERVAL", default_value_t = 2)]
    poll_interval: u64,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skuport=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config::new(cli.api_url, cli.poll_interval, cli.timeout);
    config.validate()?;

    handle_command(cli.command, &config).await
}
