//! CLI command definitions and dispatch

mod import;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level commands
#[derive(Subcommand)]
pub enum Commands {
    /// Upload a CSV and watch the import to completion
    Upload {
        /// Path to the CSV file
        file: std::path::PathBuf,

        /// Skip the cancellation confirmation prompt on Ctrl-C
        #[arg(long)]
        yes: bool,
    },
    /// Watch an already-submitted import
    Watch {
        /// Task id returned at upload time
        task_id: String,

        /// Skip the cancellation confirmation prompt on Ctrl-C
        #[arg(long)]
        yes: bool,
    },
    /// Check an import's status once
    Status {
        /// Task id returned at upload time
        task_id: String,

        /// Print the raw progress report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Cancel an import
    Cancel {
        /// Task id returned at upload time
        task_id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Handle commands
///
/// Routes subcommands to their respective handlers.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Upload { file, yes } => import::upload(config, &file, yes).await,
        Commands::Watch { task_id, yes } => import::watch(config, task_id, yes).await,
        Commands::Status { task_id, json } => import::status(config, task_id, json).await,
        Commands::Cancel { task_id, yes } => import::cancel(config, task_id, yes).await,
    }
}
