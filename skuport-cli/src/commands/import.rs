//! Import command handlers
//!
//! Submission, watching, one-shot status checks and cancellation of catalog
//! imports.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::*;
use tokio::signal;

use skuport_client::ImporterClient;
use skuport_core::domain::job::{ImportJob, TaskId};
use skuport_tracker::{CancelController, CancelOutcome, ProgressPoller, share};

use crate::config::Config;
use crate::render::ConsoleSink;

const CONFIRM_CANCEL: &str = "Are you sure you want to stop the import? This cannot be undone.";

fn build_client(config: &Config) -> Result<ImporterClient> {
    let http = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("Failed to build HTTP client")?;
    Ok(ImporterClient::with_client(&config.api_url, http))
}

/// Upload a CSV and watch the resulting job to completion
pub async fn upload(config: &Config, file: &Path, yes: bool) -> Result<()> {
    let client = Arc::new(build_client(config)?);

    println!("{}", format!("Uploading {}...", file.display()).bold());
    let accepted = client.submit_file(file).await?;
    println!("  Task: {}", accepted.task_id.to_string().cyan());

    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let job = ImportJob::new(accepted.task_id, file_name);

    track(config, client, job, yes).await
}

/// Attach to a job submitted earlier and watch it
pub async fn watch(config: &Config, task_id: String, yes: bool) -> Result<()> {
    let client = Arc::new(build_client(config)?);
    let job = ImportJob::attach(TaskId::new(task_id));

    track(config, client, job, yes).await
}

/// Check an import's status once
pub async fn status(config: &Config, task_id: String, json: bool) -> Result<()> {
    use skuport_tracker::EventSink;

    let client = build_client(config)?;
    let report = client.progress(&TaskId::new(task_id)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        ConsoleSink::new().on_event(&report.into_event());
    }

    Ok(())
}

/// Ask the server to cancel an import
pub async fn cancel(config: &Config, task_id: String, yes: bool) -> Result<()> {
    if !yes && !confirm(CONFIRM_CANCEL)? {
        println!("{}", "Aborted.".dimmed());
        return Ok(());
    }

    let client = build_client(config)?;
    client.cancel(&TaskId::new(task_id)).await?;
    println!("{}", "Cancellation requested.".yellow());

    Ok(())
}

/// Drives the poller to a terminal state, offering cancellation on Ctrl-C
async fn track(config: &Config, client: Arc<ImporterClient>, job: ImportJob, yes: bool) -> Result<()> {
    let shared = share(job);
    let sink: Arc<ConsoleSink> = Arc::new(ConsoleSink::new());

    let mut poller = ProgressPoller::start(
        client.clone(),
        shared.clone(),
        sink.clone(),
        config.poll_interval,
    );
    let controller = CancelController::new(client, shared, sink, poller.abort_handle());

    loop {
        tokio::select! {
            _ = poller.wait() => break,
            _ = signal::ctrl_c() => {
                if yes || confirm(CONFIRM_CANCEL)? {
                    match controller.cancel().await {
                        Ok(CancelOutcome::Cancelled) => {}
                        Ok(CancelOutcome::NoActiveJob) => break,
                        Err(e) => {
                            eprintln!("{}", format!("Failed to cancel import: {}", e).red());
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

/// Prompt for a yes/no answer on stdin
fn confirm(question: &str) -> Result<bool> {
    use std::io::Write;

    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;

    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
