//! Console rendering of lifecycle events
//!
//! The terminal-facing half of the import flow. It only renders; every
//! protocol decision stays in the tracker.

use colored::*;

use skuport_core::domain::event::JobEvent;
use skuport_core::domain::job::{ImportSummary, ProgressSnapshot};
use skuport_tracker::EventSink;

/// Renders lifecycle events as terminal lines
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for ConsoleSink {
    fn on_event(&self, event: &JobEvent) {
        match event {
            JobEvent::Queued { status } => {
                println!("  {} {}", "⧖".dimmed(), status.dimmed());
            }
            JobEvent::Running(snapshot) => print_progress(snapshot),
            JobEvent::Succeeded(summary) => print_summary(summary),
            JobEvent::Failed { reason } => {
                println!("{} {}", "✗ Import failed:".red().bold(), reason.red());
            }
            JobEvent::Cancelled { reason } => {
                println!("{} {}", "■".yellow(), reason.yellow());
            }
        }
    }
}

fn print_progress(snapshot: &ProgressSnapshot) {
    println!(
        "  {} {}/{} rows (created {}, updated {}, errors {})",
        format!("{:>3}%", snapshot.percent).cyan().bold(),
        snapshot.processed,
        snapshot.total,
        snapshot.created.to_string().green(),
        snapshot.updated.to_string().cyan(),
        snapshot.errors.to_string().red(),
    );
}

fn print_summary(summary: &ImportSummary) {
    println!("{}", "✓ Import complete".green().bold());
    println!("  Total:   {}", summary.total);
    println!("  Created: {}", summary.created.to_string().green());
    println!("  Updated: {}", summary.updated.to_string().cyan());
    println!("  Errors:  {}", summary.errors.to_string().red());

    if !summary.error_details.is_empty() {
        println!();
        println!("{}", "First errors:".bold());
        for line in &summary.error_details {
            println!("  {}", line.red());
        }
    }
}
