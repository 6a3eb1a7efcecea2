//! Skuport Tracker
//!
//! Client-side tracking of one long-running import job.
//!
//! Architecture:
//! - Poller: drives a fixed-interval status loop until a terminal state
//! - Cancellation: one-shot, client-authoritative cancel path
//! - Sink: where lifecycle events are handed to the presentation layer
//!
//! The poller owns the timer; the shared [`SharedJob`] record is mutated
//! only through `ImportJob::apply`, which keeps terminal states sticky even
//! when a poll tick and a cancellation race on a multi-threaded runtime.

mod cancel;
mod poller;
mod sink;

pub use cancel::{CANCELLED_BY_USER, CancelController, CancelError, CancelOutcome};
pub use poller::ProgressPoller;
pub use sink::EventSink;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use skuport_core::domain::job::ImportJob;

/// Spacing between status checks unless configured otherwise
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Shared handle to the single tracked job record
pub type SharedJob = Arc<Mutex<ImportJob>>;

/// Wraps a job record for sharing between the poller and the cancellation path
pub fn share(job: ImportJob) -> SharedJob {
    Arc::new(Mutex::new(job))
}
