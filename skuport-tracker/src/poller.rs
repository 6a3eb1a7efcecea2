//! Progress poller
//!
//! Polls the importer API for the tracked job's status on a fixed interval
//! and emits one lifecycle event per tick. The first check fires
//! immediately; ticks are strictly sequential, so a new request is never
//! issued while the previous one is still being handled.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use skuport_client::ImporterApi;
use skuport_core::domain::event::JobEvent;

use crate::{EventSink, SharedJob};

/// Fixed-interval status poller for one import job
///
/// The polling task ends on its own at the first terminal outcome; the
/// interval timer dies with it. Dropping the poller detaches the task
/// without stopping it, so hold on to it (or its abort handle) for the
/// job's lifetime.
pub struct ProgressPoller {
    handle: Option<JoinHandle<()>>,
    abort: AbortHandle,
}

impl ProgressPoller {
    /// Starts polling: once immediately, then every `interval`
    pub fn start<A>(
        api: Arc<A>,
        job: SharedJob,
        sink: Arc<dyn EventSink>,
        interval: Duration,
    ) -> Self
    where
        A: ImporterApi + ?Sized + 'static,
    {
        let handle = tokio::spawn(Self::run(api, job, sink, interval));
        let abort = handle.abort_handle();
        Self {
            handle: Some(handle),
            abort,
        }
    }

    /// Handle the cancellation path uses to tear the timer down
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    /// Stops polling; safe to call when not running or already stopped
    pub fn stop(&mut self) {
        self.abort.abort();
    }

    /// Waits until the polling task has ended (terminal event or stop)
    pub async fn wait(&mut self) {
        if let Some(handle) = &mut self.handle {
            let _ = handle.await;
            self.handle = None;
        }
    }

    async fn run<A>(api: Arc<A>, job: SharedJob, sink: Arc<dyn EventSink>, interval: Duration)
    where
        A: ImporterApi + ?Sized + 'static,
    {
        let task_id = job.lock().await.task_id.clone();
        info!("Tracking import {} (interval: {:?})", task_id, interval);

        let mut ticker = time::interval(interval);
        // One in-flight request at a time: a slow response delays the next
        // tick instead of letting missed ticks burst.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut last_processed: Option<u64> = None;

        loop {
            ticker.tick().await;

            debug!("Checking progress of import {}", task_id);

            let event = match api.progress(&task_id).await {
                Ok(report) => report.into_event(),
                // A single failed check is terminal; there is no retry budget.
                Err(e) => JobEvent::Failed {
                    reason: format!("Failed to get progress: {}", e),
                },
            };

            if let JobEvent::Running(snapshot) = &event {
                if let Some(previous) = last_processed {
                    if snapshot.processed < previous {
                        warn!(
                            "Import {} reported {} processed rows after {}",
                            task_id, snapshot.processed, previous
                        );
                    }
                }
                last_processed = Some(snapshot.processed);
            }

            let (applied, status) = {
                let mut job = job.lock().await;
                let applied = job.apply(&event);
                (applied, job.status)
            };

            if applied {
                sink.on_event(&event);
            }

            if status.is_terminal() {
                info!("Import {} finished: {:?}", task_id, status);
                break;
            }
        }
    }
}
