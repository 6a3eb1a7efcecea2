//! Cancellation controller
//!
//! Sends the one-shot cancel request and forces the tracked job into the
//! `Cancelled` state. Cancellation is advisory to the server but
//! authoritative to the client: once it succeeds, the poller is torn down
//! and no later status report can override the outcome.

use std::sync::Arc;

use thiserror::Error;
use tokio::task::AbortHandle;
use tracing::info;

use skuport_client::{ClientError, ImporterApi};
use skuport_core::domain::event::JobEvent;

use crate::{EventSink, SharedJob};

/// Message attached to the client-asserted terminal state
pub const CANCELLED_BY_USER: &str = "Import cancelled by user";

/// Outcome of a cancellation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The server accepted the request and the job is now `Cancelled`
    Cancelled,
    /// Nothing to cancel: the job already reached a terminal state
    NoActiveJob,
}

/// Errors from the cancellation path
#[derive(Debug, Error)]
pub enum CancelError {
    /// The cancel request was rejected or never reached the server; the
    /// poller keeps running
    #[error("cancellation failed: {0}")]
    Request(#[from] ClientError),
}

/// One-shot cancellation for the tracked job
pub struct CancelController<A: ?Sized> {
    api: Arc<A>,
    job: SharedJob,
    sink: Arc<dyn EventSink>,
    poller: AbortHandle,
}

impl<A> CancelController<A>
where
    A: ImporterApi + ?Sized,
{
    pub fn new(api: Arc<A>, job: SharedJob, sink: Arc<dyn EventSink>, poller: AbortHandle) -> Self {
        Self {
            api,
            job,
            sink,
            poller,
        }
    }

    /// Requests cancellation of the tracked job.
    ///
    /// A job that already reached a terminal state is left untouched and no
    /// request is sent. On an accepted request the poller is stopped first,
    /// then the `Cancelled` event is forced through the job record; a poll
    /// result that slipped in between cannot be overridden, and in that case
    /// no second terminal event is emitted.
    pub async fn cancel(&self) -> Result<CancelOutcome, CancelError> {
        let task_id = {
            let job = self.job.lock().await;
            if job.is_terminal() {
                return Ok(CancelOutcome::NoActiveJob);
            }
            job.task_id.clone()
        };

        self.api.cancel(&task_id).await?;

        self.poller.abort();

        let event = JobEvent::Cancelled {
            reason: CANCELLED_BY_USER.to_string(),
        };
        let applied = self.job.lock().await.apply(&event);
        if !applied {
            // The poller beat us to a terminal state between the check and
            // the request; the cancel degenerates to a no-op.
            return Ok(CancelOutcome::NoActiveJob);
        }

        info!("Import {} cancelled", task_id);
        self.sink.on_event(&event);

        Ok(CancelOutcome::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CollectingSink, ScriptedApi, progressing, success};
    use crate::{ProgressPoller, share};

    use std::time::Duration;
    use tokio::time;

    use skuport_core::domain::job::{ImportJob, ImportSummary, JobStatus, TaskId};

    const TICK: Duration = Duration::from_millis(10);

    fn tracked_job() -> ImportJob {
        ImportJob::new(TaskId::new("t1"), "products.csv")
    }

    fn long_running_script() -> Vec<skuport_client::Result<skuport_core::dto::import::ProgressReport>>
    {
        (1..=1000).map(|n| Ok(progressing(n, 1000))).collect()
    }

    #[tokio::test]
    async fn test_cancel_mid_running() {
        let api = Arc::new(ScriptedApi::new(long_running_script()));
        let job = share(tracked_job());
        let sink = Arc::new(CollectingSink::new());

        let mut poller = ProgressPoller::start(api.clone(), job.clone(), sink.clone(), TICK);
        let controller =
            CancelController::new(api.clone(), job.clone(), sink.clone(), poller.abort_handle());

        // Let a few Running events through first.
        time::sleep(TICK * 3).await;

        let outcome = controller.cancel().await.expect("cancel should succeed");
        assert_eq!(outcome, CancelOutcome::Cancelled);
        assert_eq!(api.cancel_count(), 1);

        poller.wait().await;
        let polls_after_cancel = api.progress_count();
        time::sleep(TICK * 5).await;
        assert_eq!(api.progress_count(), polls_after_cancel);

        let events = sink.events();
        assert_eq!(
            events.last(),
            Some(&JobEvent::Cancelled {
                reason: "Import cancelled by user".to_string()
            })
        );
        assert_eq!(sink.terminal_count(), 1);
        assert_eq!(job.lock().await.status, JobStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_cancel_after_terminal_is_noop() {
        let api = Arc::new(ScriptedApi::new(vec![Ok(success(
            ImportSummary::default(),
        ))]));
        let job = share(tracked_job());
        let sink = Arc::new(CollectingSink::new());

        let mut poller = ProgressPoller::start(api.clone(), job.clone(), sink.clone(), TICK);
        let controller =
            CancelController::new(api.clone(), job.clone(), sink.clone(), poller.abort_handle());
        poller.wait().await;

        let outcome = controller.cancel().await.expect("no-op should not error");
        assert_eq!(outcome, CancelOutcome::NoActiveJob);

        // No request was sent and no second terminal event was emitted.
        assert_eq!(api.cancel_count(), 0);
        assert_eq!(sink.terminal_count(), 1);
        assert_eq!(job.lock().await.status, JobStatus::Succeeded);
    }

    #[tokio::test]
    async fn test_cancel_failure_leaves_poller_running() {
        let api = Arc::new(ScriptedApi::failing_cancel(long_running_script()));
        let job = share(tracked_job());
        let sink = Arc::new(CollectingSink::new());

        let mut poller = ProgressPoller::start(api.clone(), job.clone(), sink.clone(), TICK);
        let controller =
            CancelController::new(api.clone(), job.clone(), sink.clone(), poller.abort_handle());

        time::sleep(TICK * 2).await;

        let result = controller.cancel().await;
        assert!(matches!(
            result,
            Err(CancelError::Request(ClientError::Api { status: 500, .. }))
        ));

        // Cancellation did not take effect: polling continues and the job
        // stays live.
        let before = api.progress_count();
        time::sleep(TICK * 5).await;
        assert!(api.progress_count() > before);
        assert_eq!(sink.terminal_count(), 0);
        assert_eq!(job.lock().await.status, JobStatus::Running);

        poller.stop();
        poller.wait().await;
    }
}
