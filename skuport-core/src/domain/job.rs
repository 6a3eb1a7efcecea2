//! Import job domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::event::JobEvent;

/// Opaque identifier for one server-side import run
///
/// Assigned by the job engine at submission time and immutable for the job's
/// lifetime. The client never inspects its contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state of an import job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Queued,
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

impl JobStatus {
    /// Terminal states admit no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Cancelled)
    }
}

/// Point-in-time progress of a running import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Completion percentage in [0, 100]
    pub percent: u8,
    pub processed: u64,
    pub total: u64,
    pub created: u64,
    pub updated: u64,
    pub errors: u64,
}

/// Final counters reported by the job engine on success
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub processed: u64,
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub updated: u64,
    #[serde(default)]
    pub errors: u64,
    /// First few row-level error messages, as reported by the engine
    #[serde(default)]
    pub error_details: Vec<String>,
}

/// Client-side record of the single tracked import run
///
/// Created the instant submission succeeds, mutated only through
/// [`apply`](Self::apply), discarded when a new job replaces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportJob {
    pub task_id: TaskId,
    /// Original filename; unknown when attaching to a job submitted elsewhere
    pub file_name: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub status: JobStatus,
    /// Present only while `Running`
    pub progress: Option<ProgressSnapshot>,
    /// Present only once `Succeeded`
    pub result: Option<ImportSummary>,
    /// Present only once `Failed` or `Cancelled`
    pub failure_reason: Option<String>,
}

impl ImportJob {
    /// Record for a job this client just submitted
    pub fn new(task_id: TaskId, file_name: impl Into<String>) -> Self {
        Self {
            task_id,
            file_name: Some(file_name.into()),
            submitted_at: Utc::now(),
            status: JobStatus::Queued,
            progress: None,
            result: None,
            failure_reason: None,
        }
    }

    /// Record for a job submitted elsewhere; only the task id is known
    pub fn attach(task_id: TaskId) -> Self {
        Self {
            task_id,
            file_name: None,
            submitted_at: Utc::now(),
            status: JobStatus::Queued,
            progress: None,
            result: None,
            failure_reason: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Applies a lifecycle event to the record.
    ///
    /// Returns `false` when the event must not take effect: the job already
    /// reached a terminal state, or the event would move the lifecycle
    /// backwards (`Running` back to `Queued`). Callers emit an event only
    /// when it applied, which makes "no second terminal event" structural.
    pub fn apply(&mut self, event: &JobEvent) -> bool {
        if self.status.is_terminal() {
            return false;
        }

        match event {
            JobEvent::Queued { .. } => {
                if self.status == JobStatus::Running {
                    return false;
                }
                self.status = JobStatus::Queued;
            }
            JobEvent::Running(snapshot) => {
                self.status = JobStatus::Running;
                self.progress = Some(*snapshot);
            }
            JobEvent::Succeeded(summary) => {
                self.status = JobStatus::Succeeded;
                self.result = Some(summary.clone());
                self.progress = None;
            }
            JobEvent::Failed { reason } => {
                self.status = JobStatus::Failed;
                self.failure_reason = Some(reason.clone());
                self.progress = None;
            }
            JobEvent::Cancelled { reason } => {
                self.status = JobStatus::Cancelled;
                self.failure_reason = Some(reason.clone());
                self.progress = None;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(percent: u8, processed: u64) -> ProgressSnapshot {
        ProgressSnapshot {
            percent,
            processed,
            total: 100,
            created: 0,
            updated: 0,
            errors: 0,
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(!JobStatus::Queued.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Succeeded.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(JobStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_apply_progress_updates_record() {
        let mut job = ImportJob::new(TaskId::new("t1"), "products.csv");

        assert!(job.apply(&JobEvent::Running(snapshot(10, 10))));
        assert_eq!(job.status, JobStatus::Running);
        assert_eq!(job.progress, Some(snapshot(10, 10)));

        assert!(job.apply(&JobEvent::Running(snapshot(40, 40))));
        assert_eq!(job.progress, Some(snapshot(40, 40)));
    }

    #[test]
    fn test_apply_refuses_backward_move() {
        let mut job = ImportJob::new(TaskId::new("t1"), "products.csv");
        assert!(job.apply(&JobEvent::Running(snapshot(10, 10))));

        assert!(!job.apply(&JobEvent::Queued {
            status: "Pending...".to_string()
        }));
        assert_eq!(job.status, JobStatus::Running);
    }

    #[test]
    fn test_apply_success_is_sticky() {
        let mut job = ImportJob::new(TaskId::new("t1"), "products.csv");
        assert!(job.apply(&JobEvent::Succeeded(ImportSummary::default())));
        assert_eq!(job.status, JobStatus::Succeeded);
        assert!(job.result.is_some());
        assert!(job.progress.is_none());

        // No transition ever leaves a terminal state.
        assert!(!job.apply(&JobEvent::Running(snapshot(50, 50))));
        assert!(!job.apply(&JobEvent::Failed {
            reason: "late failure".to_string()
        }));
        assert!(!job.apply(&JobEvent::Cancelled {
            reason: "late cancel".to_string()
        }));
        assert_eq!(job.status, JobStatus::Succeeded);
    }

    #[test]
    fn test_apply_cancelled_records_reason() {
        let mut job = ImportJob::new(TaskId::new("t1"), "products.csv");
        assert!(job.apply(&JobEvent::Running(snapshot(10, 10))));
        assert!(job.apply(&JobEvent::Cancelled {
            reason: "Import cancelled by user".to_string()
        }));

        assert_eq!(job.status, JobStatus::Cancelled);
        assert_eq!(
            job.failure_reason.as_deref(),
            Some("Import cancelled by user")
        );
        assert!(job.progress.is_none());

        // A poll result that was in flight cannot override the cancellation.
        assert!(!job.apply(&JobEvent::Succeeded(ImportSummary::default())));
        assert_eq!(job.status, JobStatus::Cancelled);
    }

    #[test]
    fn test_attach_has_no_file_name() {
        let job = ImportJob::attach(TaskId::new("t2"));
        assert_eq!(job.file_name, None);
        assert_eq!(job.status, JobStatus::Queued);
    }
}
