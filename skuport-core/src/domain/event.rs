//! Lifecycle events emitted by the progress poller

use serde::{Deserialize, Serialize};

use crate::domain::job::{ImportSummary, JobStatus, ProgressSnapshot};

/// One observed lifecycle transition of the tracked import
///
/// The presentation layer consumes these through a single typed callback.
/// `Succeeded`, `Failed` and `Cancelled` are terminal: once one of them is
/// emitted, no further event follows for the same job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobEvent {
    /// The job is accepted but has not started; carries the server's status text
    Queued { status: String },
    /// The job is processing rows
    Running(ProgressSnapshot),
    /// The job finished; carries the final counters
    Succeeded(ImportSummary),
    /// The job failed, or the status check itself did
    Failed { reason: String },
    /// The user cancelled the import; client-asserted, not server-confirmed
    Cancelled { reason: String },
}

impl JobEvent {
    /// The lifecycle state this event moves the job into
    pub fn status(&self) -> JobStatus {
        match self {
            Self::Queued { .. } => JobStatus::Queued,
            Self::Running(_) => JobStatus::Running,
            Self::Succeeded(_) => JobStatus::Succeeded,
            Self::Failed { .. } => JobStatus::Failed,
            Self::Cancelled { .. } => JobStatus::Cancelled,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_status_mapping() {
        let queued = JobEvent::Queued {
            status: "Pending...".to_string(),
        };
        assert_eq!(queued.status(), JobStatus::Queued);
        assert!(!queued.is_terminal());

        let failed = JobEvent::Failed {
            reason: "boom".to_string(),
        };
        assert_eq!(failed.status(), JobStatus::Failed);
        assert!(failed.is_terminal());

        let cancelled = JobEvent::Cancelled {
            reason: "stop".to_string(),
        };
        assert!(cancelled.is_terminal());
    }
}
