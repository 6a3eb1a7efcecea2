//! Import protocol DTOs
//!
//! Shapes of the three importer endpoints: upload acknowledgement, progress
//! report, and the error body rejected requests carry. Classification of a
//! raw progress report into a [`JobEvent`] lives here as well, next to the
//! wire type it interprets.

use serde::{Deserialize, Serialize};

use crate::domain::event::JobEvent;
use crate::domain::job::{ImportSummary, ProgressSnapshot, TaskId};

/// Acknowledgement returned by `POST /api/upload`
///
/// The server enqueues the import and answers immediately; the job runs on
/// independently of this request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadAccepted {
    pub task_id: TaskId,
}

/// Error body the server attaches to rejected requests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

impl ApiErrorBody {
    /// Best human-readable message in the body, if any
    pub fn message(&self) -> Option<&str> {
        self.error.as_deref().or(self.details.as_deref())
    }
}

/// Raw status payload from `GET /api/progress/{task_id}`
///
/// `state` is a free string; counters are absent early in a job's life and
/// default to zero. `result` is only populated on `"SUCCESS"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub state: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub current: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub updated: u64,
    #[serde(default)]
    pub errors: u64,
    #[serde(default)]
    pub result: Option<ImportSummary>,
}

impl ProgressReport {
    /// Classifies the raw payload into a lifecycle event.
    ///
    /// Any state other than `PENDING`, `PROGRESS` or `SUCCESS` is reported
    /// as a failure carrying the server's `status` text. The wire does not
    /// distinguish unknown states from failed ones, so neither does the
    /// client; tightening this requires tightening the server contract
    /// first.
    pub fn into_event(self) -> JobEvent {
        match self.state.as_str() {
            "PENDING" => JobEvent::Queued {
                status: self.status_text(),
            },
            "PROGRESS" => JobEvent::Running(ProgressSnapshot {
                percent: percent(self.current, self.total),
                processed: self.current,
                total: self.total,
                created: self.created,
                updated: self.updated,
                errors: self.errors,
            }),
            "SUCCESS" => match self.result {
                Some(summary) => JobEvent::Succeeded(summary),
                // The wire contract requires a result on success; treat its
                // absence as a malformed terminal report.
                None => JobEvent::Failed {
                    reason: "import finished without a result payload".to_string(),
                },
            },
            _ => JobEvent::Failed {
                reason: self.status_text(),
            },
        }
    }

    fn status_text(&self) -> String {
        self.status
            .clone()
            .unwrap_or_else(|| self.state.clone())
    }
}

/// Completion percentage, rounded, with the zero-total guard, clamped to
/// [0, 100]
pub fn percent(current: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (current as f64 / total as f64 * 100.0).round();
    pct.min(100.0) as u8
}
