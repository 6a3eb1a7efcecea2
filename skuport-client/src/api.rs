//! The importer API as a trait
//!
//! The tracker drives its polling loop through this seam, so it can run
//! against scripted fakes in tests and against [`ImporterClient`] in
//! production.

use async_trait::async_trait;

use crate::ImporterClient;
use crate::error::Result;
use skuport_core::domain::job::TaskId;
use skuport_core::dto::import::{ProgressReport, UploadAccepted};

/// Operations the import protocol needs from the server
#[async_trait]
pub trait ImporterApi: Send + Sync {
    /// Submit CSV content and obtain the job's task id
    async fn submit(&self, file_name: String, content: Vec<u8>) -> Result<UploadAccepted>;

    /// Fetch the raw status of a job
    async fn progress(&self, task_id: &TaskId) -> Result<ProgressReport>;

    /// Request cancellation of a job
    async fn cancel(&self, task_id: &TaskId) -> Result<()>;
}

#[async_trait]
impl ImporterApi for ImporterClient {
    async fn submit(&self, file_name: String, content: Vec<u8>) -> Result<UploadAccepted> {
        self.submit_bytes(file_name, content).await
    }

    async fn progress(&self, task_id: &TaskId) -> Result<ProgressReport> {
        ImporterClient::progress(self, task_id).await
    }

    async fn cancel(&self, task_id: &TaskId) -> Result<()> {
        ImporterClient::cancel(self, task_id).await
    }
}
