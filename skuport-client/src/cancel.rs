//! Cancellation endpoint

use crate::ImporterClient;
use crate::error::Result;
use skuport_core::domain::job::TaskId;

impl ImporterClient {
    /// Request cancellation of an import job
    ///
    /// Best-effort on the server side: a 2xx only acknowledges the request,
    /// it does not mean the job has already stopped.
    pub async fn cancel(&self, task_id: &TaskId) -> Result<()> {
        let url = format!("{}/api/cancel/{}", self.base_url, task_id);
        let response = self.client.post(&url).send().await?;

        self.handle_empty_response(response).await
    }
}
