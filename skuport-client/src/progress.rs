//! Progress endpoint

use crate::ImporterClient;
use crate::error::Result;
use skuport_core::domain::job::TaskId;
use skuport_core::dto::import::ProgressReport;

impl ImporterClient {
    /// Fetch the raw status of an import job
    ///
    /// Classification into a lifecycle event is the caller's business; this
    /// method only speaks the wire.
    pub async fn progress(&self, task_id: &TaskId) -> Result<ProgressReport> {
        let url = format!("{}/api/progress/{}", self.base_url, task_id);
        let response = self.client.get(&url).send().await?;

        self.handle_json_response(response).await
    }
}
