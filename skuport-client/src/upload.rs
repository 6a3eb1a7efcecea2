//! Upload endpoint: turning a local CSV into a started import job

use std::path::Path;

use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::ImporterClient;
use crate::error::{ClientError, Result};
use skuport_core::dto::import::UploadAccepted;

impl ImporterClient {
    /// Submit a local CSV file for import
    ///
    /// Validates the `.csv` suffix before reading or transmitting anything,
    /// then issues a single multipart upload. The server enqueues a
    /// background job and acknowledges with its task id without waiting for
    /// the import to finish. No retries are performed; submission is one
    /// attempt per call.
    ///
    /// # Errors
    /// * [`ClientError::InvalidFileType`] - filename does not end in `.csv`; no network call was made
    /// * [`ClientError::Io`] - the file could not be read
    /// * [`ClientError::Api`] / [`ClientError::RequestFailed`] - rejection or transport failure
    /// * [`ClientError::MalformedResponse`] - accepted upload with an unparseable body
    pub async fn submit_file(&self, path: &Path) -> Result<UploadAccepted> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        check_csv_name(&file_name)?;

        let content = tokio::fs::read(path).await?;
        self.submit_bytes(file_name, content).await
    }

    /// Submit in-memory CSV content under the given filename
    pub async fn submit_bytes(
        &self,
        file_name: String,
        content: Vec<u8>,
    ) -> Result<UploadAccepted> {
        check_csv_name(&file_name)?;

        debug!("Uploading {} ({} bytes)", file_name, content.len());

        let part = Part::bytes(content)
            .file_name(file_name)
            .mime_str("text/csv")?;
        let form = Form::new().part("file", part);

        let url = format!("{}/api/upload", self.base_url);
        let response = self.client.post(&url).multipart(form).send().await?;

        self.handle_json_response(response).await
    }
}

/// Suffix gate: only the filename is validated client-side; content
/// validation belongs to the job engine.
fn check_csv_name(file_name: &str) -> Result<()> {
    if file_name.ends_with(".csv") {
        Ok(())
    } else {
        Err(ClientError::InvalidFileType(file_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_name_accepted() {
        assert!(check_csv_name("products.csv").is_ok());
        assert!(check_csv_name("2026-08-catalog.csv").is_ok());
    }

    #[test]
    fn test_non_csv_name_rejected() {
        assert!(matches!(
            check_csv_name("report.txt"),
            Err(ClientError::InvalidFileType(name)) if name == "report.txt"
        ));
        assert!(check_csv_name("").is_err());
        assert!(check_csv_name("csv").is_err());
        // Suffix check is case-sensitive.
        assert!(check_csv_name("PRODUCTS.CSV").is_err());
    }

    #[tokio::test]
    async fn test_submit_rejects_before_any_network_call() {
        // A port nothing listens on: if validation let the request through,
        // this would fail with a transport error instead.
        let client = ImporterClient::new("http://127.0.0.1:9");

        let result = client
            .submit_bytes("report.txt".to_string(), b"sku,name\n".to_vec())
            .await;

        assert!(matches!(result, Err(ClientError::InvalidFileType(_))));
    }

    #[tokio::test]
    async fn test_submit_file_surfaces_read_errors() {
        let client = ImporterClient::new("http://127.0.0.1:9");

        let result = client
            .submit_file(Path::new("/nonexistent/products.csv"))
            .await;

        assert!(matches!(result, Err(ClientError::Io(_))));
    }
}
