//! Skuport HTTP Client
//!
//! A small, type-safe HTTP client for the product importer API.
//!
//! One [`ImporterClient`] speaks the three endpoints the import protocol
//! uses: multipart upload, progress, and cancellation. The [`ImporterApi`]
//! trait is the seam the tracker polls through, so the polling machinery can
//! be exercised against scripted fakes.
//!
//! # Example
//!
//! ```no_run
//! use skuport_client::ImporterClient;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ImporterClient::new("http://localhost:5000");
//!
//!     let accepted = client.submit_file(Path::new("products.csv")).await?;
//!     println!("Import started: {}", accepted.task_id);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
mod cancel;
mod progress;
mod upload;

// Re-export commonly used types
pub use api::ImporterApi;
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;

use skuport_core::dto::import::ApiErrorBody;

/// HTTP client for the importer API
///
/// Methods are grouped by endpoint:
/// - Upload: [`submit_file`](Self::submit_file) / [`submit_bytes`](Self::submit_bytes)
/// - Progress: [`progress`](Self::progress)
/// - Cancellation: [`cancel`](Self::cancel)
#[derive(Debug, Clone)]
pub struct ImporterClient {
    /// Base URL of the importer API (e.g., "http://localhost:5000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl ImporterClient {
    /// Create a new importer client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the importer API (e.g., "http://localhost:5000")
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new importer client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use skuport_client::ImporterClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = ImporterClient::with_client("http://localhost:5000", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the importer API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle a response in the importer API's error convention.
    ///
    /// The body is read as text first: rejected requests carry
    /// `{"error": ...}` or `{"details": ...}` when the server got as far as
    /// producing JSON, and an HTML error page otherwise. Accepted requests
    /// must carry valid JSON.
    async fn handle_json_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::api_error(
                status.as_u16(),
                error_message(status.as_u16(), &text),
            ));
        }

        serde_json::from_str(&text).map_err(|_| ClientError::MalformedResponse(excerpt(&text)))
    }

    /// Handle a response whose body carries nothing of interest on success
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::api_error(
                status.as_u16(),
                error_message(status.as_u16(), &text),
            ));
        }

        Ok(())
    }
}

/// Extracts the server's error message from a rejected response body.
///
/// Falls back to a truncated excerpt when the body is not the structured
/// `{error|details}` shape, and to a generic status line when it is empty.
fn error_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = parsed.message() {
            return message.to_string();
        }
    }

    if body.trim().is_empty() {
        format!("server error ({})", status)
    } else {
        excerpt(body)
    }
}

/// First ~100 characters of a body, for surfacing unparseable payloads
/// without dumping them verbatim
fn excerpt(body: &str) -> String {
    const MAX_CHARS: usize = 100;

    let mut out: String = body.chars().take(MAX_CHARS).collect();
    if body.chars().nth(MAX_CHARS).is_some() {
        out.push('…');
    }
    out
}
