//! Error types for the importer client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the importer API
#[derive(Debug, Error)]
pub enum ClientError {
    /// Local filename does not end in `.csv`; nothing was transmitted
    #[error("not a CSV file: {0}")]
    InvalidFileType(String),

    /// Local file could not be read
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Network failure before a response was obtained
    #[error("request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The server rejected the request
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the API, or an excerpt of the raw body
        message: String,
    },

    /// A 2xx response whose body is not valid JSON
    #[error("malformed server response: {0}")]
    MalformedResponse(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// True when the failure happened before any request went out
    pub fn is_local(&self) -> bool {
        matches!(self, Self::InvalidFileType(_) | Self::Io(_))
    }
}
