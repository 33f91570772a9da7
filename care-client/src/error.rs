//! Client error types

use thiserror::Error;

/// Errors from webhook calls to the workflow service
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (network failure, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for webhook operations
pub type ClientResult<T> = Result<T, ClientError>;
