//! Errors returned by the feeding events client.

use thiserror::Error;

/// Everything that can go wrong talking to the feeding events resource.
///
/// Errors are surfaced exactly as they happened. The client never retries.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or transport failure
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("Server returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Body was not the JSON we expected
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Single-record lookup came back empty
    #[error("Feeding event not found: {0}")]
    NotFound(i64),
}

impl ApiError {
    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
