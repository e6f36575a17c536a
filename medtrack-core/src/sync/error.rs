//! Sync error types.

use thiserror::Error;

/// Errors from talking to the remote users API.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The request never completed (connect, TLS, body read, ...)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("Server returned status {status}")]
    Status { status: reqwest::StatusCode },

    /// The response body was not the expected JSON
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SyncError {
    /// Status code of a non-2xx response, if that is what failed.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            SyncError::Status { status } => Some(*status),
            SyncError::Transport(e) => e.status(),
            SyncError::Decode(_) => None,
        }
    }
}
