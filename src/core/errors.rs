use std::time::Duration;
use thiserror::Error;
use super::validation::Rejection;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upload failed (HTTP {status_code})")]
    Server { status_code: u16 },

    #[error("Invalid upload parameters: {0}")]
    InvalidParams(String),

    #[error("{0}")]
    Rejected(#[from] Rejection),

    #[error("Another upload is already in flight")]
    AlreadyInFlight,

    #[error("Upload was cancelled")]
    Cancelled,

    #[error("Upload timed out after {0:?}")]
    Timeout(Duration),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl UploadError {
    pub fn server_error(status_code: u16) -> Self {
        Self::Server { status_code }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// Error alias
pub type Result<T, E = UploadError> = std::result::Result<T, E>;
