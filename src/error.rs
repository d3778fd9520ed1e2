// Error types returned by the management client. Every operation reports
// failures through `ClientError`; the binary wraps them in `anyhow` with
// step context before printing.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The addressed resource does not exist (HTTP 404).
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The service rejected the submitted fields (HTTP 400).
    #[error("validation error: {0}")]
    Validation(String),

    /// The API key was missing or rejected (HTTP 401/403).
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Any other non-success status.
    #[error("server error ({}): {message}", .status.as_u16())]
    Server { status: StatusCode, message: String },

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("cannot read image {}: {source}", .path.display())]
    ImageFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// True for the error the service reports on unknown identifiers.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }
}
