//! API error types for the issue client.

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur when talking to the issue tracker API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The client configuration was rejected before any request was sent.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The issue payload could not be encoded as JSON.
    #[error("Failed to serialize issue payload: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The request could not be built (bad URL, invalid issue number).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Network or HTTP transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a status outside the accepted set.
    #[error("{}", unexpected_status_message(.status, .message))]
    UnexpectedStatus {
        /// The HTTP status the service returned.
        status: StatusCode,
        /// The `message` field of the error body, if the service sent one.
        message: Option<String>,
    },

    /// The response body was not the expected JSON record.
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an unexpected HTTP status and the raw error body.
    ///
    /// GitHub error bodies look like `{"message": "Not Found", ...}`; the
    /// message is kept when present.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| json.get("message")?.as_str().map(str::to_string))
            .filter(|msg| !msg.is_empty());

        ApiError::UnexpectedStatus { status, message }
    }

    /// The HTTP status code, for status errors.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the service reported the issue or repository as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

fn unexpected_status_message(status: &StatusCode, message: &Option<String>) -> String {
    match message {
        Some(msg) => format!("Unexpected HTTP status {}: {}", status.as_u16(), msg),
        None => format!("Unexpected HTTP status {}", status.as_u16()),
    }
}
