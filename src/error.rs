//! Top-level error type for the issuekit command line.
//!
//! Aggregates the library's error types and turns them into messages
//! suitable for a terminal user.

use reqwest::StatusCode;
use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// A required setting was not provided by flag, environment or settings file.
    #[error("{what} is required (set {env} or pass {flag})")]
    MissingSetting {
        what: &'static str,
        env: &'static str,
        flag: &'static str,
    },

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read the settings file. Please check it is readable.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Settings file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => match e {
                ApiError::Config(inner) => format!("Configuration error: {}", inner),
                ApiError::Serialization(_) => {
                    "Could not encode the issue. Internal error.".to_string()
                }
                ApiError::InvalidRequest(msg) => format!("Invalid request: {}", msg),
                ApiError::Network(_) => {
                    "Connection failed. Please check your internet connection.".to_string()
                }
                ApiError::UnexpectedStatus { status, message } => {
                    let detail = message
                        .as_deref()
                        .map(|m| format!(": {}", m))
                        .unwrap_or_default();
                    match *status {
                        StatusCode::UNAUTHORIZED => {
                            format!("Authentication failed{}", detail)
                        }
                        StatusCode::NOT_FOUND => {
                            format!("Issue or repository not found{}", detail)
                        }
                        _ => format!("GitHub returned HTTP {}{}", status.as_u16(), detail),
                    }
                }
                ApiError::Decode(_) => {
                    "Unexpected response from GitHub. Please check the API URL.".to_string()
                }
            },
            AppError::MissingSetting { .. } => self.to_string(),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Api(e) => match e.status() {
                Some(StatusCode::UNAUTHORIZED) => Some(
                    "Check your token at https://github.com/settings/tokens and export it as GITHUB_PAT.",
                ),
                Some(StatusCode::FORBIDDEN) | Some(StatusCode::TOO_MANY_REQUESTS) => Some(
                    "The token may lack the 'repo' scope, or the rate limit was hit. Wait and try again.",
                ),
                Some(StatusCode::NOT_FOUND) => {
                    Some("Check the owner, repository and issue number.")
                }
                _ if matches!(e, ApiError::Network(_)) => {
                    Some("Check your internet connection and the API URL.")
                }
                _ => None,
            },
            AppError::MissingSetting { .. } => {
                Some("Run 'issuekit --help' to see the available options.")
            }
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
