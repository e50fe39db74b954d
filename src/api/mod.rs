//! Issue tracker API client and types.
//!
//! This module provides the interface for creating, fetching and updating
//! issues through the GitHub REST API.

mod auth;
mod client;
pub mod error;
mod types;

pub use auth::Auth;
pub use client::IssueClient;
pub use error::{ApiError, Result};
pub use types::{IssuePayload, IssueResponse, IssueState};
