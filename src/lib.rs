//! issuekit - a small typed client for GitHub issues
//!
//! Wraps the create, get and update issue endpoints of the GitHub REST API.
//!
//! ```no_run
//! use issuekit::api::{IssueClient, IssuePayload};
//! use issuekit::config::ClientConfig;
//!
//! # async fn demo() -> issuekit::api::Result<()> {
//! let client = IssueClient::new(ClientConfig::new("ghp_token", "octocat", "hello-world"))?;
//! let issue = client
//!     .create(&IssuePayload::new("Test Issue").body("Created via the API"))
//!     .await?;
//! println!("Created issue #{}: {}", issue.number, issue.html_url);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
