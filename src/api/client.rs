//! Issue tracker API client implementation.
//!
//! This module provides the client for the GitHub REST v3 issues endpoints.
//! Each operation is one request/response round trip; nothing is retried.

use std::time::Duration;

use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode, Url};
use tracing::{debug, instrument, warn};

use super::auth::Auth;
use super::error::{ApiError, Result};
use super::types::{IssuePayload, IssueResponse, IssueState};
use crate::config::ClientConfig;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Media type for the v3 REST API.
const ACCEPT_V3: &str = "application/vnd.github.v3+json";

const USER_AGENT: &str = concat!("issuekit/", env!("CARGO_PKG_VERSION"));

/// The issue tracker API client.
///
/// Bound to a single repository. Cloning is cheap and clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct IssueClient {
    /// The HTTP client.
    client: Client,
    /// The API base address, without a trailing slash.
    base_url: String,
    owner: String,
    repo: String,
    /// Authentication credentials.
    auth: Auth,
}

impl IssueClient {
    /// Create a new client from a configuration.
    ///
    /// The configuration is validated here, so a missing token, owner or
    /// repository is reported before any request is made.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration fails validation
    /// - The default HTTP client cannot be built
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let base_url = normalize_base_url(config.api_base());
        let client = match config.http_client {
            Some(client) => client,
            None => Self::build_http_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
        };

        debug!(owner = %config.owner, repo = %config.repo, base_url = %base_url, "Created issue client");

        Ok(Self {
            client,
            base_url,
            owner: config.owner,
            repo: config.repo,
            auth: Auth::bearer(&config.token),
        })
    }

    /// Build an HTTP client with the default user agent and the given timeout.
    ///
    /// This is the transport used when none is injected.
    pub fn build_http_client(timeout: Duration) -> Result<Client> {
        Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ApiError::Network)
    }

    /// Create a new issue.
    ///
    /// Calls `POST /repos/{owner}/{repo}/issues` and expects `201 Created`.
    #[instrument(skip(self, payload), fields(repo = %self.repo_slug()))]
    pub async fn create(&self, payload: &IssuePayload) -> Result<IssueResponse> {
        if !payload.has_title() {
            warn!("Creating an issue without a title; the service is likely to reject it");
        }

        let url = self.issues_url()?;
        let body = encode_payload(payload)?;

        let response = self
            .request(Method::POST, url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let issue = Self::handle_response(response, StatusCode::CREATED).await?;
        debug!(number = issue.number, "Created issue");
        Ok(issue)
    }

    /// Get a single issue by number.
    ///
    /// Calls `GET /repos/{owner}/{repo}/issues/{number}` and expects `200 OK`.
    #[instrument(skip(self), fields(repo = %self.repo_slug()))]
    pub async fn get(&self, number: u64) -> Result<IssueResponse> {
        let url = self.issue_url(number)?;

        let response = self.request(Method::GET, url).send().await?;

        let issue = Self::handle_response(response, StatusCode::OK).await?;
        debug!(title = %issue.title, "Fetched issue");
        Ok(issue)
    }

    /// Update an existing issue.
    ///
    /// Calls `PATCH /repos/{owner}/{repo}/issues/{number}` and expects `200 OK`.
    /// Only the fields set on `payload` are sent; the service leaves the rest
    /// untouched.
    #[instrument(skip(self, payload), fields(repo = %self.repo_slug()))]
    pub async fn update(&self, number: u64, payload: &IssuePayload) -> Result<IssueResponse> {
        let url = self.issue_url(number)?;
        let body = encode_payload(payload)?;

        if payload.is_empty() {
            debug!("Sending an empty update");
        }

        let response = self
            .request(Method::PATCH, url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let issue = Self::handle_response(response, StatusCode::OK).await?;
        debug!(state = ?issue.state, "Updated issue");
        Ok(issue)
    }

    /// Close an issue.
    pub async fn close(&self, number: u64) -> Result<IssueResponse> {
        self.update(number, &IssuePayload::state_change(IssueState::Closed))
            .await
    }

    /// Reopen a closed issue.
    pub async fn reopen(&self, number: u64) -> Result<IssueResponse> {
        self.update(number, &IssuePayload::state_change(IssueState::Open))
            .await
    }

    /// Start a request with the auth and accept headers every call carries.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "Sending request");
        self.client
            .request(method, url)
            .header(header::AUTHORIZATION, self.auth.header_value())
            .header(header::ACCEPT, ACCEPT_V3)
    }

    /// Check the status, then decode the body.
    ///
    /// The body is read to the end (or dropped) on every path.
    async fn handle_response(response: Response, expected: StatusCode) -> Result<IssueResponse> {
        let status = response.status();

        if status != expected {
            let error_body = response.text().await.unwrap_or_default();
            debug!(%status, "Error response body: {}", error_body);
            return Err(ApiError::from_status(status, &error_body));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(ApiError::Decode)
    }

    fn issues_url(&self) -> Result<Url> {
        parse_url(format!(
            "{}/repos/{}/{}/issues",
            self.base_url,
            urlencoding::encode(&self.owner),
            urlencoding::encode(&self.repo)
        ))
    }

    fn issue_url(&self, number: u64) -> Result<Url> {
        if number == 0 {
            return Err(ApiError::InvalidRequest(
                "issue number must be positive".to_string(),
            ));
        }

        parse_url(format!(
            "{}/repos/{}/{}/issues/{}",
            self.base_url,
            urlencoding::encode(&self.owner),
            urlencoding::encode(&self.repo),
            number
        ))
    }

    fn repo_slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the repository owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Get the repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

fn encode_payload(payload: &IssuePayload) -> Result<Vec<u8>> {
    serde_json::to_vec(payload).map_err(ApiError::Serialization)
}

fn parse_url(url: String) -> Result<Url> {
    Url::parse(&url).map_err(|e| ApiError::InvalidRequest(format!("invalid URL '{}': {}", url, e)))
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');

    // Warn if not HTTPS (but don't enforce for local test servers)
    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}. This is insecure for production use.", url);
    }

    url.to_string()
}
