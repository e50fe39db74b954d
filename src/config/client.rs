//! Construction-time configuration for [`IssueClient`](crate::api::IssueClient).

use reqwest::header::HeaderValue;
use reqwest::Client;

use super::{ConfigError, Result};

/// The public GitHub REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Connection settings for a single repository.
///
/// Everything here is fixed once the client is built.
#[derive(Clone)]
pub struct ClientConfig {
    /// Personal access token sent as a bearer credential.
    pub token: String,
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// API base address. `None` means [`DEFAULT_API_BASE`].
    pub api_base: Option<String>,
    /// HTTP transport to use instead of the default one.
    ///
    /// Timeouts and proxies are configured on this client by the caller.
    pub http_client: Option<Client>,
}

impl ClientConfig {
    /// Create a configuration targeting the public endpoint with the default transport.
    pub fn new(
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            owner: owner.into(),
            repo: repo.into(),
            api_base: None,
            http_client: None,
        }
    }

    /// Point the client at a different API base (GitHub Enterprise, a test server).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Inject the HTTP transport.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// The API base that requests will be sent to.
    pub fn api_base(&self) -> &str {
        self.api_base
            .as_deref()
            .filter(|base| !base.trim().is_empty())
            .unwrap_or(DEFAULT_API_BASE)
    }

    /// Validate this configuration.
    ///
    /// Checks that:
    /// - The token, owner and repository are non-empty
    /// - The token can be sent as an `Authorization` header value
    /// - Owner and repository contain no whitespace or `/`
    /// - The API base starts with http:// or https://
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` with details if validation fails.
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "access token cannot be empty".to_string(),
            ));
        }

        if HeaderValue::from_str(&format!("Bearer {}", self.token.trim())).is_err() {
            return Err(ConfigError::ValidationError(
                "access token contains characters not allowed in an HTTP header".to_string(),
            ));
        }

        validate_segment("owner", &self.owner)?;
        validate_segment("repository", &self.repo)?;

        let base = self.api_base();
        if !base.starts_with("https://") && !base.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "API base '{}' must start with http:// or https://",
                base
            )));
        }

        Ok(())
    }
}

fn validate_segment(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "{} cannot be empty",
            what
        )));
    }

    if value.contains(char::is_whitespace) || value.contains('/') {
        return Err(ConfigError::ValidationError(format!(
            "{} '{}' cannot contain whitespace or '/'",
            what, value
        )));
    }

    Ok(())
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("api_base", &self.api_base())
            .field("http_client", &self.http_client.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = ClientConfig::new("t", "o", "r");
        assert!(config.validate().is_ok());
        assert_eq!(config.api_base(), DEFAULT_API_BASE);
    }

    #[test]
    fn test_empty_token_rejected() {
        let result = ClientConfig::new("  ", "o", "r").validate();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("access token cannot be empty"));
    }

    #[test]
    fn test_token_with_embedded_newline_rejected() {
        let result = ClientConfig::new("ghp_ab\ncd", "o", "r").validate();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
        assert!(result.unwrap_err().to_string().contains("HTTP header"));
    }

    #[test]
    fn test_token_with_non_ascii_rejected() {
        let result = ClientConfig::new("ghp_tök", "o", "r").validate();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_token_trailing_newline_accepted() {
        assert!(ClientConfig::new("ghp_abc\n", "o", "r").validate().is_ok());
    }

    #[test]
    fn test_empty_owner_rejected() {
        let result = ClientConfig::new("t", "", "r").validate();
        assert!(result.unwrap_err().to_string().contains("owner cannot be empty"));
    }

    #[test]
    fn test_empty_repo_rejected() {
        let result = ClientConfig::new("t", "o", "").validate();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("repository cannot be empty"));
    }

    #[test]
    fn test_slash_in_repo_rejected() {
        let result = ClientConfig::new("t", "o", "o/r").validate();
        assert!(result.unwrap_err().to_string().contains("cannot contain"));
    }

    #[test]
    fn test_api_base_override() {
        let config = ClientConfig::new("t", "o", "r").with_api_base("http://127.0.0.1:8080");
        assert!(config.validate().is_ok());
        assert_eq!(config.api_base(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_blank_api_base_falls_back_to_default() {
        let config = ClientConfig::new("t", "o", "r").with_api_base("");
        assert_eq!(config.api_base(), DEFAULT_API_BASE);
    }

    #[test]
    fn test_api_base_without_scheme_rejected() {
        let config = ClientConfig::new("t", "o", "r").with_api_base("api.github.com");
        assert!(config
            .validate()
            .unwrap_err()
            .to_string()
            .contains("must start with http:// or https://"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new("ghp_secret", "o", "r");
        let output = format!("{:?}", config);
        assert!(!output.contains("ghp_secret"));
        assert!(output.contains("\"o\""));
    }
}
