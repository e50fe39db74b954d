//! Bearer-token authentication for the issue tracker API.

use std::fmt;

/// Authentication credentials for the API.
///
/// Holds the pre-rendered `Authorization` header value. The raw token is
/// never printed by `Debug`.
#[derive(Clone)]
pub struct Auth {
    /// The complete "Bearer ..." header value.
    auth_header: String,
}

impl Auth {
    /// Create bearer credentials from a personal access token.
    pub fn bearer(token: &str) -> Self {
        Self {
            auth_header: build_auth_header(token),
        }
    }

    /// Get the authorization header value for HTTP requests.
    pub fn header_value(&self) -> &str {
        &self.auth_header
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("auth_header", &"Bearer <redacted>")
            .finish()
    }
}

fn build_auth_header(token: &str) -> String {
    format!("Bearer {}", token.trim())
}
