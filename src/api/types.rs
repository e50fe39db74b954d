//! Issue tracker API request and response types.
//!
//! These types model the GitHub REST v3 issue payloads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The open/closed state of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IssueState {
    Open,
    Closed,
    /// A state string this client does not know about, kept verbatim.
    Unknown(String),
}

impl IssueState {
    pub fn as_str(&self) -> &str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
            IssueState::Unknown(raw) => raw,
        }
    }
}

impl From<String> for IssueState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "open" => IssueState::Open,
            "closed" => IssueState::Closed,
            _ => IssueState::Unknown(raw),
        }
    }
}

impl From<IssueState> for String {
    fn from(state: IssueState) -> Self {
        match state {
            IssueState::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IssueState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(IssueState::Open),
            "closed" => Ok(IssueState::Closed),
            other => Err(format!("unknown issue state '{}' (expected open or closed)", other)),
        }
    }
}

/// The body of a create or update request.
///
/// Unset fields are left out of the JSON entirely, so an update payload
/// only touches the fields that were set on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueState>,
    /// Milestone number within the repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u64>,
}

impl IssuePayload {
    /// Start a payload for a new issue with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// A payload that only changes the issue state.
    pub fn state_change(state: IssueState) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Add a label. Duplicates are ignored.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        push_unique(&mut self.labels, label.into());
        self
    }

    pub fn labels<I, S>(self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        labels.into_iter().fold(self, |payload, l| payload.label(l))
    }

    /// Add an assignee login. Duplicates are ignored.
    pub fn assignee(mut self, login: impl Into<String>) -> Self {
        push_unique(&mut self.assignees, login.into());
        self
    }

    pub fn assignees<I, S>(self, logins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        logins.into_iter().fold(self, |payload, a| payload.assignee(a))
    }

    pub fn state(mut self, state: IssueState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn milestone(mut self, milestone: u64) -> Self {
        self.milestone = Some(milestone);
        self
    }

    /// Whether the payload would serialize to an empty object.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether the payload carries a non-blank title.
    pub fn has_title(&self) -> bool {
        self.title.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

fn push_unique(values: &mut Vec<String>, value: String) {
    if !values.contains(&value) {
        values.push(value);
    }
}

/// An issue as returned by the service.
///
/// Returned by `POST /repos/{owner}/{repo}/issues` and
/// `GET|PATCH /repos/{owner}/{repo}/issues/{number}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueResponse {
    /// Globally unique numeric identifier.
    pub id: u64,
    /// Repository-scoped issue number.
    pub number: u64,
    /// Web URL of the issue.
    pub html_url: String,
    #[serde(default)]
    pub state: Option<IssueState>,
    pub title: String,
    /// The issue body; the service sends `null` for an empty body.
    #[serde(default)]
    pub body: Option<String>,
    /// Opaque GraphQL node identifier.
    #[serde(default)]
    pub node_id: String,
}

impl IssueResponse {
    /// Whether the service reports the issue as closed.
    pub fn is_closed(&self) -> bool {
        self.state == Some(IssueState::Closed)
    }
}

impl fmt::Display for IssueResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.as_ref().map_or("unknown", IssueState::as_str);
        write!(
            f,
            "#{} {} ({}) {}",
            self.number, self.title, state, self.html_url
        )
    }
}
