//! Command-line front end.
//!
//! Reads the token and repository coordinates from flags, the environment or
//! the settings file, then runs one issue operation and prints the result.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::api::{IssueClient, IssuePayload, IssueResponse, IssueState};
use crate::config::{self, ClientConfig, Settings};
use crate::error::{AppError, Result};

#[derive(Debug, Parser)]
#[command(name = "issuekit")]
#[command(about = "Create, fetch and update GitHub issues", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Personal access token
    #[arg(long, env = "GITHUB_PAT", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Repository owner
    #[arg(short, long, env = "GITHUB_OWNER", global = true)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(short, long, env = "GITHUB_REPO", global = true)]
    pub repo: Option<String>,

    /// API base URL
    #[arg(long, env = "GITHUB_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Settings file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Log requests to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new issue
    Create {
        /// Issue title
        #[arg(short, long)]
        title: String,

        #[command(flatten)]
        fields: IssueFields,
    },

    /// Show an issue
    Get {
        /// Issue number
        number: u64,
    },

    /// Change fields of an existing issue
    Update {
        /// Issue number
        number: u64,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New state
        #[arg(short, long)]
        state: Option<IssueState>,

        #[command(flatten)]
        fields: IssueFields,
    },

    /// Close an issue
    Close {
        /// Issue number
        number: u64,
    },

    /// Reopen a closed issue
    Reopen {
        /// Issue number
        number: u64,
    },
}

/// Fields shared by `create` and `update`.
#[derive(Debug, Default, Args)]
pub struct IssueFields {
    /// Issue body
    #[arg(short, long)]
    pub body: Option<String>,

    /// Label to set (repeatable or comma-separated)
    #[arg(short, long = "label", value_delimiter = ',')]
    pub labels: Vec<String>,

    /// Assignee login (repeatable or comma-separated)
    #[arg(short, long = "assignee", value_delimiter = ',')]
    pub assignees: Vec<String>,

    /// Milestone number
    #[arg(short, long)]
    pub milestone: Option<u64>,
}

impl IssueFields {
    fn apply(&self, mut payload: IssuePayload) -> IssuePayload {
        if let Some(body) = &self.body {
            payload = payload.body(body.clone());
        }
        if let Some(milestone) = self.milestone {
            payload = payload.milestone(milestone);
        }
        payload
            .labels(self.labels.iter().cloned())
            .assignees(self.assignees.iter().cloned())
    }
}

impl Commands {
    /// Build the request payload for commands that send one.
    pub fn payload(&self) -> Option<IssuePayload> {
        match self {
            Commands::Create { title, fields } => {
                Some(fields.apply(IssuePayload::new(title.clone())))
            }
            Commands::Update {
                title,
                state,
                fields,
                ..
            } => {
                let mut payload = IssuePayload::default();
                if let Some(title) = title {
                    payload = payload.title(title.clone());
                }
                if let Some(state) = state {
                    payload = payload.state(state.clone());
                }
                Some(fields.apply(payload))
            }
            Commands::Get { .. } | Commands::Close { .. } | Commands::Reopen { .. } => None,
        }
    }
}

/// Merge flags/environment with the settings file into a client configuration.
///
/// Flags and environment win over the settings file. Nothing is sent over
/// the network here.
pub fn resolve_config(cli: &Cli, settings: &Settings) -> Result<ClientConfig> {
    let token = non_empty(cli.token.as_deref()).ok_or(AppError::MissingSetting {
        what: "access token",
        env: "GITHUB_PAT",
        flag: "--token",
    })?;
    let owner = non_empty(cli.owner.as_deref())
        .or_else(|| non_empty(settings.owner.as_deref()))
        .ok_or(AppError::MissingSetting {
            what: "repository owner",
            env: "GITHUB_OWNER",
            flag: "--owner",
        })?;
    let repo = non_empty(cli.repo.as_deref())
        .or_else(|| non_empty(settings.repo.as_deref()))
        .ok_or(AppError::MissingSetting {
            what: "repository name",
            env: "GITHUB_REPO",
            flag: "--repo",
        })?;

    let mut config = ClientConfig::new(token, owner, repo);
    let api_base =
        non_empty(cli.api_url.as_deref()).or_else(|| non_empty(settings.api_base.as_deref()));
    if let Some(base) = api_base {
        config = config.with_api_base(base);
    }

    config.validate()?;
    Ok(config)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Load the settings file, falling back to defaults when there is no config directory.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Ok(Settings::load_from(path)?),
        None => match config::settings_path() {
            Ok(path) => Ok(Settings::load_from(&path)?),
            Err(e) => {
                debug!("No settings file location: {}", e);
                Ok(Settings::default())
            }
        },
    }
}

/// Run the parsed command, writing the result to `out`.
pub async fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let settings = load_settings(cli.config.as_deref())?;
    let config = resolve_config(cli, &settings)?;
    let http = IssueClient::build_http_client(settings.timeout())?;
    let client = IssueClient::new(config.with_http_client(http))?;

    let issue = match &cli.command {
        Commands::Create { .. } => {
            let payload = cli.command.payload().unwrap_or_default();
            client.create(&payload).await?
        }
        Commands::Get { number } => client.get(*number).await?,
        Commands::Update { number, .. } => {
            let payload = cli.command.payload().unwrap_or_default();
            if payload.is_empty() {
                return Err(AppError::other(
                    "Nothing to update: pass at least one of --title, --body, --state, --label, --assignee or --milestone",
                ));
            }
            client.update(*number, &payload).await?
        }
        Commands::Close { number } => client.close(*number).await?,
        Commands::Reopen { number } => client.reopen(*number).await?,
    };

    print_issue(&issue, cli.json, out)
}

fn print_issue(issue: &IssueResponse, json: bool, out: &mut dyn Write) -> Result<()> {
    let rendered = if json {
        serde_json::to_string_pretty(issue)
            .map_err(|e| AppError::other(format!("Failed to render JSON: {}", e)))?
    } else {
        issue.to_string()
    };

    writeln!(out, "{}", rendered)
        .map_err(|e| AppError::other(format!("Failed to write output: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ENV_VARS: [&str; 4] = ["GITHUB_PAT", "GITHUB_OWNER", "GITHUB_REPO", "GITHUB_API_URL"];

    /// Parse with the GitHub variables removed so the host environment cannot leak in.
    fn parse(args: &[&str]) -> Cli {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
        Cli::try_parse_from(std::iter::once("issuekit").chain(args.iter().copied())).unwrap()
    }

    #[test]
    #[serial]
    fn test_create_payload() {
        let cli = parse(&[
            "create", "--title", "Bug", "--body", "desc", "--label", "bug,api", "-a", "octocat",
        ]);
        let payload = cli.command.payload().unwrap();

        assert_eq!(payload.title.as_deref(), Some("Bug"));
        assert_eq!(payload.body.as_deref(), Some("desc"));
        assert_eq!(payload.labels, vec!["bug", "api"]);
        assert_eq!(payload.assignees, vec!["octocat"]);
        assert_eq!(payload.state, None);
    }

    #[test]
    #[serial]
    fn test_update_payload_only_has_given_fields() {
        let cli = parse(&["update", "7", "--state", "closed"]);
        let payload = cli.command.payload().unwrap();

        assert_eq!(payload, IssuePayload::state_change(IssueState::Closed));
    }

    #[test]
    #[serial]
    fn test_update_rejects_unknown_state() {
        let result = Cli::try_parse_from(["issuekit", "update", "7", "--state", "merged"]);
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_get_has_no_payload() {
        let cli = parse(&["get", "3"]);
        assert!(cli.command.payload().is_none());
    }

    #[test]
    #[serial]
    fn test_resolve_config_from_flags() {
        let cli = parse(&["--token", "t", "--owner", "o", "--repo", "r", "get", "1"]);
        let config = resolve_config(&cli, &Settings::default()).unwrap();

        assert_eq!(config.owner, "o");
        assert_eq!(config.repo, "r");
        assert_eq!(config.api_base(), config::DEFAULT_API_BASE);
    }

    #[test]
    #[serial]
    fn test_resolve_config_falls_back_to_settings() {
        let cli = parse(&["--token", "t", "get", "1"]);
        let settings = Settings {
            owner: Some("octocat".to_string()),
            repo: Some("hello-world".to_string()),
            api_base: Some("https://github.example.com/api/v3".to_string()),
            ..Settings::default()
        };
        let config = resolve_config(&cli, &settings).unwrap();

        assert_eq!(config.owner, "octocat");
        assert_eq!(config.repo, "hello-world");
        assert_eq!(config.api_base(), "https://github.example.com/api/v3");
    }

    #[test]
    #[serial]
    fn test_flags_override_settings() {
        let cli = parse(&["--token", "t", "--owner", "me", "get", "1"]);
        let settings = Settings {
            owner: Some("octocat".to_string()),
            repo: Some("hello-world".to_string()),
            ..Settings::default()
        };
        let config = resolve_config(&cli, &settings).unwrap();
        assert_eq!(config.owner, "me");
    }

    /// Parse with every GitHub variable set to a known value.
    fn parse_with_env(args: &[&str]) -> Cli {
        std::env::set_var("GITHUB_PAT", "ghp_from_env");
        std::env::set_var("GITHUB_OWNER", "env-owner");
        std::env::set_var("GITHUB_REPO", "env-repo");
        std::env::set_var("GITHUB_API_URL", "https://github.example.com/api/v3");
        let result = Cli::try_parse_from(std::iter::once("issuekit").chain(args.iter().copied()));
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
        result.unwrap()
    }

    #[test]
    #[serial]
    fn test_resolve_config_from_env() {
        let cli = parse_with_env(&["get", "1"]);
        let config = resolve_config(&cli, &Settings::default()).unwrap();

        assert_eq!(config.token, "ghp_from_env");
        assert_eq!(config.owner, "env-owner");
        assert_eq!(config.repo, "env-repo");
        assert_eq!(config.api_base(), "https://github.example.com/api/v3");
    }

    #[test]
    #[serial]
    fn test_env_overrides_settings() {
        let cli = parse_with_env(&["get", "1"]);
        let settings = Settings {
            owner: Some("octocat".to_string()),
            repo: Some("hello-world".to_string()),
            api_base: Some("https://other.example.com/api/v3".to_string()),
            ..Settings::default()
        };
        let config = resolve_config(&cli, &settings).unwrap();

        assert_eq!(config.owner, "env-owner");
        assert_eq!(config.repo, "env-repo");
        assert_eq!(config.api_base(), "https://github.example.com/api/v3");
    }

    #[test]
    #[serial]
    fn test_flags_override_env() {
        let cli = parse_with_env(&["--owner", "flag-owner", "--token", "ghp_flag", "get", "1"]);
        let config = resolve_config(&cli, &Settings::default()).unwrap();

        assert_eq!(config.owner, "flag-owner");
        assert_eq!(config.token, "ghp_flag");
        assert_eq!(config.repo, "env-repo");
    }

    #[test]
    #[serial]
    fn test_missing_token() {
        let cli = parse(&["--token", " ", "--owner", "o", "--repo", "r", "get", "1"]);
        let err = resolve_config(&cli, &Settings::default()).unwrap_err();
        assert!(matches!(
            err,
            AppError::MissingSetting {
                env: "GITHUB_PAT",
                ..
            }
        ));
    }

    #[test]
    #[serial]
    fn test_missing_repo() {
        let cli = parse(&["--token", "t", "--owner", "o", "get", "1"]);
        let err = resolve_config(&cli, &Settings::default()).unwrap_err();
        assert!(matches!(
            err,
            AppError::MissingSetting {
                env: "GITHUB_REPO",
                ..
            }
        ));
    }

    #[test]
    fn test_load_settings_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "owner = \"octocat\"\ntimeout_secs = 5\n").unwrap();

        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings.owner.as_deref(), Some("octocat"));
        assert_eq!(settings.timeout_secs, 5);
    }

    #[test]
    fn test_print_issue_text_and_json() {
        let issue = IssueResponse {
            id: 1,
            number: 2,
            html_url: "https://github.com/o/r/issues/2".to_string(),
            state: Some(IssueState::Open),
            title: "Hello".to_string(),
            body: None,
            node_id: "N".to_string(),
        };

        let mut out = Vec::new();
        print_issue(&issue, false, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "#2 Hello (open) https://github.com/o/r/issues/2\n"
        );

        let mut out = Vec::new();
        print_issue(&issue, true, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["number"], 2);
        assert_eq!(value["state"], "open");
    }
}
