//! Configuration management for issuekit.
//!
//! This module holds the client's construction-time configuration and the
//! optional on-disk settings file used by the command-line front end.

mod client;
mod settings;

use std::path::PathBuf;

use thiserror::Error;

pub use client::{ClientConfig, DEFAULT_API_BASE};
pub use settings::Settings;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// The settings file exists but could not be read.
    #[error("Failed to read settings file: {0}")]
    ReadError(#[source] std::io::Error),

    /// The settings file is not valid TOML or has the wrong shape.
    #[error("Failed to parse settings file: {0}")]
    ParseError(#[source] toml::de::Error),

    /// A configuration value is missing or malformed.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Directory holding issuekit's settings file.
///
/// - Linux: `~/.config/issuekit/`
/// - macOS: `~/Library/Application Support/issuekit/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\issuekit\`
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("issuekit"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Default location of the settings file.
pub fn settings_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
