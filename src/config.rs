//! Configuration management for the flight lookup tool.
//!
//! Handles loading configuration from a TOML file. The only setting that
//! matters at runtime is the location of the backing SQLite store, plus the
//! per-query timeout.

use crate::error::{FlightError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Connection string used when nothing else is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:data/flights.sqlite3";

/// Default query timeout in seconds.
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backing store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Backing store configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// SQLite connection string (e.g., `sqlite:data/flights.sqlite3`).
    #[serde(default = "default_url")]
    pub url: String,

    /// Seconds to wait for a single query before giving up.
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,
}

fn default_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_query_timeout_secs() -> u64 {
    DEFAULT_QUERY_TIMEOUT_SECS
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            query_timeout_secs: default_query_timeout_secs(),
        }
    }
}

impl DatabaseConfig {
    /// Creates a database config for the given connection string.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Checks that the connection string names a SQLite store.
    ///
    /// Accepted forms: `sqlite:path`, `sqlite://path`, `sqlite::memory:`.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.url)
            .map_err(|e| FlightError::config(format!("Invalid connection string: {e}")))?;

        if url.scheme() != "sqlite" {
            return Err(FlightError::config(format!(
                "Invalid scheme '{}'. Expected 'sqlite'",
                url.scheme()
            )));
        }

        if self.location().is_empty() {
            return Err(FlightError::config("Connection string has no database path"));
        }

        if self.query_timeout_secs == 0 {
            return Err(FlightError::config("query_timeout_secs must be positive"));
        }

        Ok(())
    }

    /// Returns the store location without the scheme or query string.
    pub fn location(&self) -> &str {
        let rest = self
            .url
            .strip_prefix("sqlite://")
            .or_else(|| self.url.strip_prefix("sqlite:"))
            .unwrap_or(&self.url);
        rest.split('?').next().unwrap_or_default()
    }

    /// Returns a display-safe string for logs.
    pub fn display_string(&self) -> String {
        format!("sqlite @ {}", self.location())
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("flight-lookup")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the default configuration.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| FlightError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            FlightError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}
