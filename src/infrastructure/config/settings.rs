//! Application settings loading and validation.
//!
//! Settings come from an optional TOML file, then environment variables
//! (a `.env` file is honored), then command-line flags applied by the
//! caller. Every section and field is optional.
//!
//! ```toml
//! [github]
//! api_url = "https://api.github.com"
//! token = "ghp_..."
//! timeout_secs = 30
//! per_page = 100
//!
//! [database]
//! path = "/var/lib/release-stats/github-stats.db"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::logging::LoggingConfig;
use crate::adapter::outbound::github::GithubConfig;
use crate::error::{ConfigError, Result};

/// Token used for GitHub API requests.
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
/// Database file location.
pub const ENV_DATABASE: &str = "RELEASE_STATS_DB";
/// GitHub API base URL.
pub const ENV_API_URL: &str = "RELEASE_STATS_API_URL";

/// Snapshot database settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseConfig {
    /// Database file. Unset means the default location.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Top-level application settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Settings {
    /// Parse settings from TOML content.
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or a value is out of range.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load settings for a command run.
    ///
    /// An explicit `path` must exist. Without one, `default_path` is read when
    /// present and defaults are used otherwise. Environment overrides apply
    /// last.
    ///
    /// # Errors
    /// Returns an error if a file cannot be read or a value is invalid.
    pub fn load(path: Option<&Path>, default_path: &Path) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None if default_path.is_file() => Self::from_file(default_path)?,
            None => Self::default(),
        };

        if let Ok(dotenv) = dotenvy::dotenv() {
            debug!(path = %dotenv.display(), "Loaded environment file");
        }
        settings.apply_env(|key| std::env::var(key).ok());
        settings.validate()?;
        Ok(settings)
    }

    /// Override file values with environment variables.
    ///
    /// Blank variables are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(token) = lookup(ENV_GITHUB_TOKEN) {
            self.github.token = Some(token);
        }
        if let Some(api_url) = lookup(ENV_API_URL) {
            self.github.api_url = api_url;
        }
        if let Some(path) = lookup(ENV_DATABASE) {
            self.database.path = Some(PathBuf::from(path));
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.github.validate()?;
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.level",
                reason: "must not be empty".into(),
            }
            .into());
        }
        Ok(())
    }
}
