//! GitHub API client configuration.

use serde::Deserialize;

use crate::error::ConfigError;

/// Public GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Largest page size the releases endpoint accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// GitHub HTTP client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    /// Base URL of the REST API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Personal access token. Optional; raises the rate limit.
    #[serde(default)]
    pub token: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Releases requested per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_per_page() -> u32 {
    MAX_PER_PAGE
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
            per_page: default_per_page(),
        }
    }
}

impl GithubConfig {
    /// Validate field ranges.
    ///
    /// # Errors
    /// Returns an error if the API URL is empty or `per_page` is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "github.api_url",
                reason: "must not be empty".into(),
            });
        }
        if !(1..=MAX_PER_PAGE).contains(&self.per_page) {
            return Err(ConfigError::InvalidValue {
                field: "github.per_page",
                reason: format!("must be between 1 and {MAX_PER_PAGE}"),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "github.timeout_secs",
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
