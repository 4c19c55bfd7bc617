//! Remote release fetching port.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ReleaseStats;
use crate::error::{ConfigError, Result};

/// Parameters for one fetch of a repository's releases.
///
/// The token is passed explicitly; fetchers never read it from the
/// environment.
#[derive(Debug, Clone, Default)]
pub struct FetchRequest {
    pub owner: String,
    pub repo: String,
    /// Bearer token for higher rate limits and private repositories.
    pub token: Option<String>,
    /// Upper bound on the whole paginated fetch.
    pub deadline: Option<Duration>,
}

impl FetchRequest {
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Reject a request without an owner or repository.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingField`] naming the blank field.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.owner.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "owner" });
        }
        if self.repo.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "repo" });
        }
        Ok(())
    }
}

/// Port for listing every release of a repository with download counts.
///
/// Implementations paginate internally and return a fully populated
/// snapshot stamped with the call time.
#[async_trait]
pub trait ReleaseFetcher: Send + Sync {
    async fn fetch(&self, request: &FetchRequest) -> Result<ReleaseStats>;
}
