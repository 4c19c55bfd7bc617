use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised while fetching release data from the remote API.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("repository {owner}/{repo} not found")]
    NotFound { owner: String, repo: String },

    #[error("request rejected with status {status}; check the API token")]
    Unauthorized { status: u16 },

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("fetch did not complete within {0:?}")]
    DeadlineExceeded(Duration),

    #[error("invalid API URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Persistence failures, each tagged with the phase that failed.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to create database directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open database: {0}")]
    Open(String),

    #[error("failed to connect to database: {0}")]
    Connect(String),

    #[error("failed to create schema: {0}")]
    Schema(String),

    #[error("failed to {op}: {source}")]
    Query {
        op: &'static str,
        #[source]
        source: diesel::result::Error,
    },

    #[error("invalid stored {field}: {reason}")]
    Decode { field: &'static str, reason: String },
}

impl StorageError {
    /// Wrap a diesel error with the operation that produced it.
    pub fn query(op: &'static str) -> impl FnOnce(diesel::result::Error) -> Self {
        move |source| Self::Query { op, source }
    }
}

/// Begin and commit failures surface from `Connection::transaction` through
/// this conversion.
impl From<diesel::result::Error> for StorageError {
    fn from(source: diesel::result::Error) -> Self {
        Self::Query {
            op: "run transaction",
            source,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
