//! Path utilities for release-stats.
//!
//! All data lives under `~/.release-stats/`:
//! - `~/.release-stats/config.toml` - optional configuration
//! - `~/.release-stats/github-stats.db` - snapshot database

use std::path::PathBuf;

/// File name of the snapshot database.
pub const DEFAULT_DATABASE_FILE: &str = "github-stats.db";

/// Returns the release-stats home directory (`~/.release-stats/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".release-stats")
}

/// Returns the default config file path (`~/.release-stats/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the default database path (`~/.release-stats/github-stats.db`).
pub fn default_database() -> PathBuf {
    home_dir().join(DEFAULT_DATABASE_FILE)
}
