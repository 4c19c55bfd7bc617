//! Release-stats - GitHub release download statistics.
//!
//! Fetches every release of a repository with its per-asset download
//! counts, optionally stores the snapshot in SQLite, and reports on stored
//! snapshots: the latest one, a bounded history, and growth between the
//! oldest and newest snapshot of a recent window.
//!
//! # Modules
//!
//! - [`domain`] - Snapshot types and growth comparison
//! - [`port`] - Fetcher and store traits
//! - [`adapter`] - GitHub client, SQLite store, and the command-line interface
//! - [`infrastructure`] - Settings and logging
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use release_stats::adapter::outbound::sqlite::SqliteSnapshotStore;
//! use release_stats::port::SnapshotStore;
//!
//! let store = SqliteSnapshotStore::open("github-stats.db")?;
//! let latest = store.latest_stats("rust-lang", "rust")?;
//! println!("{} downloads", latest.total_downloads);
//! # Ok::<(), release_stats::error::Error>(())
//! ```

pub mod adapter;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
