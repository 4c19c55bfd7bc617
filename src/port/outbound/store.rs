//! Snapshot persistence port.

use chrono::{DateTime, Utc};

use crate::domain::ReleaseStats;
use crate::error::Result;

/// Number of snapshots returned by history queries when no positive limit
/// is given.
pub const DEFAULT_HISTORY_LIMIT: i64 = 10;

/// Append-only storage of release snapshots.
///
/// Snapshots are written once and never updated. Every read reconstructs
/// whole snapshots: all releases of the snapshot with all of their assets.
pub trait SnapshotStore {
    /// Persist one snapshot atomically.
    ///
    /// Either every release and asset row is written or none is.
    fn store_stats(&self, stats: &ReleaseStats) -> Result<()>;

    /// Load the most recently fetched snapshot.
    ///
    /// Returns an empty snapshot, not an error, when nothing is stored.
    fn latest_stats(&self, owner: &str, repo: &str) -> Result<ReleaseStats>;

    /// Load up to `limit` snapshots, most recent first.
    ///
    /// `limit <= 0` means [`DEFAULT_HISTORY_LIMIT`].
    fn stats_history(&self, owner: &str, repo: &str, limit: i64) -> Result<Vec<ReleaseStats>>;

    /// Load every snapshot fetched within `[start, end]`, most recent first.
    fn stats_between(
        &self,
        owner: &str,
        repo: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ReleaseStats>>;
}
