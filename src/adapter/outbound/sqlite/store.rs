//! SQLite snapshot store implementation.
//!
//! Persists release snapshots as one `stats` row per release plus one
//! `assets` row per asset. Rows of the same fetch share a `snapshot_id`,
//! which is the grouping key for every read. `fetched_at` orders snapshots
//! and bounds time-range queries.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use diesel::dsl::max;
use diesel::prelude::*;
use tracing::{debug, info};
use uuid::Uuid;

use crate::adapter::outbound::sqlite::database::connection::{
    create_pool, ensure_parent_dir, get_connection, run_migrations, DbConnection, DbPool,
};
use crate::adapter::outbound::sqlite::database::model::{
    decode_timestamp, encode_timestamp, AssetRow, LastInsertRowId, NewAssetRow, NewStatRow,
    StatRow,
};
use crate::adapter::outbound::sqlite::database::schema::{assets, stats};
use crate::domain::ReleaseStats;
use crate::error::{Result, StorageError};
use crate::port::outbound::store::{SnapshotStore, DEFAULT_HISTORY_LIMIT};

/// Identifies one stored snapshot: its id and its stored fetch time.
type SnapshotKey = (String, String);

/// SQLite-backed snapshot store.
///
/// Holds the single database handle for the process; it is released when
/// the store is dropped.
pub struct SqliteSnapshotStore {
    pool: DbPool,
    path: PathBuf,
}

impl SqliteSnapshotStore {
    /// Open (creating if needed) the database file at `path`.
    ///
    /// Missing parent directories are created and the schema is applied.
    ///
    /// # Errors
    /// Returns an error if the directory, file, or schema cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        ensure_parent_dir(path)?;

        let pool = create_pool(&path.to_string_lossy())?;
        run_migrations(&pool)?;

        info!(path = %path.display(), "Opened snapshot store");
        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }

    /// Path of the backing database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connection(&self) -> Result<DbConnection> {
        get_connection(&self.pool)
    }

    fn insert_snapshot(
        conn: &mut SqliteConnection,
        snapshot: &ReleaseStats,
    ) -> std::result::Result<(), StorageError> {
        conn.transaction::<_, StorageError, _>(|conn| {
            for release in &snapshot.releases {
                let row = NewStatRow::from_release(snapshot, release)?;
                diesel::insert_into(stats::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::query("insert release row"))?;

                let stat_id = diesel::sql_query("SELECT last_insert_rowid() AS id")
                    .get_result::<LastInsertRowId>(conn)
                    .map_err(StorageError::query("read release row id"))?
                    .id;

                for asset in &release.assets {
                    let row = NewAssetRow::from_asset(stat_id, asset)?;
                    diesel::insert_into(assets::table)
                        .values(&row)
                        .execute(conn)
                        .map_err(StorageError::query("insert asset row"))?;
                }
            }
            Ok(())
        })
    }

    /// Snapshot keys for a repository, most recent first.
    ///
    /// Snapshots sharing a fetch time are ordered by their newest row, the
    /// same tie-break `latest_stats` uses.
    fn snapshot_keys(
        conn: &mut SqliteConnection,
        owner: &str,
        repo: &str,
        window: Option<(&DateTime<Utc>, &DateTime<Utc>)>,
        limit: Option<i64>,
    ) -> std::result::Result<Vec<SnapshotKey>, StorageError> {
        let mut query = stats::table
            .filter(stats::owner.eq(owner))
            .filter(stats::repo.eq(repo))
            .group_by((stats::snapshot_id, stats::fetched_at))
            .select((stats::snapshot_id, stats::fetched_at))
            .order((stats::fetched_at.desc(), max(stats::id).desc()))
            .into_boxed();

        if let Some((start, end)) = window {
            query = query.filter(
                stats::fetched_at.between(encode_timestamp(start), encode_timestamp(end)),
            );
        }
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        query
            .load::<SnapshotKey>(conn)
            .map_err(StorageError::query("query snapshot fetch times"))
    }

    /// Rebuild one whole snapshot: every release row sharing the snapshot id,
    /// each with its assets.
    fn load_snapshot(
        conn: &mut SqliteConnection,
        owner: &str,
        repo: &str,
        key: &SnapshotKey,
    ) -> std::result::Result<ReleaseStats, StorageError> {
        let (snapshot_id, fetched_at) = key;

        let rows: Vec<StatRow> = stats::table
            .filter(stats::snapshot_id.eq(snapshot_id))
            .filter(stats::owner.eq(owner))
            .filter(stats::repo.eq(repo))
            .order((
                stats::total_downloads.desc(),
                stats::tag.asc(),
                stats::id.asc(),
            ))
            .select(StatRow::as_select())
            .load(conn)
            .map_err(StorageError::query("load snapshot releases"))?;

        let asset_rows: Vec<AssetRow> = AssetRow::belonging_to(&rows)
            .order(assets::id.asc())
            .select(AssetRow::as_select())
            .load(conn)
            .map_err(StorageError::query("load snapshot assets"))?;
        let grouped = asset_rows.grouped_by(&rows);

        let id = Uuid::parse_str(snapshot_id).map_err(|e| StorageError::Decode {
            field: "snapshot_id",
            reason: e.to_string(),
        })?;
        let mut snapshot = ReleaseStats::with_id(
            id,
            owner,
            repo,
            decode_timestamp("fetched_at", fetched_at)?,
        );

        for (row, asset_rows) in rows.into_iter().zip(grouped) {
            let assets = asset_rows
                .into_iter()
                .map(AssetRow::into_asset)
                .collect::<std::result::Result<Vec<_>, _>>()?;
            snapshot.push_release(row.into_release(assets)?);
        }

        Ok(snapshot)
    }

    fn load_snapshots(
        conn: &mut SqliteConnection,
        owner: &str,
        repo: &str,
        keys: &[SnapshotKey],
    ) -> std::result::Result<Vec<ReleaseStats>, StorageError> {
        keys.iter()
            .map(|key| Self::load_snapshot(conn, owner, repo, key))
            .collect()
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn store_stats(&self, snapshot: &ReleaseStats) -> Result<()> {
        let mut conn = self.connection()?;
        Self::insert_snapshot(&mut conn, snapshot)?;

        let asset_count: usize = snapshot.releases.iter().map(|r| r.assets.len()).sum();
        info!(
            repository = %snapshot.full_name(),
            snapshot_id = %snapshot.snapshot_id,
            releases = snapshot.releases.len(),
            assets = asset_count,
            "Stored snapshot"
        );
        Ok(())
    }

    fn latest_stats(&self, owner: &str, repo: &str) -> Result<ReleaseStats> {
        let mut conn = self.connection()?;

        let newest: Option<SnapshotKey> = stats::table
            .filter(stats::owner.eq(owner))
            .filter(stats::repo.eq(repo))
            .select((stats::snapshot_id, stats::fetched_at))
            .order((stats::fetched_at.desc(), stats::id.desc()))
            .first(&mut conn)
            .optional()
            .map_err(StorageError::query("query latest snapshot"))?;

        let Some(key) = newest else {
            debug!(owner, repo, "No stored snapshots");
            return Ok(ReleaseStats::empty(owner, repo));
        };

        Ok(Self::load_snapshot(&mut conn, owner, repo, &key)?)
    }

    fn stats_history(&self, owner: &str, repo: &str, limit: i64) -> Result<Vec<ReleaseStats>> {
        let limit = if limit <= 0 {
            DEFAULT_HISTORY_LIMIT
        } else {
            limit
        };
        let mut conn = self.connection()?;

        let keys = Self::snapshot_keys(&mut conn, owner, repo, None, Some(limit))?;
        debug!(owner, repo, limit, found = keys.len(), "Loading snapshot history");

        Ok(Self::load_snapshots(&mut conn, owner, repo, &keys)?)
    }

    fn stats_between(
        &self,
        owner: &str,
        repo: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ReleaseStats>> {
        let mut conn = self.connection()?;

        let keys = Self::snapshot_keys(&mut conn, owner, repo, Some((&start, &end)), None)?;
        debug!(
            owner,
            repo,
            start = %start,
            end = %end,
            found = keys.len(),
            "Loading snapshots in window"
        );

        Ok(Self::load_snapshots(&mut conn, owner, repo, &keys)?)
    }
}
