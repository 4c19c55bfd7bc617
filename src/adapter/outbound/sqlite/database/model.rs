//! Database model types for Diesel ORM.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC text with microsecond
//! precision, so text order is chronological order. Counters are stored as
//! signed 64-bit integers.

use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;

use super::schema::{assets, stats};
use crate::domain::{Asset, Release, ReleaseStats};
use crate::error::StorageError;

/// Database row for one release of one snapshot (queryable).
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = stats)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StatRow {
    pub id: i32,
    pub snapshot_id: String,
    pub owner: String,
    pub repo: String,
    pub tag: String,
    pub release_name: String,
    pub total_downloads: i64,
    pub fetched_at: String,
    pub created_at: String,
}

/// Database row for one release of one snapshot (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = stats)]
pub struct NewStatRow<'a> {
    pub snapshot_id: String,
    pub owner: &'a str,
    pub repo: &'a str,
    pub tag: &'a str,
    pub release_name: &'a str,
    pub total_downloads: i64,
    pub fetched_at: String,
    pub created_at: String,
}

/// Database row for an asset (queryable).
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
#[diesel(belongs_to(StatRow, foreign_key = stat_id))]
#[diesel(table_name = assets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AssetRow {
    pub id: i32,
    pub stat_id: i32,
    pub name: String,
    pub download_count: i64,
    pub size: i64,
    pub content_type: Option<String>,
}

/// Database row for an asset (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = assets)]
pub struct NewAssetRow<'a> {
    pub stat_id: i32,
    pub name: &'a str,
    pub download_count: i64,
    pub size: i64,
    pub content_type: Option<&'a str>,
}

/// Row id of the most recent insert on this connection.
#[derive(QueryableByName)]
pub struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::Integer)]
    pub id: i32,
}

/// Render a timestamp in the stored text form.
#[must_use]
pub fn encode_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp.
///
/// # Errors
/// Returns an error if `value` is not RFC 3339.
pub fn decode_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| StorageError::Decode {
            field,
            reason: format!("{value:?}: {e}"),
        })
}

fn encode_count(field: &'static str, value: u64) -> Result<i64, StorageError> {
    i64::try_from(value).map_err(|_| StorageError::Decode {
        field,
        reason: format!("{value} exceeds the storable range"),
    })
}

fn decode_count(field: &'static str, value: i64) -> Result<u64, StorageError> {
    u64::try_from(value).map_err(|_| StorageError::Decode {
        field,
        reason: format!("negative count {value}"),
    })
}

impl<'a> NewStatRow<'a> {
    /// Build the row for `release` within `snapshot`.
    ///
    /// # Errors
    /// Returns an error if the download total does not fit the column.
    pub fn from_release(snapshot: &'a ReleaseStats, release: &'a Release) -> Result<Self, StorageError> {
        Ok(Self {
            snapshot_id: snapshot.snapshot_id.to_string(),
            owner: &snapshot.owner,
            repo: &snapshot.repo,
            tag: &release.tag,
            release_name: &release.name,
            total_downloads: encode_count("total_downloads", release.total_downloads)?,
            fetched_at: encode_timestamp(&snapshot.fetched_at),
            created_at: encode_timestamp(&release.created_at),
        })
    }
}

impl<'a> NewAssetRow<'a> {
    /// Build the row for `asset` owned by the release row `stat_id`.
    ///
    /// # Errors
    /// Returns an error if a counter does not fit its column.
    pub fn from_asset(stat_id: i32, asset: &'a Asset) -> Result<Self, StorageError> {
        Ok(Self {
            stat_id,
            name: &asset.name,
            download_count: encode_count("download_count", asset.download_count)?,
            size: encode_count("size", asset.size_bytes)?,
            content_type: Some(asset.content_type.as_str()).filter(|ct| !ct.is_empty()),
        })
    }
}

impl StatRow {
    /// Rebuild the domain release from this row and its assets.
    ///
    /// Publication metadata is not stored and comes back unset.
    ///
    /// # Errors
    /// Returns an error if a stored value cannot be decoded.
    pub fn into_release(self, assets: Vec<Asset>) -> Result<Release, StorageError> {
        Ok(Release {
            name: self.release_name,
            tag: self.tag,
            assets,
            total_downloads: decode_count("total_downloads", self.total_downloads)?,
            created_at: decode_timestamp("created_at", &self.created_at)?,
            published_at: None,
            is_prerelease: false,
            is_draft: false,
        })
    }
}

impl AssetRow {
    /// Rebuild the domain asset.
    ///
    /// # Errors
    /// Returns an error if a stored counter is negative.
    pub fn into_asset(self) -> Result<Asset, StorageError> {
        Ok(Asset {
            name: self.name,
            download_count: decode_count("download_count", self.download_count)?,
            size_bytes: decode_count("size", self.size)?,
            content_type: self.content_type.unwrap_or_default(),
        })
    }
}
