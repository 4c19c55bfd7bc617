#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use release_stats::adapter::outbound::sqlite::SqliteSnapshotStore;
use release_stats::domain::{Asset, Release, ReleaseStats};
use release_stats::port::SnapshotStore;
use tempfile::TempDir;

pub const OWNER: &str = "octo";
pub const REPO: &str = "tool";

/// Temporary directory holding a fresh snapshot database.
pub struct TempStore {
    pub dir: TempDir,
    pub store: SqliteSnapshotStore,
}

impl TempStore {
    pub fn create() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store =
            SqliteSnapshotStore::open(dir.path().join("github-stats.db")).expect("open store");
        Self { dir, store }
    }

    pub fn db_path(&self) -> std::path::PathBuf {
        self.store.path().to_path_buf()
    }
}

pub fn asset(name: &str, downloads: u64) -> Asset {
    Asset {
        name: name.to_string(),
        download_count: downloads,
        size_bytes: 1024,
        content_type: "application/gzip".to_string(),
    }
}

pub fn release(name: &str, tag: &str, assets: Vec<Asset>) -> Release {
    Release::from_assets(
        name,
        tag,
        Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
        assets,
    )
}

/// A snapshot of `octo/tool` taken at `at` with `(tag, downloads)` releases,
/// one asset each.
pub fn snapshot(at: DateTime<Utc>, releases: &[(&str, u64)]) -> ReleaseStats {
    let mut stats = ReleaseStats::new(OWNER, REPO, at);
    for (tag, downloads) in releases {
        stats.push_release(release(
            &format!("Release {tag}"),
            tag,
            vec![asset(&format!("{tag}.tar.gz"), *downloads)],
        ));
    }
    stats
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days)
}

/// Store an older and a newer snapshot inside the default compare window.
///
/// Totals go from 100 to 150.
pub fn seed_two_snapshots(store: &SqliteSnapshotStore) {
    store
        .store_stats(&snapshot(days_ago(5), &[("v1.0.0", 60), ("v1.1.0", 40)]))
        .expect("store older snapshot");
    store
        .store_stats(&snapshot(
            days_ago(1),
            &[("v1.0.0", 70), ("v1.1.0", 70), ("v1.2.0", 10)],
        ))
        .expect("store newer snapshot");
}
