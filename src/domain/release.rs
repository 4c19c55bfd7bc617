//! Release download snapshot types.
//!
//! A [`ReleaseStats`] is one fetch of a repository's releases. It owns its
//! releases, which own their assets. Totals are derived and kept in sync by
//! the constructors here rather than set by hand.

use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    pub name: String,
    pub download_count: u64,
    pub size_bytes: u64,
    /// MIME type reported by the host. May be empty.
    pub content_type: String,
}

/// One published version of a repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Release {
    pub name: String,
    pub tag: String,
    pub assets: Vec<Asset>,
    /// Sum of `download_count` over `assets`.
    pub total_downloads: u64,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_prerelease: bool,
    pub is_draft: bool,
}

impl Release {
    /// Build a release whose total is summed from `assets`.
    ///
    /// An empty `name` falls back to the tag.
    #[must_use]
    pub fn from_assets(
        name: impl Into<String>,
        tag: impl Into<String>,
        created_at: DateTime<Utc>,
        assets: Vec<Asset>,
    ) -> Self {
        let tag = tag.into();
        let name = name.into();
        let name = if name.is_empty() {
            tag.clone()
        } else {
            name
        };
        let total_downloads = assets.iter().map(|asset| asset.download_count).sum();

        Self {
            name,
            tag,
            assets,
            total_downloads,
            created_at,
            published_at: None,
            is_prerelease: false,
            is_draft: false,
        }
    }

    /// Set publication metadata.
    #[must_use]
    pub fn with_publication(
        mut self,
        published_at: Option<DateTime<Utc>>,
        is_prerelease: bool,
        is_draft: bool,
    ) -> Self {
        self.published_at = published_at;
        self.is_prerelease = is_prerelease;
        self.is_draft = is_draft;
        self
    }
}

/// A point-in-time snapshot of every release of one repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseStats {
    /// Generated once per fetch; groups the stored rows of this snapshot.
    pub snapshot_id: Uuid,
    pub owner: String,
    pub repo: String,
    pub releases: Vec<Release>,
    /// Sum of `total_downloads` over `releases`.
    pub total_downloads: u64,
    pub fetched_at: DateTime<Utc>,
}

impl ReleaseStats {
    /// Create an empty snapshot with a fresh identifier.
    ///
    /// `fetched_at` is truncated to microseconds, the precision the store
    /// keeps.
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, fetched_at: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), owner, repo, fetched_at)
    }

    /// Create an empty snapshot with a known identifier.
    #[must_use]
    pub fn with_id(
        snapshot_id: Uuid,
        owner: impl Into<String>,
        repo: impl Into<String>,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            snapshot_id,
            owner: owner.into(),
            repo: repo.into(),
            releases: Vec::new(),
            total_downloads: 0,
            fetched_at: fetched_at.trunc_subsecs(6),
        }
    }

    /// The empty result for a repository with nothing stored.
    #[must_use]
    pub fn empty(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self::with_id(Uuid::nil(), owner, repo, DateTime::<Utc>::default())
    }

    /// Append a release and add its downloads to the snapshot total.
    pub fn push_release(&mut self, release: Release) {
        self.total_downloads += release.total_downloads;
        self.releases.push(release);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// `owner/repo`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Find the first release carrying `tag`.
    #[must_use]
    pub fn release_by_tag(&self, tag: &str) -> Option<&Release> {
        self.releases.iter().find(|release| release.tag == tag)
    }
}
