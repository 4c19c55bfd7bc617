//! GitHub REST API response types.
//!
//! Only the fields the snapshot needs are deserialized; everything else in
//! the payload is ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{Asset, Release};

/// One entry of `GET /repos/{owner}/{repo}/releases`.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubRelease {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub assets: Vec<GithubAsset>,
}

/// A release asset.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubAsset {
    pub name: String,
    #[serde(default)]
    pub download_count: u64,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub content_type: Option<String>,
}

impl From<GithubAsset> for Asset {
    fn from(a: GithubAsset) -> Self {
        Self {
            name: a.name,
            download_count: a.download_count,
            size_bytes: a.size,
            content_type: a.content_type.unwrap_or_default(),
        }
    }
}

impl From<GithubRelease> for Release {
    fn from(r: GithubRelease) -> Self {
        let assets = r.assets.into_iter().map(Asset::from).collect();
        Release::from_assets(r.name.unwrap_or_default(), r.tag_name, r.created_at, assets)
            .with_publication(r.published_at, r.prerelease, r.draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELEASES_JSON: &str = r#"[
        {
            "id": 1,
            "tag_name": "v1.2.0",
            "name": "Version 1.2.0",
            "draft": false,
            "prerelease": true,
            "created_at": "2024-04-01T10:00:00Z",
            "published_at": "2024-04-02T11:30:00Z",
            "assets": [
                {"name": "tool-linux.tar.gz", "download_count": 120, "size": 2048, "content_type": "application/gzip"},
                {"name": "tool-macos.zip", "download_count": 30, "size": 4096, "content_type": "application/zip"}
            ]
        },
        {
            "tag_name": "v1.1.0",
            "name": "",
            "draft": true,
            "prerelease": false,
            "created_at": "2024-03-01T10:00:00Z",
            "published_at": null,
            "assets": []
        }
    ]"#;

    #[test]
    fn deserializes_release_listing() {
        let releases: Vec<GithubRelease> = serde_json::from_str(RELEASES_JSON).unwrap();

        assert_eq!(releases.len(), 2);
        assert_eq!(releases[0].tag_name, "v1.2.0");
        assert_eq!(releases[0].assets.len(), 2);
        assert!(releases[1].published_at.is_none());
    }

    #[test]
    fn release_converts_with_summed_downloads() {
        let mut releases: Vec<GithubRelease> = serde_json::from_str(RELEASES_JSON).unwrap();
        let release = Release::from(releases.remove(0));

        assert_eq!(release.name, "Version 1.2.0");
        assert_eq!(release.tag, "v1.2.0");
        assert_eq!(release.total_downloads, 150);
        assert!(release.is_prerelease);
        assert!(!release.is_draft);
        assert!(release.published_at.is_some());
        assert_eq!(release.assets[1].content_type, "application/zip");
        assert_eq!(release.assets[0].size_bytes, 2048);
    }

    #[test]
    fn blank_name_falls_back_to_tag() {
        let mut releases: Vec<GithubRelease> = serde_json::from_str(RELEASES_JSON).unwrap();
        let release = Release::from(releases.remove(1));

        assert_eq!(release.name, "v1.1.0");
        assert_eq!(release.total_downloads, 0);
        assert!(release.is_draft);
    }

    #[test]
    fn missing_optional_asset_fields_default() {
        let asset: GithubAsset = serde_json::from_str(r#"{"name": "bare.bin"}"#).unwrap();
        let asset = Asset::from(asset);

        assert_eq!(asset.download_count, 0);
        assert_eq!(asset.size_bytes, 0);
        assert_eq!(asset.content_type, "");
    }
}
