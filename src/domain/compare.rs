//! Oldest-versus-newest snapshot comparison.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::release::ReleaseStats;

/// Number of releases shown in a growth ranking.
pub const TOP_GROWTH_RELEASES: usize = 5;

/// Change in a download counter between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Growth {
    pub before: u64,
    pub after: u64,
    /// `after - before`. Negative when a counter went down.
    pub delta: i64,
    /// `delta / before * 100`, or 0 when `before` is 0.
    pub percent: f64,
}

impl Growth {
    #[must_use]
    pub fn between(before: u64, after: u64) -> Self {
        let delta = saturating_delta(before, after);
        let percent = if before == 0 {
            0.0
        } else {
            delta as f64 / before as f64 * 100.0
        };

        Self {
            before,
            after,
            delta,
            percent,
        }
    }
}

fn saturating_delta(before: u64, after: u64) -> i64 {
    let delta = i128::from(after) - i128::from(before);
    i64::try_from(delta).unwrap_or(if delta > 0 { i64::MAX } else { i64::MIN })
}

/// Growth of a single release present in both snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseGrowth {
    pub name: String,
    pub tag: String,
    pub growth: Growth,
}

/// Result of comparing two snapshots of the same repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub oldest_fetched_at: DateTime<Utc>,
    pub newest_fetched_at: DateTime<Utc>,
    pub total: Growth,
    /// Releases matched by tag, ranked by `growth.delta` descending, then
    /// tag ascending.
    pub releases: Vec<ReleaseGrowth>,
}

impl Comparison {
    /// Compare `oldest` against `newest`.
    ///
    /// Each newest release is matched with the first oldest release carrying
    /// the same tag. Releases that only exist in `newest` have no baseline
    /// and are left out.
    #[must_use]
    pub fn between(oldest: &ReleaseStats, newest: &ReleaseStats) -> Self {
        let mut releases: Vec<ReleaseGrowth> = newest
            .releases
            .iter()
            .filter_map(|new_release| {
                oldest.release_by_tag(&new_release.tag).map(|old_release| ReleaseGrowth {
                    name: new_release.name.clone(),
                    tag: new_release.tag.clone(),
                    growth: Growth::between(
                        old_release.total_downloads,
                        new_release.total_downloads,
                    ),
                })
            })
            .collect();

        releases.sort_by(|left, right| {
            right
                .growth
                .delta
                .cmp(&left.growth.delta)
                .then_with(|| left.tag.cmp(&right.tag))
        });

        Self {
            oldest_fetched_at: oldest.fetched_at,
            newest_fetched_at: newest.fetched_at,
            total: Growth::between(oldest.total_downloads, newest.total_downloads),
            releases,
        }
    }

    /// The `n` fastest-growing releases, or fewer if fewer matched.
    #[must_use]
    pub fn top(&self, n: usize) -> &[ReleaseGrowth] {
        &self.releases[..n.min(self.releases.len())]
    }
}
