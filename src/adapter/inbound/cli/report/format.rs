//! Human-readable rendering of snapshots, history, and comparisons.

use chrono::{DateTime, Utc};
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::adapter::inbound::cli::output;
use crate::domain::{Comparison, Growth, ReleaseStats};

/// Releases listed per snapshot in `history`.
pub const HISTORY_TOP_RELEASES: usize = 3;

/// Timestamp format for fetch times.
fn fetched_at(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn date(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// `+N (+P.PP%)`, with explicit sign on both parts.
pub fn growth_text(growth: &Growth) -> String {
    format!("{:+} ({:+.2}%)", growth.delta, growth.percent)
}

/// Render the release table of a snapshot.
///
/// Detailed mode adds one row per asset under its release.
pub fn release_table(stats: &ReleaseStats, detailed: bool) -> String {
    let downloads_header = if detailed { "TOTAL DOWNLOADS" } else { "DOWNLOADS" };

    let mut builder = Builder::default();
    builder.push_record([
        "RELEASE".to_string(),
        "TAG".to_string(),
        "ASSETS".to_string(),
        downloads_header.to_string(),
        "CREATED AT".to_string(),
    ]);

    for release in &stats.releases {
        builder.push_record([
            release.name.clone(),
            release.tag.clone(),
            release.assets.len().to_string(),
            release.total_downloads.to_string(),
            date(&release.created_at),
        ]);
        if detailed {
            for asset in &release.assets {
                builder.push_record([
                    format!("  → {}", asset.name),
                    String::new(),
                    String::new(),
                    format!("{} downloads", asset.download_count),
                    String::new(),
                ]);
            }
        }
    }

    let mut table = builder.build();
    table.with(Style::blank());
    table.to_string()
}

/// Print a snapshot summary and its release table.
pub fn print_stats(stats: &ReleaseStats, detailed: bool) {
    output::section(&format!("Download Statistics for {}", stats.full_name()));
    output::field("Releases", stats.releases.len());
    output::field("Downloads", stats.total_downloads);
    println_blank();
    output::lines(&release_table(stats, detailed));
}

/// Print the latest stored snapshot.
pub fn print_latest(stats: &ReleaseStats) {
    output::section(&format!("Latest Statistics for {}", stats.full_name()));
    output::field("Fetched at", fetched_at(&stats.fetched_at));
    output::field("Releases", stats.releases.len());
    output::field("Downloads", stats.total_downloads);
    println_blank();
    output::lines(&release_table(stats, false));
}

/// Lines describing one history entry, numbered from 1.
pub fn history_entry(index: usize, stats: &ReleaseStats) -> String {
    let mut text = format!(
        "[{}] Fetched at: {} | Total Releases: {} | Total Downloads: {}",
        index,
        fetched_at(&stats.fetched_at),
        stats.releases.len(),
        stats.total_downloads
    );
    if !stats.releases.is_empty() {
        text.push_str("\n    Top 3 releases:");
        for release in stats.releases.iter().take(HISTORY_TOP_RELEASES) {
            text.push_str(&format!(
                "\n      - {} ({}): {} downloads",
                release.name, release.tag, release.total_downloads
            ));
        }
    }
    text
}

/// Print snapshot history, most recent first.
pub fn print_history(owner: &str, repo: &str, history: &[ReleaseStats]) {
    output::section(&format!(
        "Statistics History for {owner}/{repo} (last {} fetches)",
        history.len()
    ));
    for (i, stats) in history.iter().enumerate() {
        println_blank();
        output::lines(&history_entry(i + 1, stats));
    }
}

/// Ranked per-release growth lines, numbered from 1.
pub fn ranking_lines(comparison: &Comparison, limit: usize) -> Vec<String> {
    comparison
        .top(limit)
        .iter()
        .enumerate()
        .map(|(i, release)| {
            format!(
                "{}. {} ({}): {}",
                i + 1,
                release.name,
                release.tag,
                output::signed(release.growth.delta, growth_text(&release.growth))
            )
        })
        .collect()
}

/// Print a comparison between the oldest and newest snapshot of a window.
pub fn print_comparison(
    owner: &str,
    repo: &str,
    label: &str,
    comparison: &Comparison,
    limit: usize,
) {
    output::section(&format!("Download Statistics Comparison for {owner}/{repo}"));
    output::field("Period", label);
    output::lines(&format!(
        "Oldest: {} | Newest: {}",
        date(&comparison.oldest_fetched_at),
        date(&comparison.newest_fetched_at)
    ));

    output::section("Total Downloads");
    output::field("Oldest", comparison.total.before);
    output::field("Newest", comparison.total.after);
    output::field(
        "Growth",
        output::signed(comparison.total.delta, growth_text(&comparison.total)),
    );

    output::section(&format!("Top {limit} releases by growth"));
    let lines = ranking_lines(comparison, limit);
    if lines.is_empty() {
        output::note("No releases appear in both snapshots");
    } else {
        output::lines(&lines.join("\n"));
    }
}

fn println_blank() {
    if !output::is_json() && !output::is_quiet() {
        println!();
    }
}
