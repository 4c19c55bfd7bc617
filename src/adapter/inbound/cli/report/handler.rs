//! Handlers for `fetch`, `show`, `history`, and `compare`.
//!
//! Each handler opens what it needs, runs one port operation, and renders
//! the result as text or as a single JSON document.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::adapter::inbound::cli::command::{
    CompareArgs, DatabaseArg, FetchArgs, HistoryArgs, ShowArgs,
};
use crate::adapter::inbound::cli::{output, paths};
use crate::adapter::outbound::github::GithubClient;
use crate::adapter::outbound::sqlite::SqliteSnapshotStore;
use crate::domain::{Comparison, ReleaseStats, TOP_GROWTH_RELEASES};
use crate::error::Result;
use crate::infrastructure::config::Settings;
use crate::port::{FetchRequest, ReleaseFetcher, SnapshotStore};

use super::format::{print_comparison, print_history, print_latest, print_stats};
use super::json::{comparison_to_json, fetch_to_json, history_to_json, latest_to_json};
use super::range::TimeWindow;

/// Resolve the database file: `--db`, then settings, then the default.
pub fn database_path(arg: &DatabaseArg, settings: &Settings) -> PathBuf {
    arg.db
        .clone()
        .or_else(|| settings.database.path.clone())
        .unwrap_or_else(paths::default_database)
}

/// Build the fetch request: flags win over settings.
pub fn fetch_request(args: &FetchArgs, settings: &Settings) -> FetchRequest {
    FetchRequest::new(
        args.owner.clone().unwrap_or_default(),
        args.repo.clone().unwrap_or_default(),
    )
    .with_token(args.token.clone().or_else(|| settings.github.token.clone()))
    .with_deadline(args.timeout.map(Duration::from_secs))
}

/// Execute `fetch`.
pub async fn execute_fetch(args: &FetchArgs, settings: &Settings) -> Result<()> {
    let request = fetch_request(args, settings);
    request.validate()?;

    let client = GithubClient::from_config(&settings.github);
    let db_path = args
        .store
        .then(|| database_path(&args.database, settings));

    fetch_and_report(&client, &request, args.detailed, db_path.as_deref()).await
}

/// Fetch a snapshot, optionally persist it, and render it.
pub async fn fetch_and_report(
    fetcher: &dyn ReleaseFetcher,
    request: &FetchRequest,
    detailed: bool,
    db_path: Option<&Path>,
) -> Result<()> {
    let repository = format!("{}/{}", request.owner, request.repo);
    let pb = output::spinner(&format!("Fetching releases for {repository}"));

    let stats = match fetcher.fetch(request).await {
        Ok(stats) => stats,
        Err(e) => {
            output::spinner_fail(&pb, &format!("Failed to fetch releases for {repository}"));
            return Err(e);
        }
    };
    output::spinner_success(
        &pb,
        &format!("Fetched {} releases for {repository}", stats.releases.len()),
    );

    if stats.is_empty() {
        info!(repository = %repository, "No releases found");
        if output::is_json() {
            output::json_output(fetch_to_json(&stats, None)?);
        } else {
            output::warning(&format!("No releases found for {repository}"));
        }
        return Ok(());
    }

    if output::is_json() {
        let stored_in = db_path.map(|path| store_snapshot(path, &stats)).transpose()?;
        output::json_output(fetch_to_json(&stats, stored_in.as_deref())?);
        return Ok(());
    }

    print_stats(&stats, detailed);
    if let Some(path) = db_path {
        let stored_in = store_snapshot(path, &stats)?;
        output::success(&format!("Statistics stored in {stored_in}"));
    }
    Ok(())
}

/// Persist `stats` in the database at `path`, returning the path shown to
/// the user.
fn store_snapshot(path: &Path, stats: &ReleaseStats) -> Result<String> {
    let store = SqliteSnapshotStore::open(path)?;
    store.store_stats(stats)?;
    Ok(path.display().to_string())
}

/// Execute `show`.
pub fn execute_show(args: &ShowArgs, settings: &Settings) -> Result<()> {
    let store = SqliteSnapshotStore::open(database_path(&args.database, settings))?;
    show_latest(&store, &args.repository.owner, &args.repository.repo)
}

/// Render the latest stored snapshot of `owner/repo`.
pub fn show_latest(store: &dyn SnapshotStore, owner: &str, repo: &str) -> Result<()> {
    let stats = store.latest_stats(owner, repo)?;
    debug!(owner, repo, releases = stats.releases.len(), "Loaded latest snapshot");

    if output::is_json() {
        let found = (!stats.is_empty()).then_some(&stats);
        output::json_output(latest_to_json(owner, repo, found)?);
        return Ok(());
    }

    if stats.is_empty() {
        output::warning(&format!("No statistics found for {owner}/{repo}"));
        return Ok(());
    }

    print_latest(&stats);
    Ok(())
}

/// Execute `history`.
pub fn execute_history(args: &HistoryArgs, settings: &Settings) -> Result<()> {
    let store = SqliteSnapshotStore::open(database_path(&args.database, settings))?;
    show_history(
        &store,
        &args.repository.owner,
        &args.repository.repo,
        args.limit,
    )
}

/// Render up to `limit` stored snapshots of `owner/repo`, newest first.
pub fn show_history(
    store: &dyn SnapshotStore,
    owner: &str,
    repo: &str,
    limit: i64,
) -> Result<()> {
    let history = store.stats_history(owner, repo, limit)?;

    if output::is_json() {
        output::json_output(history_to_json(owner, repo, &history)?);
        return Ok(());
    }

    if history.is_empty() {
        output::warning(&format!("No history found for {owner}/{repo}"));
        return Ok(());
    }

    print_history(owner, repo, &history);
    Ok(())
}

/// Execute `compare`.
pub fn execute_compare(args: &CompareArgs, settings: &Settings) -> Result<()> {
    let window = TimeWindow::last_days(args.days)?;
    let store = SqliteSnapshotStore::open(database_path(&args.database, settings))?;
    show_comparison(
        &store,
        &args.repository.owner,
        &args.repository.repo,
        &window,
        args.days,
    )
}

/// Compare the oldest and newest snapshot inside `window`.
pub fn show_comparison(
    store: &dyn SnapshotStore,
    owner: &str,
    repo: &str,
    window: &TimeWindow,
    days: u32,
) -> Result<()> {
    let snapshots = store.stats_between(owner, repo, window.start, window.end)?;
    let comparison = compare_window(&snapshots);
    debug!(owner, repo, found = snapshots.len(), "Loaded snapshots for comparison");

    if output::is_json() {
        output::json_output(comparison_to_json(
            owner,
            repo,
            days,
            snapshots.len(),
            comparison.as_ref(),
            TOP_GROWTH_RELEASES,
        )?);
        return Ok(());
    }

    let Some(comparison) = comparison else {
        output::warning(&format!(
            "Need at least 2 data points to compare (found {})",
            snapshots.len()
        ));
        return Ok(());
    };

    print_comparison(owner, repo, &window.label, &comparison, TOP_GROWTH_RELEASES);
    Ok(())
}

/// Compare the oldest and newest of `snapshots` (ordered newest first).
///
/// Returns `None` with fewer than two snapshots.
pub fn compare_window(snapshots: &[ReleaseStats]) -> Option<Comparison> {
    if snapshots.len() < 2 {
        return None;
    }
    let newest = snapshots.first()?;
    let oldest = snapshots.last()?;
    Some(Comparison::between(oldest, newest))
}
