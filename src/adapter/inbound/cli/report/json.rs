//! JSON documents emitted in `--json` mode.

use serde_json::{json, Value};

use crate::domain::{Comparison, ReleaseStats};
use crate::error::Result;

/// `fetch` result; `stored_in` is set when the snapshot was persisted.
pub fn fetch_to_json(stats: &ReleaseStats, stored_in: Option<&str>) -> Result<Value> {
    Ok(json!({
        "command": "fetch",
        "stats": serde_json::to_value(stats)?,
        "stored_in": stored_in,
    }))
}

/// `show` result; `stats` is null when nothing is stored.
pub fn latest_to_json(owner: &str, repo: &str, stats: Option<&ReleaseStats>) -> Result<Value> {
    Ok(json!({
        "command": "show",
        "owner": owner,
        "repo": repo,
        "stats": stats.map(serde_json::to_value).transpose()?,
    }))
}

pub fn history_to_json(owner: &str, repo: &str, history: &[ReleaseStats]) -> Result<Value> {
    Ok(json!({
        "command": "history",
        "owner": owner,
        "repo": repo,
        "count": history.len(),
        "history": serde_json::to_value(history)?,
    }))
}

/// `compare` result; `comparison` is null when fewer than two snapshots
/// fall in the window.
pub fn comparison_to_json(
    owner: &str,
    repo: &str,
    days: u32,
    found: usize,
    comparison: Option<&Comparison>,
    limit: usize,
) -> Result<Value> {
    let comparison = match comparison {
        Some(c) => json!({
            "oldest_fetched_at": c.oldest_fetched_at,
            "newest_fetched_at": c.newest_fetched_at,
            "total": serde_json::to_value(c.total)?,
            "top_releases": serde_json::to_value(c.top(limit))?,
        }),
        None => Value::Null,
    };

    Ok(json!({
        "command": "compare",
        "owner": owner,
        "repo": repo,
        "days": days,
        "snapshots": found,
        "comparison": comparison,
    }))
}
