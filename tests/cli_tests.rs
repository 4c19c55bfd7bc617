//! CLI integration tests.

mod support;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use support::{seed_two_snapshots, TempStore};

/// The binary with a private home directory and no ambient settings.
fn release_stats(home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("release-stats");
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("GITHUB_TOKEN")
        .env_remove("RELEASE_STATS_DB")
        .env_remove("RELEASE_STATS_API_URL")
        .env_remove("RUST_LOG")
        .arg("--color")
        .arg("never");
    cmd
}

#[test]
fn test_help() {
    let home = tempfile::tempdir().unwrap();
    release_stats(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("history"))
        .stdout(predicate::str::contains("compare"));
}

#[test]
fn test_version() {
    let home = tempfile::tempdir().unwrap();
    release_stats(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("release-stats"));
}

#[test]
fn test_unknown_command_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    release_stats(&home).arg("prune").assert().code(2);
}

#[test]
fn test_show_on_empty_database() {
    let temp = TempStore::create();
    release_stats(&temp.dir)
        .args(["show", "octo", "tool", "--db"])
        .arg(temp.db_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No statistics found for octo/tool"));
}

#[test]
fn test_history_on_empty_database() {
    let temp = TempStore::create();
    release_stats(&temp.dir)
        .args(["history", "octo", "tool", "--db"])
        .arg(temp.db_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No history found for octo/tool"));
}

#[test]
fn test_compare_on_empty_database() {
    let temp = TempStore::create();
    release_stats(&temp.dir)
        .args(["compare", "octo", "tool", "--db"])
        .arg(temp.db_path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Need at least 2 data points to compare (found 0)",
        ));
}

#[test]
fn test_show_creates_database_in_missing_directory() {
    let home = tempfile::tempdir().unwrap();
    let db = home.path().join("a").join("b").join("stats.db");

    release_stats(&home)
        .args(["show", "octo", "tool", "--db"])
        .arg(&db)
        .assert()
        .success();

    assert!(db.exists());
}

#[test]
fn test_database_from_environment() {
    let temp = TempStore::create();
    seed_two_snapshots(&temp.store);

    release_stats(&temp.dir)
        .env("RELEASE_STATS_DB", temp.db_path())
        .args(["show", "octo", "tool"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Latest Statistics for octo/tool"));
}

#[test]
fn test_fetch_without_owner_is_config_error() {
    let home = tempfile::tempdir().unwrap();
    release_stats(&home)
        .args(["fetch", "-r", "tool"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing required field: owner"));
}

#[test]
fn test_fetch_with_blank_repo_is_config_error() {
    let home = tempfile::tempdir().unwrap();
    release_stats(&home)
        .args(["fetch", "-o", "octo", "-r", " "])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing required field: repo"));
}

#[test]
fn test_fetch_against_unreachable_api_fails() {
    let home = tempfile::tempdir().unwrap();
    release_stats(&home)
        .env("RELEASE_STATS_API_URL", "http://127.0.0.1:9")
        .args(["fetch", "-o", "octo", "-r", "tool", "--timeout", "10"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("HTTP error"));
}

#[test]
fn test_invalid_config_file_fails() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("config.toml");
    std::fs::write(&config, "[github]\nper_page = 0\n").unwrap();

    release_stats(&home)
        .arg("--config")
        .arg(&config)
        .args(["show", "octo", "tool"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load config"))
        .stderr(predicate::str::contains("github.per_page"));
}

#[test]
fn test_missing_config_file_fails() {
    let home = tempfile::tempdir().unwrap();
    release_stats(&home)
        .args(["--config", "does-not-exist.toml", "show", "octo", "tool"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn test_config_file_sets_database() {
    let temp = TempStore::create();
    seed_two_snapshots(&temp.store);
    let config = temp.dir.path().join("settings.toml");
    std::fs::write(
        &config,
        format!("[database]\npath = {:?}\n", temp.db_path().display().to_string()),
    )
    .unwrap();

    release_stats(&temp.dir)
        .arg("--config")
        .arg(&config)
        .args(["history", "octo", "tool"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[2] Fetched at:"));
}

#[test]
fn test_show_seeded_database() {
    let temp = TempStore::create();
    seed_two_snapshots(&temp.store);

    release_stats(&temp.dir)
        .args(["show", "octo", "tool", "--db"])
        .arg(temp.db_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Latest Statistics for octo/tool"))
        .stdout(predicate::str::contains("Fetched at"))
        .stdout(predicate::str::contains("DOWNLOADS"))
        .stdout(predicate::str::contains("v1.2.0"))
        .stdout(predicate::str::contains("150"));
}

#[test]
fn test_history_seeded_database() {
    let temp = TempStore::create();
    seed_two_snapshots(&temp.store);

    release_stats(&temp.dir)
        .args(["history", "octo", "tool", "--db"])
        .arg(temp.db_path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[1] Fetched at:",
        ))
        .stdout(predicate::str::contains("Total Releases: 3 | Total Downloads: 150"))
        .stdout(predicate::str::contains("Total Releases: 2 | Total Downloads: 100"))
        .stdout(predicate::str::contains("Top 3 releases:"));
}

#[test]
fn test_history_limit() {
    let temp = TempStore::create();
    seed_two_snapshots(&temp.store);

    release_stats(&temp.dir)
        .args(["history", "octo", "tool", "--limit", "1", "--db"])
        .arg(temp.db_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] Fetched at:"))
        .stdout(predicate::str::contains("[2]").not());
}

#[test]
fn test_compare_seeded_database() {
    let temp = TempStore::create();
    seed_two_snapshots(&temp.store);

    release_stats(&temp.dir)
        .args(["compare", "octo", "tool", "--db"])
        .arg(temp.db_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Last 30 days"))
        .stdout(predicate::str::contains("+50 (+50.00%)"))
        .stdout(predicate::str::contains(
            "1. Release v1.1.0 (v1.1.0): +30 (+75.00%)",
        ))
        .stdout(predicate::str::contains(
            "2. Release v1.0.0 (v1.0.0): +10 (+16.67%)",
        ))
        .stdout(predicate::str::contains("v1.2.0").not());
}

#[test]
fn test_compare_window_too_short() {
    let temp = TempStore::create();
    seed_two_snapshots(&temp.store);

    release_stats(&temp.dir)
        .args(["compare", "octo", "tool", "--days", "3", "--db"])
        .arg(temp.db_path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Need at least 2 data points to compare (found 1)",
        ));
}

#[test]
fn test_show_json() {
    let temp = TempStore::create();
    seed_two_snapshots(&temp.store);

    let assert = release_stats(&temp.dir)
        .args(["--json", "show", "octo", "tool", "--db"])
        .arg(temp.db_path())
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(value["command"], "show");
    assert_eq!(value["stats"]["total_downloads"], 150);
    assert_eq!(value["stats"]["releases"].as_array().unwrap().len(), 3);
}

#[test]
fn test_compare_json() {
    let temp = TempStore::create();
    seed_two_snapshots(&temp.store);

    let assert = release_stats(&temp.dir)
        .args(["compare", "octo", "tool", "--json", "--db"])
        .arg(temp.db_path())
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(value["snapshots"], 2);
    assert_eq!(value["comparison"]["total"]["delta"], 50);
    assert_eq!(value["comparison"]["top_releases"][0]["tag"], "v1.1.0");
}

#[test]
fn test_quiet_show_prints_nothing() {
    let temp = TempStore::create();
    seed_two_snapshots(&temp.store);

    release_stats(&temp.dir)
        .args(["-q", "show", "octo", "tool", "--db"])
        .arg(temp.db_path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_compare_with_oversized_window_fails_cleanly() {
    let temp = TempStore::create();
    release_stats(&temp.dir)
        .args(["compare", "octo", "tool", "--days", "4294967295", "--db"])
        .arg(temp.db_path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid value for days"));
}

/// Answer every request with one page holding a single release.
fn serve_one_release() -> String {
    use std::io::{Read, Write};

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { return };
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => buf.extend_from_slice(&chunk[..n]),
                }
            }
            let body = r#"[{"tag_name":"v3.1.4","name":"Pi","created_at":"2024-03-14T00:00:00Z","assets":[{"name":"pi.zip","download_count":31,"size":4,"content_type":"application/zip"}]}]"#;
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{addr}")
}

#[test]
fn test_fetch_prints_table_before_store_failure() {
    let home = tempfile::tempdir().unwrap();
    let blocker = home.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();

    release_stats(&home)
        .env("RELEASE_STATS_API_URL", serve_one_release())
        .args(["fetch", "-o", "octo", "-r", "tool", "--store", "--db"])
        .arg(blocker.join("stats.db"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("v3.1.4"))
        .stdout(predicate::str::contains("31"))
        .stderr(predicate::str::contains("failed to create database directory"));
}

#[test]
fn test_fetch_and_store_then_show() {
    let temp = TempStore::create();
    let api = serve_one_release();

    release_stats(&temp.dir)
        .env("RELEASE_STATS_API_URL", &api)
        .args(["fetch", "-o", "octo", "-r", "tool", "-s", "--db"])
        .arg(temp.db_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Statistics stored in"));

    release_stats(&temp.dir)
        .args(["show", "octo", "tool", "--db"])
        .arg(temp.db_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Pi"))
        .stdout(predicate::str::contains("v3.1.4"));
}
