//! Command-line interface definitions.
//!
//! Defines the CLI structure for release-stats using `clap`: fetching a
//! repository's release downloads, and reading back stored snapshots.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::port::DEFAULT_HISTORY_LIMIT;

/// Default comparison window in days.
pub const DEFAULT_COMPARE_DAYS: u32 = 30;

/// GitHub release download statistics
#[derive(Parser, Debug)]
#[command(name = "release-stats")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch release download statistics from GitHub
    Fetch(FetchArgs),

    /// Show the latest stored statistics for a repository
    Show(ShowArgs),

    /// Show stored snapshots, most recent first
    History(HistoryArgs),

    /// Compare download growth over a recent period
    Compare(CompareArgs),
}

/// Database location shared by every command that touches storage.
#[derive(Args, Debug, Clone, Default)]
pub struct DatabaseArg {
    /// Path to the SQLite database file
    #[arg(long)]
    pub db: Option<PathBuf>,
}

/// Repository named positionally as `OWNER REPO`.
#[derive(Args, Debug, Clone)]
pub struct RepositoryArgs {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
}

/// Arguments for the `fetch` subcommand.
#[derive(Parser, Debug)]
pub struct FetchArgs {
    /// Repository owner
    #[arg(short, long)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(short, long)]
    pub repo: Option<String>,

    /// GitHub token (overrides GITHUB_TOKEN and the config file)
    #[arg(short, long)]
    pub token: Option<String>,

    /// Show per-asset download counts
    #[arg(short, long)]
    pub detailed: bool,

    /// Store the snapshot in the database
    #[arg(short, long)]
    pub store: bool,

    /// Give up if the whole fetch takes longer than this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    #[command(flatten)]
    pub database: DatabaseArg,
}

/// Arguments for the `show` subcommand.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub repository: RepositoryArgs,

    #[command(flatten)]
    pub database: DatabaseArg,
}

/// Arguments for the `history` subcommand.
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    #[command(flatten)]
    pub repository: RepositoryArgs,

    /// Number of snapshots to show
    #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
    pub limit: i64,

    #[command(flatten)]
    pub database: DatabaseArg,
}

/// Arguments for the `compare` subcommand.
#[derive(Parser, Debug)]
pub struct CompareArgs {
    #[command(flatten)]
    pub repository: RepositoryArgs,

    /// Compare snapshots from the last N days
    #[arg(long, default_value_t = DEFAULT_COMPARE_DAYS)]
    pub days: u32,

    #[command(flatten)]
    pub database: DatabaseArg,
}
