//! CLI module graph.

pub mod command;
pub mod output;
pub mod paths;
pub mod report;

use crate::error::Result;
use crate::infrastructure::config::Settings;

use command::Commands;
use report::handler;

/// Run one parsed subcommand to completion.
pub async fn dispatch(command: &Commands, settings: &Settings) -> Result<()> {
    match command {
        Commands::Fetch(args) => handler::execute_fetch(args, settings).await,
        Commands::Show(args) => handler::execute_show(args, settings),
        Commands::History(args) => handler::execute_history(args, settings),
        Commands::Compare(args) => handler::execute_compare(args, settings),
    }
}
