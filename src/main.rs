use clap::Parser;
use release_stats::adapter::inbound::cli::command::Cli;
use release_stats::adapter::inbound::cli::output::{self, OutputConfig};
use release_stats::adapter::inbound::cli::{dispatch, paths};
use release_stats::infrastructure::config::Settings;
use tracing::{debug, error};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));
    output::configure_color(&cli.color);

    let settings = match Settings::load(cli.config.as_deref(), &paths::default_config()) {
        Ok(settings) => settings,
        Err(e) => {
            output::error(&format!("Failed to load config: {e}"));
            std::process::exit(1);
        }
    };

    settings.logging.init(output::verbosity());
    debug!(version = env!("CARGO_PKG_VERSION"), "release-stats starting");

    if let Err(e) = dispatch(&cli.command, &settings).await {
        error!(error = %e, "Command failed");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
