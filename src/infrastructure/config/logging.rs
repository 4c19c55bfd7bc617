//! Logging configuration and initialization.

use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "warn".into()
}

impl LoggingConfig {
    /// Filter directive for the given `-v` count.
    ///
    /// Verbosity only ever raises the configured level. A configured
    /// directive that is not a plain level (`release_stats=trace`) is
    /// replaced by the `-v` level.
    #[must_use]
    pub fn effective_level(&self, verbosity: u8) -> &str {
        let (requested, name) = match verbosity {
            0 => return &self.level,
            1 => (LevelFilter::INFO, "info"),
            _ => (LevelFilter::DEBUG, "debug"),
        };

        match self.level.trim().parse::<LevelFilter>() {
            Ok(configured) if configured >= requested => &self.level,
            _ => name,
        }
    }

    /// Initialize the tracing subscriber on stderr.
    ///
    /// `RUST_LOG` takes precedence over the configured level.
    pub fn init(&self, verbosity: u8) {
        let level = self.effective_level(verbosity);
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        match self.format {
            LogFormat::Json => {
                fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            LogFormat::Pretty => {
                fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}
