//! CLI output formatting.
//!
//! Human output goes to stdout with coloured symbols; `--json` switches
//! every command to a single JSON document and `--quiet` silences the rest.
//! Errors always go to stderr.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::{OwoColorize, Stream};
use serde_json::json;

use super::command::ColorChoice;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Verbosity level (0 = normal, 1+ = increasingly verbose).
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn write_config(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Human output is skipped in JSON mode and in quiet mode.
fn human_output_suppressed(config: OutputConfig) -> bool {
    config.json || config.quiet
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    write_config(config);
}

/// Apply the `--color` choice. `Auto` leaves terminal detection in charge.
pub fn configure_color(choice: &ColorChoice) {
    match choice {
        ColorChoice::Auto => owo_colors::unset_override(),
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
    }
}

#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

#[must_use]
pub fn is_quiet() -> bool {
    read_config().quiet
}

/// Return the global verbosity level from `-v` flags.
#[must_use]
pub fn verbosity() -> u8 {
    read_config().verbose
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    if human_output_suppressed(read_config()) {
        return;
    }
    println!("  {:<14} {}", muted(label), value);
}

/// Print a success line.
pub fn success(message: &str) {
    if human_output_suppressed(read_config()) {
        return;
    }
    println!(
        "  {} {}",
        "✓".if_supports_color(Stream::Stdout, |s| s.green()),
        message
    );
}

/// Print a warning line. Shown in quiet mode too.
pub fn warning(message: &str) {
    if read_config().json {
        return;
    }
    println!(
        "  {} {}",
        "⚠".if_supports_color(Stream::Stdout, |s| s.yellow()),
        message
    );
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    if read_config().json {
        eprintln!(
            "{}",
            json!({
                "type": "error",
                "payload": { "message": message },
            })
        );
        return;
    }

    eprintln!(
        "  {} {}",
        "×".if_supports_color(Stream::Stderr, |s| s.red()),
        message
    );
}

/// Print a section header.
pub fn section(title: &str) {
    if human_output_suppressed(read_config()) {
        return;
    }
    println!();
    println!("{}", title.if_supports_color(Stream::Stdout, |s| s.bold()));
}

/// Print multiple lines of content, each indented.
pub fn lines(content: &str) {
    if human_output_suppressed(read_config()) {
        return;
    }
    for line in content.lines() {
        println!("  {line}");
    }
}

/// Print a dimmed note.
pub fn note(message: &str) {
    if human_output_suppressed(read_config()) {
        return;
    }
    println!("  {}", muted(message));
}

/// Emit a JSON document on stdout.
pub fn json_output(value: serde_json::Value) {
    println!("{value}");
}

const BRAILLE_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Create and start a progress spinner on stderr.
///
/// Returns a hidden progress bar in JSON or quiet mode.
pub fn spinner(message: &str) -> indicatif::ProgressBar {
    let config = read_config();
    if human_output_suppressed(config) {
        let pb = indicatif::ProgressBar::hidden();
        pb.set_message(message.to_string());
        return pb;
    }

    let style = indicatif::ProgressStyle::default_spinner()
        .tick_strings(BRAILLE_SPINNER)
        .template("  {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner());

    let pb = indicatif::ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Finish a spinner with a success checkmark.
pub fn spinner_success(pb: &indicatif::ProgressBar, message: &str) {
    if human_output_suppressed(read_config()) {
        pb.finish_and_clear();
        return;
    }
    pb.finish_with_message(format!(
        "{} {}",
        "✓".if_supports_color(Stream::Stderr, |s| s.green()),
        message
    ));
}

/// Finish a spinner with a failure mark.
pub fn spinner_fail(pb: &indicatif::ProgressBar, message: &str) {
    if read_config().json {
        pb.finish_and_clear();
        return;
    }
    pb.finish_with_message(format!(
        "{} {}",
        "×".if_supports_color(Stream::Stderr, |s| s.red()),
        message
    ));
}

/// Format a signed delta: green when growing, red when shrinking.
pub fn signed(delta: i64, text: impl Display) -> String {
    let text = text.to_string();
    if delta > 0 {
        text.if_supports_color(Stream::Stdout, |s| s.green())
            .to_string()
    } else if delta < 0 {
        text.if_supports_color(Stream::Stdout, |s| s.red()).to_string()
    } else {
        text
    }
}

/// Format a dimmed/muted value.
pub fn muted(value: impl Display) -> String {
    let value = value.to_string();
    value
        .if_supports_color(Stream::Stdout, |s| s.dimmed())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_and_json_suppress_human_output() {
        assert!(human_output_suppressed(OutputConfig::new(true, false, 0)));
        assert!(human_output_suppressed(OutputConfig::new(false, true, 0)));
        assert!(!human_output_suppressed(OutputConfig::new(false, false, 2)));
    }

    #[test]
    fn never_colour_leaves_text_plain() {
        configure_color(&ColorChoice::Never);
        assert_eq!(muted("abc"), "abc");
        assert_eq!(signed(5, "+5"), "+5");
        assert_eq!(signed(-5, "-5"), "-5");
        owo_colors::unset_override();
    }
}
