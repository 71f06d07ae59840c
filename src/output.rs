//! Spinner and colored result output.
//!
//! Machine-readable values printed by `detect` bypass this module; it only
//! handles human-facing feedback, which respects the configured verbosity.

use crate::config::Config;
use crate::constants::PROGRESS_TICK_MS;
use crate::target::{BumpOutcome, TargetFile};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while the GitHub request is in flight.
/// Uses `Option` to avoid allocation when progress is hidden (quiet/verbose modes).
pub struct FetchProgress {
    spinner: Option<ProgressBar>,
}

impl FetchProgress {
    pub fn finish(&self) {
        if let Some(spinner) = &self.spinner {
            spinner.finish_and_clear();
        }
    }
}

/// Creates a spinner for the latest-version request.
/// Returns a hidden tracker in quiet or verbose mode.
#[must_use]
pub fn create_fetch_progress(config: &Config, url: &str) -> FetchProgress {
    let spinner = if config.is_quiet() || config.is_verbose() {
        None
    } else {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(format_fetch_message(url));
        spinner.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_MS));
        Some(spinner)
    };

    FetchProgress { spinner }
}

fn format_fetch_message(url: &str) -> String {
    format!("Fetching {}...", url)
}

/// Prints the result of `bump` unless quiet.
pub fn print_bump_outcome(config: &Config, target: &TargetFile, outcome: &BumpOutcome) {
    if config.is_quiet() {
        return;
    }
    println!("{}", format_bump_outcome(target, outcome));
}

fn format_bump_outcome(target: &TargetFile, outcome: &BumpOutcome) -> String {
    match outcome {
        BumpOutcome::Updated { from, to } => format!(
            "{} {} {} {} {}",
            "✓".green(),
            target.name.white().bold(),
            from.dimmed(),
            "→".cyan(),
            to.green()
        ),
        BumpOutcome::Unchanged { version } => format!(
            "{} {} already pinned to {}",
            "✓".green(),
            target.name.white().bold(),
            version.cyan()
        ),
    }
}

/// Prints a fatal error with its cause chain.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "error:".red().bold(), err);
}
