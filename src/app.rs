//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and usage printing
//! that support the main entry point.

use git_changelog::config::{Cli, UsageError};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Usage error (exit code 1) - malformed flags, invalid values, no output, etc.
    pub const USAGE_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - template failure, file write failure, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints a clap parse error and maps it to an exit code.
///
/// `--help` and `--version` are reported by clap as errors but succeed.
pub fn handle_parse_error(error: &clap::Error) -> std::process::ExitCode {
    use clap::error::ErrorKind;

    if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        // Printing help can only fail if stdout is gone
        let _ = error.print();
        return exit_code::SUCCESS;
    }

    eprintln!("{error}");
    eprintln!("{}", Cli::help_text());
    exit_code::USAGE_ERROR
}

/// Prints a resolution error followed by the full help text.
pub fn print_usage_error(error: &UsageError) {
    eprintln!("Usage error: {error}\n");
    eprintln!("{}", Cli::help_text());

    if matches!(error, UsageError::FileRead { .. }) {
        eprintln!("\nRun 'git-changelog init' to generate a settings file template.");
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Logs go to stderr; stdout is reserved for the changelog itself.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
