//! Tests for settings resolution.

use super::UsageError;
use super::cli::Cli;
use super::file::SettingsFile;
use super::resolved::Settings;

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["git-changelog"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse a TOML settings file
fn file(content: &str) -> SettingsFile {
    SettingsFile::parse(content).unwrap()
}

/// Resolves CLI args (with `--stdout` added) and no settings file
fn resolve(args: &[&str]) -> Result<Settings, UsageError> {
    let mut full_args = vec!["--stdout"];
    full_args.extend(args);
    Settings::resolve(&cli(&full_args), None)
}

mod custom_issue_tests;
