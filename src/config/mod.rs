//! Configuration layer for git-changelog.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - Settings file parsing ([`SettingsFile`])
//! - Resolved settings ([`Settings`])
//! - Settings file generation ([`write_default_settings`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **Settings file** - Values from `--settings-file`
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! A flag only lowers a default when it was explicitly given. Output selection
//! (`--stdout`, `--output-file`, `--mediawiki-url`) is CLI-only and at least one
//! of them is required.
//!
//! # Range Endpoints
//!
//! For each endpoint the commit flag is applied first and the ref flag second,
//! so a ref always wins over a commit. This is a fixed rule order, not
//! "last flag on the command line wins". The settings file range is applied
//! the same way before the CLI range.
//!
//! # JSON Flags
//!
//! `--extended-variables` and `--extended-headers` take JSON objects. A flag
//! replaces the settings file's table entirely (not merged).
//!
//! # Boolean Flag Semantics
//!
//! Switches (`--ignore-commits-without-issue`, `--remove-issue-from-message`) use
//! OR semantics with the settings file: they can only enable, never disable.

mod cli;
pub mod defaults;
mod error;
mod extended;
mod file;
mod range;
mod resolved;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod extended_tests;
#[cfg(test)]
mod resolved_tests;

use std::path::Path;

pub use cli::{Cli, Command};
pub use error::{UsageError, flag};
pub use extended::ExtendedVariables;
pub use file::{SettingsFile, default_settings_template, expand_home};
pub use range::RangeEndpoint;
pub use resolved::{
    CustomIssue, GitHubSettings, GitLabSettings, JiraSettings, OutputTarget, Outputs, Settings,
    TemplateSource, WikiTarget,
};

/// Writes the default settings template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_settings(path: &Path) -> Result<(), UsageError> {
    std::fs::write(path, default_settings_template()).map_err(|e| UsageError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
