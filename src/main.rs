//! git-changelog
//!
//! Entry point for the git-changelog application.

use std::process::ExitCode;

use git_changelog::config::{Cli, Command, Settings, write_default_settings};
use git_changelog::dispatch::Dispatcher;
use git_changelog::engine::TemplateEngine;

mod app;

use app::{exit_code, handle_parse_error, print_usage_error, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = match Cli::try_parse_args() {
        Ok(cli) => cli,
        Err(e) => return handle_parse_error(&e),
    };

    // Handle init subcommand
    if let Some(Command::Init { output }) = &cli.command {
        return handle_init(output);
    }

    setup_tracing(cli.verbose);

    // Resolve and validate settings
    let settings = match Settings::load(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            print_usage_error(&e);
            return exit_code::USAGE_ERROR;
        }
    };
    tracing::debug!("{settings}");

    run(&settings)
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_settings(output) {
        Ok(()) => {
            println!("Settings template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::USAGE_ERROR
        }
    }
}

/// Dispatches the changelog to the selected sinks.
fn run(settings: &Settings) -> ExitCode {
    let mut dispatcher = Dispatcher::new(TemplateEngine::new());

    match dispatcher.dispatch(settings) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::runtime_error()
        }
    }
}
