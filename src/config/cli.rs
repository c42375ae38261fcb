//! CLI argument parsing using clap.
//!
//! Defines every recognized flag. No flag carries a clap default: presence is
//! observable as `Some`/`true`, and built-in defaults are applied by the
//! resolver so that "was explicitly supplied" is never lost.
//!
//! Each long flag also accepts its legacy short code as an alias
//! (`--of` for `--output-file`, `--std` for `--stdout`, ...). The legacy
//! single-dash spelling (`-of`, `-std`) is rewritten to the alias before
//! clap sees it.

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

/// Changelog generator front end.
///
/// Resolves flags and an optional settings file into one configuration,
/// renders the changelog and writes it to stdout, a file and/or MediaWiki.
#[derive(Debug, Parser)]
#[command(name = "git-changelog")]
#[command(version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Use settings from file (TOML, or JSON with a .json extension)
    #[arg(long = "settings-file", alias = "sf", value_name = "FILE")]
    pub settings_file: Option<PathBuf>,

    /// Print the changelog to stdout
    #[arg(long, alias = "std")]
    pub stdout: bool,

    /// Write the changelog to a file
    #[arg(long = "output-file", alias = "of", value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Template to use; a default template is used if not specified
    #[arg(long, short = 't', value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// String to use as template (takes priority over --template)
    #[arg(long = "template-content", alias = "tec")]
    pub template_content: Option<String>,

    /// Repository
    #[arg(long, short = 'r', value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// From ref (wins over --from-commit)
    #[arg(long = "from-ref", alias = "fr")]
    pub from_ref: Option<String>,

    /// To ref (wins over --to-commit)
    #[arg(long = "to-ref", alias = "tr")]
    pub to_ref: Option<String>,

    /// From commit
    #[arg(long = "from-commit", alias = "fc")]
    pub from_commit: Option<String>,

    /// To commit
    #[arg(long = "to-commit", alias = "tc")]
    pub to_commit: Option<String>,

    /// Ignore commits where pattern matches message
    #[arg(long = "ignore-pattern", alias = "ip", value_name = "REGEX")]
    pub ignore_pattern: Option<String>,

    /// Ignore commits older than YYYY-MM-dd HH:mm:ss
    #[arg(long = "ignore-older-than", alias = "iot", value_name = "DATE")]
    pub ignore_older_than: Option<String>,

    /// Ignore tags that match the regular expression (e.g. release candidates)
    #[arg(long = "ignore-tag-pattern", alias = "itp", value_name = "REGEX")]
    pub ignore_tag_pattern: Option<String>,

    /// Name of the virtual tag holding commits not included in any tag
    #[arg(long = "untagged-name", alias = "ut")]
    pub untagged_name: Option<String>,

    /// Jira server; enables Jira issue titles in the changelog
    #[arg(long = "jira-server", aliases = ["js", "jiraServer"], value_name = "URL")]
    pub jira_server: Option<String>,

    /// Jira issue pattern
    #[arg(long = "jira-pattern", alias = "jp", value_name = "REGEX")]
    pub jira_pattern: Option<String>,

    /// Optional username to authenticate with Jira
    #[arg(long = "jira-username", alias = "ju")]
    pub jira_username: Option<String>,

    /// Optional password to authenticate with Jira
    #[arg(long = "jira-password", alias = "jpw")]
    pub jira_password: Option<String>,

    /// Optional basic auth token to authenticate with Jira
    #[arg(long = "jira-basic-auth", alias = "jba")]
    pub jira_basic_auth: Option<String>,

    /// Custom issue name (needs --custom-issue-pattern)
    #[arg(long = "custom-issue-name", alias = "cn")]
    pub custom_issue_name: Option<String>,

    /// Custom issue pattern (needs --custom-issue-name)
    #[arg(long = "custom-issue-pattern", alias = "cp", value_name = "REGEX")]
    pub custom_issue_pattern: Option<String>,

    /// Custom issue link; supports ${PATTERN_GROUP_1} style variables
    #[arg(long = "custom-issue-link", alias = "cl")]
    pub custom_issue_link: Option<String>,

    /// Custom issue title; supports ${PATTERN_GROUP_1} style variables
    #[arg(long = "custom-issue-title", alias = "ct")]
    pub custom_issue_title: Option<String>,

    /// Time zone to use when printing dates
    #[arg(long = "time-zone", alias = "tz")]
    pub time_zone: Option<String>,

    /// Format to use when printing dates
    #[arg(long = "date-format", alias = "df")]
    pub date_format: Option<String>,

    /// Name of the virtual issue holding commits without an issue
    #[arg(long = "no-issue-name", alias = "ni")]
    pub no_issue_name: Option<String>,

    /// Ignore commits that are not included in any issue
    #[arg(long = "ignore-commits-without-issue", alias = "ini")]
    pub ignore_commits_without_issue: bool,

    /// Pattern to extract the readable part of a tag
    #[arg(long = "readable-tag-name", alias = "rt", value_name = "REGEX")]
    pub readable_tag_name: Option<String>,

    /// Don't print any issues in commit messages
    #[arg(long = "remove-issue-from-message", alias = "ri")]
    pub remove_issue_from_message: bool,

    /// Base URL of MediaWiki
    #[arg(long = "mediawiki-url", alias = "murl", value_name = "URL")]
    pub mediawiki_url: Option<String>,

    /// Title of MediaWiki page
    #[arg(long = "mediawiki-title", alias = "mt")]
    pub mediawiki_title: Option<String>,

    /// User to authenticate with MediaWiki
    #[arg(long = "mediawiki-user", alias = "mu")]
    pub mediawiki_user: Option<String>,

    /// Password to authenticate with MediaWiki
    #[arg(long = "mediawiki-password", alias = "mp")]
    pub mediawiki_password: Option<String>,

    /// GitHub API, like https://api.github.com/repos/owner/project/
    #[arg(long = "github-api", alias = "gapi", value_name = "URL")]
    pub github_api: Option<String>,

    /// GitHub API OAuth2 token
    #[arg(long = "github-token", alias = "gtok")]
    pub github_token: Option<String>,

    /// GitLab API token
    #[arg(long = "gitlab-token", alias = "glt")]
    pub gitlab_token: Option<String>,

    /// GitLab server, like https://gitlab.com/
    #[arg(long = "gitlab-server", alias = "gls", value_name = "URL")]
    pub gitlab_server: Option<String>,

    /// GitLab project name
    #[arg(long = "gitlab-project-name", alias = "glpn")]
    pub gitlab_project_name: Option<String>,

    /// Extended variables available as {{extended.*}}, e.g. '{"var1": "val1"}'
    #[arg(long = "extended-variables", alias = "ex", value_name = "JSON")]
    pub extended_variables: Option<String>,

    /// Extended headers sent to issue trackers, e.g. '{"CF-Access-Client-ID": "abc"}'
    #[arg(long = "extended-headers", alias = "eh", value_name = "JSON")]
    pub extended_headers: Option<String>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for git-changelog
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default settings file
    Init {
        /// Output path for the settings file
        #[arg(long, short, default_value = super::defaults::SETTINGS_FILE)]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    ///
    /// # Errors
    ///
    /// Returns the clap error for malformed input, `--help` and `--version`;
    /// the caller decides how to print it and which exit code to use.
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse_from(normalize_legacy_args(std::env::args_os()))
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::parse_from(normalize_legacy_args(iter))
    }

    /// Parses CLI arguments from an iterator, returning parse errors.
    ///
    /// # Errors
    ///
    /// Returns the clap error for malformed input.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(normalize_legacy_args(iter))
    }

    /// Renders the full help text, shown alongside every usage error.
    #[must_use]
    pub fn help_text() -> String {
        Self::command()
            .render_help()
            .to_string()
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }

    /// Returns true if any output flag was supplied.
    #[must_use]
    pub const fn has_output(&self) -> bool {
        self.stdout || self.output_file.is_some() || self.mediawiki_url.is_some()
    }
}

/// Rewrites `-code` and `-code=value` to `--code` for every multi-letter alias.
///
/// Arguments after a `--` terminator are passed through untouched.
fn normalize_legacy_args<I, T>(iter: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let command = Cli::command();
    let aliases: HashSet<&str> = command
        .get_arguments()
        .filter_map(clap::Arg::get_all_aliases)
        .flatten()
        .collect();

    let mut terminated = false;
    iter.into_iter()
        .map(Into::into)
        .map(|arg| {
            if terminated {
                return arg;
            }
            if arg == "--" {
                terminated = true;
                return arg;
            }
            legacy_long_form(&arg, &aliases).unwrap_or(arg)
        })
        .collect()
}

fn legacy_long_form(arg: &OsStr, aliases: &HashSet<&str>) -> Option<OsString> {
    let text = arg.to_str()?;
    let rest = text
        .strip_prefix('-')
        .filter(|rest| !rest.starts_with('-'))?;
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);

    aliases
        .contains(name)
        .then(|| OsString::from(format!("-{text}")))
}
