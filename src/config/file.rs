//! Settings file parsing.
//!
//! Defines the structure of the settings file with serde. The same structure is
//! read from TOML or, when the file has a `.json` extension, from JSON.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::UsageError;

/// Root structure of a settings file.
///
/// All fields are optional to allow partial settings that are merged
/// beneath CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    /// Repository location
    pub repo: Option<PathBuf>,

    /// History range section
    #[serde(default)]
    pub range: RangeSection,

    /// Commit and tag filtering section
    #[serde(default)]
    pub filter: FilterSection,

    /// Formatting section
    #[serde(default)]
    pub format: FormatSection,

    /// Template section
    #[serde(default)]
    pub template: TemplateSection,

    /// Jira section
    #[serde(default)]
    pub jira: JiraSection,

    /// GitHub section
    #[serde(default)]
    pub github: GitHubSection,

    /// GitLab section
    #[serde(default)]
    pub gitlab: GitLabSection,

    /// Custom issue section
    #[serde(default)]
    pub custom_issue: CustomIssueSection,

    /// Extended variables and headers
    #[serde(default)]
    pub extended: ExtendedSection,
}

/// History range section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeSection {
    /// From ref (wins over `from_commit`)
    pub from_ref: Option<String>,
    /// From commit
    pub from_commit: Option<String>,
    /// To ref (wins over `to_commit`)
    pub to_ref: Option<String>,
    /// To commit
    pub to_commit: Option<String>,
}

/// Commit and tag filtering section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSection {
    /// Ignore commits whose message matches this regex
    pub ignore_pattern: Option<String>,
    /// Ignore commits older than this date (`YYYY-MM-dd HH:mm:ss`)
    pub ignore_older_than: Option<String>,
    /// Ignore tags whose name matches this regex
    pub ignore_tag_pattern: Option<String>,
    /// Ignore commits without an issue
    #[serde(default)]
    pub ignore_commits_without_issue: bool,
}

/// Formatting section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatSection {
    /// Date format
    pub date_format: Option<String>,
    /// Time zone
    pub time_zone: Option<String>,
    /// Name of the virtual untagged tag
    pub untagged_name: Option<String>,
    /// Name of the virtual no-issue issue
    pub no_issue_name: Option<String>,
    /// Readable tag name pattern
    pub readable_tag_name: Option<String>,
    /// Remove issue references from commit messages
    #[serde(default)]
    pub remove_issue_from_message: bool,
}

/// Template section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateSection {
    /// Template file
    pub path: Option<PathBuf>,
    /// Inline template (wins over `path`)
    pub content: Option<String>,
}

/// Jira section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JiraSection {
    /// Server URL
    pub server: Option<String>,
    /// Issue pattern
    pub pattern: Option<String>,
    /// Username
    pub username: Option<String>,
    /// Password
    pub password: Option<String>,
    /// Basic auth token
    pub basic_auth: Option<String>,
}

/// GitHub section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitHubSection {
    /// API base URL
    pub api: Option<String>,
    /// OAuth2 token
    pub token: Option<String>,
}

/// GitLab section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitLabSection {
    /// Server URL
    pub server: Option<String>,
    /// Project name
    pub project_name: Option<String>,
    /// API token
    pub token: Option<String>,
}

/// Custom issue section.
///
/// Only takes effect when both `name` and `pattern` are set.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomIssueSection {
    /// Issue name
    pub name: Option<String>,
    /// Issue pattern
    pub pattern: Option<String>,
    /// Issue link
    pub link: Option<String>,
    /// Issue title
    pub title: Option<String>,
}

/// Extended variables and headers.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtendedSection {
    /// Template variables, exposed as `{{extended.*}}`
    pub variables: Option<serde_json::Map<String, serde_json::Value>>,
    /// Extra headers sent to issue trackers
    pub headers: Option<BTreeMap<String, String>>,
}

impl SettingsFile {
    /// Loads settings from a file.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, UsageError> {
        let content = std::fs::read_to_string(path).map_err(|e| UsageError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            Self::parse_json(&content)
        } else {
            Self::parse(&content)
        };

        parsed.map_err(|reason| UsageError::FileParse {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Parses settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns the parser message if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Parses settings from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns the parser message if the JSON is invalid.
    pub fn parse_json(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or when no home directory is known, are
/// returned unchanged.
#[must_use]
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}

/// Generates a default settings file with comments.
#[must_use]
pub fn default_settings_template() -> String {
    r#"# git-changelog settings file
# Every value here can be overridden by the matching command-line flag.

# Repository (default: ".")
# repo = "."

[range]
# A ref always wins over a commit for the same endpoint.
# from_ref = "refs/tags/v1.0.0"
# from_commit = "0000000000000000000000000000000000000000"
# to_ref = "refs/heads/master"
# to_commit = "abc1234"

[filter]
# Ignore commits where the pattern matches the message
# ignore_pattern = '^\[maven-release-plugin\].*|^\[Gradle Release Plugin\].*|^Merge.*'

# Ignore commits older than this date (format: YYYY-MM-dd HH:mm:ss)
# ignore_older_than = "2020-01-01 00:00:00"

# Ignore tags matching the pattern, e.g. release candidates
# ignore_tag_pattern = ".*-rc.*"

# ignore_commits_without_issue = false

[format]
# date_format = "YYYY-MM-dd HH:mm:ss"
# time_zone = "UTC"
# untagged_name = "No tag"
# no_issue_name = "No issue"
# readable_tag_name = "/([^/]+?)$"
# remove_issue_from_message = false

[template]
# Inline content wins over the path
# path = "changelog.mustache"
# content = "{{#each extended.notes}}- {{this}}\n{{/each}}"

[jira]
# server = "https://jira.example.com"
# pattern = '\b[a-zA-Z]([a-zA-Z]+)-([0-9]+)\b'
# username = "user"
# password = "secret"
# basic_auth = "token"

[github]
# api = "https://api.github.com/repos/owner/project/"
# token = "token"

[gitlab]
# server = "https://gitlab.com/"
# project_name = "project"
# token = "token"

[custom_issue]
# Active only when both name and pattern are set
# name = "Bugzilla"
# pattern = 'bug([0-9]+)'
# link = "https://bugs.example.com/${PATTERN_GROUP_1}"
# title = "Bug ${PATTERN_GROUP_1}"

[extended]
# Available in templates as {{extended.*}}
# variables = { var1 = "val1" }
# Sent along with issue tracker requests
# headers = { "CF-Access-Client-ID" = "abcde12345xyz.access" }
"#
    .to_string()
}
