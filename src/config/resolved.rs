//! Resolved settings after merging CLI flags, the settings file and defaults.
//!
//! [`Settings::resolve`] is a pure function of its inputs. It fills a local
//! accumulator rule by rule and only hands out the value once output
//! validation has passed, so a partially resolved configuration is never
//! observable.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use handlebars::Handlebars;
use url::Url;

use super::cli::Cli;
use super::defaults;
use super::error::{UsageError, flag};
use super::extended::{self, ExtendedVariables};
use super::file::{SettingsFile, expand_home};
use super::range::RangeEndpoint;

/// Where the changelog template comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Template file on disk
    Path(PathBuf),
    /// Inline template text
    Content(String),
}

/// Jira connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraSettings {
    /// Server URL; Jira lookups are disabled without it
    pub server: Option<String>,
    /// Issue key pattern
    pub issue_pattern: String,
    /// Username
    pub username: Option<String>,
    /// Password
    pub password: Option<String>,
    /// Basic auth token
    pub basic_auth: Option<String>,
}

/// GitHub connection settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitHubSettings {
    /// API base URL
    pub api: Option<String>,
    /// OAuth2 token
    pub token: Option<String>,
}

/// GitLab connection settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitLabSettings {
    /// Server URL
    pub server: Option<String>,
    /// Project name
    pub project_name: Option<String>,
    /// API token
    pub token: Option<String>,
}

/// A user-defined issue tracker.
///
/// Only exists when both a name and a pattern were supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomIssue {
    /// Issue name
    pub name: String,
    /// Pattern recognizing the issue in commit messages
    pub pattern: String,
    /// Link template, if supplied
    pub link: Option<String>,
    /// Title template, if supplied
    pub title: Option<String>,
}

impl CustomIssue {
    /// Builds a custom issue when both mandatory parts are present.
    ///
    /// Returns `None` when either `name` or `pattern` is missing; this is
    /// an inactive feature, not an error.
    #[must_use]
    pub fn from_parts(
        name: Option<&str>,
        pattern: Option<&str>,
        link: Option<&str>,
        title: Option<&str>,
    ) -> Option<Self> {
        let (name, pattern) = name.zip(pattern)?;
        Some(Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
            link: link.map(ToString::to_string),
            title: title.map(ToString::to_string),
        })
    }
}

/// MediaWiki publishing target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiTarget {
    /// Base URL of the wiki
    pub url: Url,
    /// Page title
    pub title: Option<String>,
    /// User name (empty when not supplied)
    pub user: String,
    /// Password (empty when not supplied)
    pub password: String,
}

/// Selected output sinks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outputs {
    /// Print to stdout
    pub stdout: bool,
    /// Write to this file
    pub file: Option<PathBuf>,
    /// Publish to this wiki
    pub wiki: Option<WikiTarget>,
}

/// One output sink, borrowed from [`Settings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget<'a> {
    /// Publish to MediaWiki
    Wiki(&'a WikiTarget),
    /// Print to stdout
    Stdout,
    /// Write to a file
    File(&'a Path),
}

impl OutputTarget<'_> {
    /// Short sink name for logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Wiki(_) => "wiki",
            Self::Stdout => "stdout",
            Self::File(_) => "file",
        }
    }
}

/// Fully resolved configuration handed to the changelog engine.
///
/// Only obtainable through [`Settings::resolve`] or [`Settings::load`];
/// fields are read through accessors and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    repo: PathBuf,
    from: RangeEndpoint,
    to: RangeEndpoint,
    ignore_pattern: String,
    ignore_older_than: Option<NaiveDateTime>,
    ignore_tag_pattern: Option<String>,
    ignore_commits_without_issue: bool,
    untagged_name: String,
    date_format: String,
    time_zone: String,
    no_issue_name: String,
    readable_tag_name: String,
    remove_issue_from_message: bool,
    template: TemplateSource,
    jira: JiraSettings,
    github: GitHubSettings,
    gitlab: GitLabSettings,
    custom_issue: Option<CustomIssue>,
    extended_variables: ExtendedVariables,
    extended_headers: BTreeMap<String, String>,
    outputs: Outputs,
}

impl Settings {
    /// Loads the settings file named by `--settings-file`, if any, and resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be read or parsed, or if
    /// resolution fails.
    pub fn load(cli: &Cli) -> Result<Self, UsageError> {
        let file = match cli.settings_file {
            Some(ref path) => Some(SettingsFile::load(&expand_home(path))?),
            None => None,
        };

        Self::resolve(cli, file.as_ref())
    }

    /// Resolves CLI flags over an optional settings file and the built-in defaults.
    ///
    /// Rules run in a fixed order: pass-through fields, range endpoints,
    /// date parsing, JSON flags, custom issue activation, and finally output
    /// validation.
    ///
    /// # Errors
    ///
    /// Returns the first [`UsageError`] encountered.
    pub fn resolve(cli: &Cli, file: Option<&SettingsFile>) -> Result<Self, UsageError> {
        let mut settings = Self::builtin();

        settings.apply_pass_through(cli, file)?;
        settings.apply_range(cli, file);
        settings.ignore_older_than = resolve_ignore_older_than(cli, file)?;
        settings.apply_extended(cli, file)?;
        settings.custom_issue = resolve_custom_issue(cli, file);
        settings.outputs = resolve_outputs(cli)?;

        Ok(settings)
    }

    fn builtin() -> Self {
        Self {
            repo: PathBuf::from(defaults::REPO),
            from: RangeEndpoint::Commit(defaults::FROM_COMMIT.to_string()),
            to: RangeEndpoint::Ref(defaults::TO_REF.to_string()),
            ignore_pattern: defaults::IGNORE_PATTERN.to_string(),
            ignore_older_than: None,
            ignore_tag_pattern: None,
            ignore_commits_without_issue: false,
            untagged_name: defaults::UNTAGGED_NAME.to_string(),
            date_format: defaults::DATE_FORMAT.to_string(),
            time_zone: defaults::TIME_ZONE.to_string(),
            no_issue_name: defaults::NO_ISSUE_NAME.to_string(),
            readable_tag_name: defaults::READABLE_TAG_NAME.to_string(),
            remove_issue_from_message: false,
            template: TemplateSource::Path(PathBuf::from(defaults::TEMPLATE_PATH)),
            jira: JiraSettings {
                server: None,
                issue_pattern: defaults::JIRA_ISSUE_PATTERN.to_string(),
                username: None,
                password: None,
                basic_auth: None,
            },
            github: GitHubSettings::default(),
            gitlab: GitLabSettings::default(),
            custom_issue: None,
            extended_variables: ExtendedVariables::default(),
            extended_headers: BTreeMap::new(),
            outputs: Outputs::default(),
        }
    }

    fn apply_pass_through(
        &mut self,
        cli: &Cli,
        file: Option<&SettingsFile>,
    ) -> Result<(), UsageError> {
        if let Some(repo) = cli.repo.as_deref().or_else(|| file?.repo.as_deref()) {
            self.repo = expand_home(repo);
        }

        self.apply_filter(cli, file);
        self.apply_format(cli, file);
        self.apply_trackers(cli, file);
        self.apply_template(cli, file)
    }

    // Patterns are stored verbatim and compiled by the engine.
    fn apply_filter(&mut self, cli: &Cli, file: Option<&SettingsFile>) {
        let section = file.map(|f| &f.filter);

        overwrite(
            &mut self.ignore_pattern,
            cli.ignore_pattern.as_deref(),
            section.and_then(|s| s.ignore_pattern.as_deref()),
        );
        overwrite_opt(
            &mut self.ignore_tag_pattern,
            cli.ignore_tag_pattern.as_deref(),
            section.and_then(|s| s.ignore_tag_pattern.as_deref()),
        );

        // Switches only enable
        self.ignore_commits_without_issue = cli.ignore_commits_without_issue
            || section.is_some_and(|s| s.ignore_commits_without_issue);
    }

    fn apply_format(&mut self, cli: &Cli, file: Option<&SettingsFile>) {
        let section = file.map(|f| &f.format);

        overwrite(
            &mut self.date_format,
            cli.date_format.as_deref(),
            section.and_then(|s| s.date_format.as_deref()),
        );
        overwrite(
            &mut self.time_zone,
            cli.time_zone.as_deref(),
            section.and_then(|s| s.time_zone.as_deref()),
        );
        overwrite(
            &mut self.untagged_name,
            cli.untagged_name.as_deref(),
            section.and_then(|s| s.untagged_name.as_deref()),
        );
        overwrite(
            &mut self.no_issue_name,
            cli.no_issue_name.as_deref(),
            section.and_then(|s| s.no_issue_name.as_deref()),
        );
        overwrite(
            &mut self.readable_tag_name,
            cli.readable_tag_name.as_deref(),
            section.and_then(|s| s.readable_tag_name.as_deref()),
        );

        self.remove_issue_from_message = cli.remove_issue_from_message
            || section.is_some_and(|s| s.remove_issue_from_message);
    }

    fn apply_template(&mut self, cli: &Cli, file: Option<&SettingsFile>) -> Result<(), UsageError> {
        let section = file.map(|f| &f.template);

        if let Some(path) = cli.template.as_deref().or_else(|| section?.path.as_deref()) {
            self.template = TemplateSource::Path(expand_home(path));
        }

        // Inline content wins over any path
        let content = section.and_then(|s| s.content.as_deref());
        if let Some(content) = cli.template_content.as_deref().or(content) {
            validate_template(content)?;
            self.template = TemplateSource::Content(content.to_string());
        }

        Ok(())
    }

    fn apply_trackers(&mut self, cli: &Cli, file: Option<&SettingsFile>) {
        let jira = file.map(|f| &f.jira);
        let github = file.map(|f| &f.github);
        let gitlab = file.map(|f| &f.gitlab);

        overwrite(
            &mut self.jira.issue_pattern,
            cli.jira_pattern.as_deref(),
            jira.and_then(|s| s.pattern.as_deref()),
        );

        overwrite_opt(
            &mut self.jira.server,
            cli.jira_server.as_deref(),
            jira.and_then(|s| s.server.as_deref()),
        );
        overwrite_opt(
            &mut self.jira.username,
            cli.jira_username.as_deref(),
            jira.and_then(|s| s.username.as_deref()),
        );
        overwrite_opt(
            &mut self.jira.password,
            cli.jira_password.as_deref(),
            jira.and_then(|s| s.password.as_deref()),
        );
        overwrite_opt(
            &mut self.jira.basic_auth,
            cli.jira_basic_auth.as_deref(),
            jira.and_then(|s| s.basic_auth.as_deref()),
        );

        overwrite_opt(
            &mut self.github.api,
            cli.github_api.as_deref(),
            github.and_then(|s| s.api.as_deref()),
        );
        overwrite_opt(
            &mut self.github.token,
            cli.github_token.as_deref(),
            github.and_then(|s| s.token.as_deref()),
        );

        overwrite_opt(
            &mut self.gitlab.server,
            cli.gitlab_server.as_deref(),
            gitlab.and_then(|s| s.server.as_deref()),
        );
        overwrite_opt(
            &mut self.gitlab.project_name,
            cli.gitlab_project_name.as_deref(),
            gitlab.and_then(|s| s.project_name.as_deref()),
        );
        overwrite_opt(
            &mut self.gitlab.token,
            cli.gitlab_token.as_deref(),
            gitlab.and_then(|s| s.token.as_deref()),
        );
    }

    fn apply_range(&mut self, cli: &Cli, file: Option<&SettingsFile>) {
        if let Some(range) = file.map(|f| &f.range) {
            self.from
                .apply(range.from_commit.as_deref(), range.from_ref.as_deref());
            self.to.apply(range.to_commit.as_deref(), range.to_ref.as_deref());
        }

        self.from
            .apply(cli.from_commit.as_deref(), cli.from_ref.as_deref());
        self.to.apply(cli.to_commit.as_deref(), cli.to_ref.as_deref());
    }

    fn apply_extended(&mut self, cli: &Cli, file: Option<&SettingsFile>) -> Result<(), UsageError> {
        let section = file.map(|f| &f.extended);

        if let Some(ref text) = cli.extended_variables {
            self.extended_variables = ExtendedVariables::parse(text)?;
        } else if let Some(variables) = section.and_then(|s| s.variables.as_ref()) {
            self.extended_variables = ExtendedVariables::wrap(variables.clone());
        }

        if let Some(ref text) = cli.extended_headers {
            self.extended_headers = extended::parse_headers(text)?;
        } else if let Some(headers) = section.and_then(|s| s.headers.as_ref()) {
            extended::validate_headers(headers)?;
            self.extended_headers = headers.clone();
        }

        Ok(())
    }

    /// Repository location.
    #[must_use]
    pub fn repo(&self) -> &Path {
        &self.repo
    }

    /// Start of the history range.
    #[must_use]
    pub const fn from(&self) -> &RangeEndpoint {
        &self.from
    }

    /// End of the history range.
    #[must_use]
    pub const fn to(&self) -> &RangeEndpoint {
        &self.to
    }

    /// Commits whose message matches this pattern are ignored.
    #[must_use]
    pub fn ignore_pattern(&self) -> &str {
        &self.ignore_pattern
    }

    /// Commits older than this are ignored.
    #[must_use]
    pub const fn ignore_older_than(&self) -> Option<NaiveDateTime> {
        self.ignore_older_than
    }

    /// Tags whose name matches this pattern are ignored.
    #[must_use]
    pub fn ignore_tag_pattern(&self) -> Option<&str> {
        self.ignore_tag_pattern.as_deref()
    }

    /// Whether commits without an issue are ignored.
    #[must_use]
    pub const fn ignore_commits_without_issue(&self) -> bool {
        self.ignore_commits_without_issue
    }

    /// Name of the virtual untagged tag.
    #[must_use]
    pub fn untagged_name(&self) -> &str {
        &self.untagged_name
    }

    /// Date format for printed dates.
    #[must_use]
    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Time zone for printed dates.
    #[must_use]
    pub fn time_zone(&self) -> &str {
        &self.time_zone
    }

    /// Name of the virtual no-issue issue.
    #[must_use]
    pub fn no_issue_name(&self) -> &str {
        &self.no_issue_name
    }

    /// Pattern extracting the readable part of a tag name.
    #[must_use]
    pub fn readable_tag_name(&self) -> &str {
        &self.readable_tag_name
    }

    /// Whether issue references are stripped from commit messages.
    #[must_use]
    pub const fn remove_issue_from_message(&self) -> bool {
        self.remove_issue_from_message
    }

    /// Template source.
    #[must_use]
    pub const fn template(&self) -> &TemplateSource {
        &self.template
    }

    /// Jira settings.
    #[must_use]
    pub const fn jira(&self) -> &JiraSettings {
        &self.jira
    }

    /// GitHub settings.
    #[must_use]
    pub const fn github(&self) -> &GitHubSettings {
        &self.github
    }

    /// GitLab settings.
    #[must_use]
    pub const fn gitlab(&self) -> &GitLabSettings {
        &self.gitlab
    }

    /// Custom issue tracker, if activated.
    #[must_use]
    pub const fn custom_issue(&self) -> Option<&CustomIssue> {
        self.custom_issue.as_ref()
    }

    /// Extended template variables, namespaced under `extended`.
    #[must_use]
    pub const fn extended_variables(&self) -> &ExtendedVariables {
        &self.extended_variables
    }

    /// Extra headers sent to issue trackers.
    #[must_use]
    pub const fn extended_headers(&self) -> &BTreeMap<String, String> {
        &self.extended_headers
    }

    /// Selected output sinks.
    #[must_use]
    pub const fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    /// Output sinks in dispatch order: wiki, stdout, file.
    #[must_use]
    pub fn output_targets(&self) -> Vec<OutputTarget<'_>> {
        let mut targets = Vec::with_capacity(3);
        if let Some(ref wiki) = self.outputs.wiki {
            targets.push(OutputTarget::Wiki(wiki));
        }
        if self.outputs.stdout {
            targets.push(OutputTarget::Stdout);
        }
        if let Some(ref path) = self.outputs.file {
            targets.push(OutputTarget::File(path));
        }
        targets
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let template = match self.template {
            TemplateSource::Path(ref path) => path.display().to_string(),
            TemplateSource::Content(_) => "<inline>".to_string(),
        };
        let custom_issue = self
            .custom_issue
            .as_ref()
            .map_or("none", |issue| issue.name.as_str());
        let targets: Vec<&str> = self.output_targets().iter().map(OutputTarget::name).collect();

        write!(
            f,
            "Settings {{ repo: {}, from: {}, to: {}, template: {}, jira: {}, custom_issue: {}, \
             extended_headers: {}, outputs: [{}] }}",
            self.repo.display(),
            self.from,
            self.to,
            template,
            self.jira.server.as_deref().unwrap_or("none"),
            custom_issue,
            self.extended_headers.len(),
            targets.join(", "),
        )
    }
}

fn resolve_ignore_older_than(
    cli: &Cli,
    file: Option<&SettingsFile>,
) -> Result<Option<NaiveDateTime>, UsageError> {
    let value = cli
        .ignore_older_than
        .as_deref()
        .or_else(|| file?.filter.ignore_older_than.as_deref());

    value
        .map(|value| {
            NaiveDateTime::parse_from_str(value, defaults::IGNORE_OLDER_THAN_FORMAT).map_err(
                |source| UsageError::InvalidDate {
                    value: value.to_string(),
                    source,
                },
            )
        })
        .transpose()
}

fn resolve_custom_issue(cli: &Cli, file: Option<&SettingsFile>) -> Option<CustomIssue> {
    let section = file.map(|f| &f.custom_issue);

    // Each part is layered on its own; activation is decided on the merged parts
    CustomIssue::from_parts(
        cli.custom_issue_name
            .as_deref()
            .or_else(|| section?.name.as_deref()),
        cli.custom_issue_pattern
            .as_deref()
            .or_else(|| section?.pattern.as_deref()),
        cli.custom_issue_link
            .as_deref()
            .or_else(|| section?.link.as_deref()),
        cli.custom_issue_title
            .as_deref()
            .or_else(|| section?.title.as_deref()),
    )
}

fn resolve_outputs(cli: &Cli) -> Result<Outputs, UsageError> {
    if !cli.has_output() {
        return Err(UsageError::NoOutput);
    }

    let wiki = match cli.mediawiki_url {
        Some(ref raw) => Some(resolve_wiki(cli, raw)?),
        None => None,
    };

    Ok(Outputs {
        stdout: cli.stdout,
        file: cli.output_file.as_deref().map(expand_home),
        wiki,
    })
}

fn resolve_wiki(cli: &Cli, raw: &str) -> Result<WikiTarget, UsageError> {
    let url = Url::parse(raw).map_err(|e| UsageError::InvalidUrl {
        flag: flag::MEDIAWIKI_URL,
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    Ok(WikiTarget {
        url,
        title: cli.mediawiki_title.clone(),
        user: cli.mediawiki_user.clone().unwrap_or_default(),
        password: cli.mediawiki_password.clone().unwrap_or_default(),
    })
}

// Helper functions

/// Overwrites `target` only when the CLI or the settings file supplied a value.
fn overwrite(target: &mut String, cli: Option<&str>, file: Option<&str>) {
    if let Some(value) = cli.or(file) {
        *target = value.to_string();
    }
}

/// Like [`overwrite`], for settings without a built-in default.
fn overwrite_opt(target: &mut Option<String>, cli: Option<&str>, file: Option<&str>) {
    if let Some(value) = cli.or(file) {
        *target = Some(value.to_string());
    }
}

fn validate_template(template: &str) -> Result<(), UsageError> {
    let mut hbs = Handlebars::new();
    // Compile-check only; the engine renders later with real data
    hbs.register_template_string("changelog", template)
        .map_err(|e| UsageError::InvalidTemplate {
            reason: e.to_string(),
        })
}
