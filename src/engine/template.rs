//! Handlebars-backed engine rendering the configured template.

use std::borrow::Cow;

use handlebars::Handlebars;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::{Settings, TemplateSource, WikiTarget};

use super::{ChangelogEngine, EngineError};

/// Engine that renders the configured template against the resolved settings.
///
/// It does not walk repository history: templates see the range, the
/// formatting settings and the extended variables only. Publishing to a
/// wiki needs a network client and is reported as unsupported.
///
/// # Template Variables
///
/// - `repo`, `from`, `to`: repository and range endpoints (`ref:...` / `commit:...`)
/// - `untaggedName`, `noIssueName`, `dateFormat`, `timeZone`
/// - `extended.*`: values from `--extended-variables`
///
/// # Example
///
/// ```
/// use git_changelog::config::{Cli, Settings};
/// use git_changelog::engine::{ChangelogEngine, TemplateEngine};
///
/// let cli = Cli::parse_from_iter([
///     "git-changelog",
///     "--stdout",
///     "--template-content",
///     "{{extended.title}}",
///     "--extended-variables",
///     r#"{"title": "Release notes"}"#,
/// ]);
/// let settings = Settings::resolve(&cli, None).unwrap();
///
/// assert_eq!(TemplateEngine::new().render(&settings).unwrap(), "Release notes");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateEngine;

impl TemplateEngine {
    /// Creates a new template engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn load_template(settings: &Settings) -> Result<Cow<'_, str>, EngineError> {
        match settings.template() {
            TemplateSource::Content(content) => Ok(Cow::Borrowed(content.as_str())),
            TemplateSource::Path(path) => std::fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|e| EngineError::TemplateRead {
                    path: path.clone(),
                    source: e,
                }),
        }
    }
}

/// Data exposed to the template.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TemplateData<'a> {
    repo: String,
    from: String,
    to: String,
    untagged_name: &'a str,
    no_issue_name: &'a str,
    date_format: &'a str,
    time_zone: &'a str,
    #[serde(flatten)]
    extended: &'a Map<String, Value>,
}

impl<'a> From<&'a Settings> for TemplateData<'a> {
    fn from(settings: &'a Settings) -> Self {
        Self {
            repo: settings.repo().display().to_string(),
            from: settings.from().to_string(),
            to: settings.to().to_string(),
            untagged_name: settings.untagged_name(),
            no_issue_name: settings.no_issue_name(),
            date_format: settings.date_format(),
            time_zone: settings.time_zone(),
            extended: settings.extended_variables().as_map(),
        }
    }
}

impl ChangelogEngine for TemplateEngine {
    fn render(&self, settings: &Settings) -> Result<String, EngineError> {
        let template = Self::load_template(settings)?;

        let mut handlebars = Handlebars::new();
        // Changelogs are plain text or Markdown, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        let data = TemplateData::from(settings);
        tracing::debug!(
            template_len = template.len(),
            "Rendering changelog template"
        );

        handlebars
            .render_template(&template, &data)
            .map_err(|e| EngineError::Template(e.to_string()))
    }

    fn to_wiki(&self, _settings: &Settings, target: &WikiTarget) -> Result<(), EngineError> {
        tracing::warn!(url = %target.url, "Wiki publishing requested but no wiki client is available");
        Err(EngineError::Unsupported {
            operation: "wiki publishing",
        })
    }
}
