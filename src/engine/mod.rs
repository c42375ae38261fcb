//! Changelog engine seam.
//!
//! This module provides:
//! - The collaborator trait consumed by the dispatcher ([`ChangelogEngine`])
//! - Engine failures ([`EngineError`])
//! - A built-in Handlebars renderer ([`TemplateEngine`])
//!
//! Walking history, talking to issue trackers and publishing to wikis belong to
//! the engine; this crate only calls it.

mod error;
mod template;


use std::path::Path;

use crate::config::{Settings, WikiTarget};

pub use error::EngineError;
pub use template::TemplateEngine;

/// Trait for producing and publishing changelogs from resolved settings.
///
/// # Design
///
/// Every call receives the complete [`Settings`]; implementations read the
/// fields they need. Engines are used synchronously, one call per sink.
pub trait ChangelogEngine {
    /// Renders the changelog to text.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the changelog cannot be produced.
    fn render(&self, settings: &Settings) -> Result<String, EngineError>;

    /// Renders the changelog and writes it to `path`, creating or truncating the file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if rendering or writing fails.
    fn to_file(&self, settings: &Settings, path: &Path) -> Result<(), EngineError> {
        let rendered = self.render(settings)?;
        std::fs::write(path, rendered).map_err(|e| EngineError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Renders the changelog and publishes it to a wiki page.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if rendering or publishing fails.
    fn to_wiki(&self, settings: &Settings, target: &WikiTarget) -> Result<(), EngineError>;
}

impl<E: ChangelogEngine + ?Sized> ChangelogEngine for &E {
    fn render(&self, settings: &Settings) -> Result<String, EngineError> {
        (**self).render(settings)
    }

    fn to_file(&self, settings: &Settings, path: &Path) -> Result<(), EngineError> {
        (**self).to_file(settings, path)
    }

    fn to_wiki(&self, settings: &Settings, target: &WikiTarget) -> Result<(), EngineError> {
        (**self).to_wiki(settings, target)
    }
}
