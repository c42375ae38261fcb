//! Dispatcher driving the engine for each selected sink.

use std::io::{self, Write};

use crate::config::{OutputTarget, Settings};
use crate::engine::{ChangelogEngine, EngineError};

use super::DispatchError;

/// Sends the changelog to the sinks selected in [`Settings`].
///
/// Sinks run in the order given by [`Settings::output_targets`]. A failing
/// sink does not stop the remaining ones; once every sink has been attempted
/// the first failure is returned.
///
/// # Type Parameters
///
/// - `E`: The changelog engine
/// - `W`: Where stdout output goes (defaults to the real stdout)
///
/// # Example
///
/// ```
/// use git_changelog::config::{Cli, Settings};
/// use git_changelog::dispatch::Dispatcher;
/// use git_changelog::engine::TemplateEngine;
///
/// let cli = Cli::parse_from_iter(["git-changelog", "--stdout", "--template-content", "hello"]);
/// let settings = Settings::resolve(&cli, None).unwrap();
///
/// let mut dispatcher = Dispatcher::capturing(TemplateEngine::new());
/// dispatcher.dispatch(&settings).unwrap();
///
/// assert_eq!(dispatcher.captured(), "hello\n");
/// ```
#[derive(Debug)]
pub struct Dispatcher<E, W = io::Stdout> {
    engine: E,
    stdout: W,
}

impl<E: ChangelogEngine> Dispatcher<E, io::Stdout> {
    /// Creates a dispatcher printing to the process's stdout.
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self::with_writer(engine, io::stdout())
    }
}

impl<E: ChangelogEngine> Dispatcher<E, Vec<u8>> {
    /// Creates a dispatcher that captures stdout output in memory.
    ///
    /// Read the captured text with [`Dispatcher::captured`].
    #[must_use]
    pub const fn capturing(engine: E) -> Self {
        Self::with_writer(engine, Vec::new())
    }

    /// Returns everything written to the captured stdout so far.
    #[must_use]
    pub fn captured(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

impl<E: ChangelogEngine, W: Write> Dispatcher<E, W> {
    /// Creates a dispatcher printing stdout output to `stdout`.
    #[must_use]
    pub const fn with_writer(engine: E, stdout: W) -> Self {
        Self { engine, stdout }
    }

    /// Returns the stdout writer, consuming the dispatcher.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.stdout
    }

    /// Sends the changelog to every selected sink.
    ///
    /// # Errors
    ///
    /// Returns the first sink failure after all sinks were attempted.
    pub fn dispatch(&mut self, settings: &Settings) -> Result<(), DispatchError> {
        let mut first_error = None;

        for target in settings.output_targets() {
            tracing::debug!(sink = target.name(), "Dispatching changelog");

            if let Err(e) = self.send(settings, target) {
                tracing::error!(sink = e.sink(), error = %e, "Output sink failed");
                first_error.get_or_insert(e);
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    fn send(&mut self, settings: &Settings, target: OutputTarget<'_>) -> Result<(), DispatchError> {
        let sink = target.name();
        let engine_error = |source: EngineError| DispatchError::Engine { sink, source };

        match target {
            OutputTarget::Wiki(wiki) => self.engine.to_wiki(settings, wiki).map_err(engine_error),
            OutputTarget::Stdout => {
                let rendered = self.engine.render(settings).map_err(engine_error)?;
                writeln!(self.stdout, "{rendered}")
                    .and_then(|()| self.stdout.flush())
                    .map_err(DispatchError::Stdout)
            }
            OutputTarget::File(path) => {
                self.engine.to_file(settings, path).map_err(engine_error)?;
                tracing::info!(path = %path.display(), "Changelog written");
                Ok(())
            }
        }
    }
}
