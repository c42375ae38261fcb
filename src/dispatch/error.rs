//! Error types for output dispatch.

use thiserror::Error;

use crate::engine::EngineError;

/// Error type for output dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The engine failed while serving a sink.
    #[error("Failed to write changelog to {sink}: {source}")]
    Engine {
        /// Sink name (`wiki`, `stdout` or `file`)
        sink: &'static str,
        /// Underlying engine error
        #[source]
        source: EngineError,
    },

    /// Writing the rendered changelog to stdout failed.
    #[error("Failed to write changelog to stdout: {0}")]
    Stdout(#[source] std::io::Error),
}

impl DispatchError {
    /// Name of the sink that failed.
    #[must_use]
    pub const fn sink(&self) -> &'static str {
        match self {
            Self::Engine { sink, .. } => sink,
            Self::Stdout(_) => "stdout",
        }
    }
}
