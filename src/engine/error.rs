//! Error types for changelog engine operations.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for changelog engine operations.
///
/// Propagated unchanged to the process boundary; cause and remedy belong
/// to the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Failed to read the template file.
    #[error("Failed to read template '{}': {source}", path.display())]
    TemplateRead {
        /// Path to the template
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The template could not be compiled or rendered.
    #[error("Template error: {0}")]
    Template(String),

    /// Failed to write the rendered changelog.
    #[error("Failed to write changelog to '{}': {source}", path.display())]
    FileWrite {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The engine does not support the requested operation.
    #[error("Operation not supported by this engine: {operation}")]
    Unsupported {
        /// Operation name
        operation: &'static str,
    },

    /// Any other engine failure (history access, tracker authentication, ...).
    #[error("Changelog engine error: {0}")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync>),
}
