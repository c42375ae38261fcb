//! Error types for settings resolution and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for settings resolution.
///
/// Every variant is a usage problem: the invocation cannot proceed and the
/// user is shown the message together with the full help text.
#[derive(Debug, Error)]
pub enum UsageError {
    /// Failed to read the settings file.
    #[error("Failed to read settings file '{}': {source}", path.display())]
    FileRead {
        /// Path to the settings file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the settings file.
    #[error("Failed to parse settings file '{}': {reason}", path.display())]
    FileParse {
        /// Path to the settings file
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// Failed to write a settings file (for the init command).
    #[error("Failed to write settings file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the settings file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// None of the output flags was supplied.
    #[error(
        "You must supply an output: {} <filename>, {} or {} http://...",
        flag::OUTPUT_FILE,
        flag::STDOUT,
        flag::MEDIAWIKI_URL
    )]
    NoOutput,

    /// The ignore-older-than value does not match the fixed date format.
    #[error(
        "Invalid date '{value}' for {}: expected YYYY-MM-dd HH:mm:ss ({source})",
        flag::IGNORE_OLDER_THAN
    )]
    InvalidDate {
        /// The rejected value
        value: String,
        /// Underlying parse error
        #[source]
        source: chrono::ParseError,
    },

    /// A JSON-valued flag is not valid JSON.
    #[error("Invalid JSON for {flag}: {source}")]
    InvalidJson {
        /// Flag that carried the payload
        flag: &'static str,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A JSON-valued flag is valid JSON but not an object.
    #[error("Invalid JSON for {flag}: expected an object, found {found}")]
    NotAnObject {
        /// Flag that carried the payload
        flag: &'static str,
        /// JSON type that was found instead
        found: &'static str,
    },

    /// An extended header has a non-string value.
    #[error("Invalid value for extended header '{key}': expected a string, found {found}")]
    NonStringHeader {
        /// Offending header name
        key: String,
        /// JSON type that was found instead
        found: &'static str,
    },

    /// Invalid header name.
    #[error("Invalid header name '{name}': {reason}")]
    InvalidHeaderName {
        /// The invalid header name
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid header value.
    #[error("Invalid header value for '{name}': {reason}")]
    InvalidHeaderValue {
        /// The header name
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid URL provided.
    #[error("Invalid URL '{url}' for {flag}: {reason}")]
    InvalidUrl {
        /// Flag that carried the URL
        flag: &'static str,
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid template content (Handlebars syntax error).
    #[error("Invalid template content: {reason}")]
    InvalidTemplate {
        /// Reason for invalidity
        reason: String,
    },
}

/// Command-line spelling of the flags referenced by error messages.
///
/// Use these constants so messages and tests name flags the same way.
pub mod flag {
    /// Print the changelog to stdout.
    pub const STDOUT: &str = "--stdout";
    /// Write the changelog to a file.
    pub const OUTPUT_FILE: &str = "--output-file";
    /// Publish the changelog to MediaWiki.
    pub const MEDIAWIKI_URL: &str = "--mediawiki-url";
    /// Ignore commits older than a date.
    pub const IGNORE_OLDER_THAN: &str = "--ignore-older-than";
    /// Extended template variables.
    pub const EXTENDED_VARIABLES: &str = "--extended-variables";
    /// Extended tracker request headers.
    pub const EXTENDED_HEADERS: &str = "--extended-headers";
}

/// Returns a human-readable name for the JSON type of `value`.
pub(crate) const fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
