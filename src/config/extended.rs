//! Decoding of the JSON-valued flags.
//!
//! Extended variables are an arbitrary JSON object exposed to templates under
//! a fixed namespace. Extended headers are a JSON object whose values must all
//! be strings; they are checked explicitly so the error can name the key.

use std::collections::BTreeMap;

use http::HeaderValue;
use http::header::HeaderName;
use serde_json::{Map, Value};

use super::defaults;
use super::error::{UsageError, flag, json_type_name};

/// Template variables supplied by the user, wrapped under `extended`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendedVariables(Map<String, Value>);

impl ExtendedVariables {
    /// Wraps a user object one level deeper under the `extended` key.
    #[must_use]
    pub fn wrap(object: Map<String, Value>) -> Self {
        let mut root = Map::new();
        root.insert(defaults::EXTENDED_KEY.to_string(), Value::Object(object));
        Self(root)
    }

    /// Parses the `--extended-variables` flag value.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON or not a JSON object.
    pub fn parse(text: &str) -> Result<Self, UsageError> {
        let object = parse_object(flag::EXTENDED_VARIABLES, text)?;
        Ok(Self::wrap(object))
    }

    /// Looks up a dotted path such as `extended.var1`.
    #[must_use]
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.0.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Returns true if no variables were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the wrapped map, ready to be merged into a template context.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Parses the `--extended-headers` flag value into a header map.
///
/// # Errors
///
/// Returns an error if the text is not a JSON object, if any value is not a
/// string, or if a name or value is not a valid HTTP header.
pub fn parse_headers(text: &str) -> Result<BTreeMap<String, String>, UsageError> {
    let object = parse_object(flag::EXTENDED_HEADERS, text)?;

    let mut headers = BTreeMap::new();
    for (key, value) in object {
        match value {
            Value::String(value) => {
                headers.insert(key, value);
            }
            other => {
                return Err(UsageError::NonStringHeader {
                    key,
                    found: json_type_name(&other),
                });
            }
        }
    }

    validate_headers(&headers)?;
    Ok(headers)
}

/// Checks that every name and value is a valid HTTP header.
///
/// # Errors
///
/// Returns an error naming the first invalid header.
pub fn validate_headers(headers: &BTreeMap<String, String>) -> Result<(), UsageError> {
    for (name, value) in headers {
        name.parse::<HeaderName>()
            .map_err(|e| UsageError::InvalidHeaderName {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        HeaderValue::from_str(value).map_err(|e| UsageError::InvalidHeaderValue {
            name: name.clone(),
            reason: e.to_string(),
        })?;
    }
    Ok(())
}

fn parse_object(flag: &'static str, text: &str) -> Result<Map<String, Value>, UsageError> {
    let value: Value =
        serde_json::from_str(text).map_err(|source| UsageError::InvalidJson { flag, source })?;

    match value {
        Value::Object(object) => Ok(object),
        other => Err(UsageError::NotAnObject {
            flag,
            found: json_type_name(&other),
        }),
    }
}
