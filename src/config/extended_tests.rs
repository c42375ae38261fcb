//! Tests for JSON flag decoding.

use serde_json::json;

use super::UsageError;
use super::extended::{ExtendedVariables, parse_headers};

mod variables {
    use super::*;

    #[test]
    fn object_is_wrapped_under_extended() {
        let variables = ExtendedVariables::parse(r#"{"var1":"val1"}"#).unwrap();

        assert_eq!(variables.get_path("extended.var1"), Some(&json!("val1")));
        assert_eq!(variables.get_path("var1"), None);
    }

    #[test]
    fn nested_values_are_addressable() {
        let variables =
            ExtendedVariables::parse(r#"{"release":{"name":"Aurora","number":3}}"#).unwrap();

        assert_eq!(
            variables.get_path("extended.release.name"),
            Some(&json!("Aurora"))
        );
        assert_eq!(
            variables.get_path("extended.release.number"),
            Some(&json!(3))
        );
        assert_eq!(variables.get_path("extended.release.missing"), None);
    }

    #[test]
    fn empty_object_still_creates_namespace() {
        let variables = ExtendedVariables::parse("{}").unwrap();

        assert!(!variables.is_empty());
        assert_eq!(variables.get_path("extended"), Some(&json!({})));
    }

    #[test]
    fn default_is_empty() {
        assert!(ExtendedVariables::default().is_empty());
    }

    #[test]
    fn syntax_error_is_fatal() {
        let result = ExtendedVariables::parse(r#"{"var1": "#);

        assert!(matches!(
            result,
            Err(UsageError::InvalidJson {
                flag: "--extended-variables",
                ..
            })
        ));
    }

    #[test]
    fn non_object_is_rejected() {
        let result = ExtendedVariables::parse(r#"["a", "b"]"#);

        assert!(matches!(
            result,
            Err(UsageError::NotAnObject { found: "array", .. })
        ));
    }
}

mod headers {
    use super::*;

    #[test]
    fn string_values_are_stored_unwrapped() {
        let headers = parse_headers(r#"{"X-Token":"abc"}"#).unwrap();

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("X-Token").map(String::as_str), Some("abc"));
    }

    #[test]
    fn multiple_headers_are_kept() {
        let headers =
            parse_headers(r#"{"CF-Access-Client-ID":"abc.access","CF-Access-Client-Secret":"s"}"#)
                .unwrap();

        assert_eq!(headers.len(), 2);
        assert!(headers.contains_key("CF-Access-Client-ID"));
        assert!(headers.contains_key("CF-Access-Client-Secret"));
    }

    #[test]
    fn number_value_is_fatal_and_names_key() {
        let result = parse_headers(r#"{"X-Token":5}"#);

        match result {
            Err(UsageError::NonStringHeader { key, found }) => {
                assert_eq!(key, "X-Token");
                assert_eq!(found, "number");
            }
            other => panic!("expected NonStringHeader, got {other:?}"),
        }
    }

    #[test]
    fn null_value_is_fatal() {
        let result = parse_headers(r#"{"X-Token":null}"#);

        assert!(matches!(
            result,
            Err(UsageError::NonStringHeader { found: "null", .. })
        ));
    }

    #[test]
    fn error_message_mentions_key() {
        let err = parse_headers(r#"{"X-Token":true}"#).unwrap_err();

        assert!(err.to_string().contains("X-Token"));
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let result = parse_headers(r#"{"Bad Header":"value"}"#);

        assert!(matches!(
            result,
            Err(UsageError::InvalidHeaderName { .. })
        ));
    }

    #[test]
    fn invalid_header_value_is_rejected() {
        let result = parse_headers(r#"{"X-Token":"line\nbreak"}"#);

        assert!(matches!(
            result,
            Err(UsageError::InvalidHeaderValue { .. })
        ));
    }

    #[test]
    fn syntax_error_is_fatal() {
        let result = parse_headers("not json");

        assert!(matches!(
            result,
            Err(UsageError::InvalidJson {
                flag: "--extended-headers",
                ..
            })
        ));
    }

    #[test]
    fn string_payload_is_not_an_object() {
        let result = parse_headers(r#""X-Token""#);

        assert!(matches!(
            result,
            Err(UsageError::NotAnObject { found: "string", .. })
        ));
    }
}
