//! Directive syntax parsing.
//!
//! Parses the strict directive grammar: `[plugin:typeKey data='{...json...}']`,
//! where the payload attribute is optional and its JSON must be an object.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

/// Strict directive pattern: type key plus optional single-quoted payload.
///
/// The type key is restricted to `[A-Za-z0-9_]+`; the payload carries JSON
/// (double quotes inside), so a single quote cannot occur within it.
static DIRECTIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[plugin:([A-Za-z0-9_]+)(?:[ \t]+data='([^']*)')?\]$").unwrap()
});

/// A parsed and validated directive.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    /// Block type key selecting the implementation.
    pub type_key: String,
    /// Parsed payload parameters. Empty when the directive has no payload.
    pub params: Map<String, Value>,
}

/// Error parsing one directive span.
///
/// Parse errors are always local to a single directive; the composer turns
/// them into placeholder nodes rather than aborting the render.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The span does not match the directive grammar.
    #[error("invalid block directive format: {raw}")]
    InvalidFormat {
        /// The offending raw span.
        raw: String,
    },
    /// The payload attribute is present but is not a JSON object.
    #[error("invalid block directive payload in {raw}: {cause}")]
    InvalidPayload {
        /// The offending raw span.
        raw: String,
        /// Why the payload was rejected.
        cause: String,
    },
}

/// Check whether a string is a valid block type key.
///
/// Type keys match `[A-Za-z0-9_]+`.
#[must_use]
pub fn is_valid_type_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse one raw directive span.
///
/// A missing or empty payload attribute yields empty params; that is not an
/// error. Payload parsing is plain JSON, restricted to object literals.
pub fn parse(raw: &str) -> Result<Directive, ParseError> {
    let caps = DIRECTIVE_PATTERN
        .captures(raw)
        .ok_or_else(|| ParseError::InvalidFormat { raw: raw.to_owned() })?;

    let type_key = caps[1].to_owned();

    let payload = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
    let params = if payload.is_empty() {
        Map::new()
    } else {
        match serde_json::from_str::<Value>(payload) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(ParseError::InvalidPayload {
                    raw: raw.to_owned(),
                    cause: "payload is not a JSON object".to_owned(),
                });
            }
            Err(e) => {
                return Err(ParseError::InvalidPayload {
                    raw: raw.to_owned(),
                    cause: e.to_string(),
                });
            }
        }
    };

    Ok(Directive { type_key, params })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_directive_with_payload() {
        let directive = parse(r#"[plugin:greeting data='{"name":"Ada"}']"#).unwrap();
        assert_eq!(directive.type_key, "greeting");
        assert_eq!(directive.params.get("name"), Some(&json!("Ada")));
    }

    #[test]
    fn test_directive_without_payload() {
        let directive = parse("[plugin:greeting]").unwrap();
        assert_eq!(directive.type_key, "greeting");
        assert!(directive.params.is_empty());
    }

    #[test]
    fn test_empty_payload_defaults_to_empty_params() {
        let directive = parse("[plugin:greeting data='']").unwrap();
        assert!(directive.params.is_empty());

        let directive = parse("[plugin:greeting data='{}']").unwrap();
        assert!(directive.params.is_empty());
    }

    #[test]
    fn test_nested_payload_values() {
        let directive =
            parse(r#"[plugin:slider data='{"images":["a.jpg","b.jpg"],"loop":true}']"#).unwrap();
        assert_eq!(
            directive.params.get("images"),
            Some(&json!(["a.jpg", "b.jpg"]))
        );
        assert_eq!(directive.params.get("loop"), Some(&json!(true)));
    }

    #[test]
    fn test_invalid_format() {
        for raw in [
            "[plugin:]",
            "[plugin: greeting]",
            "[plugin:foo-bar]",
            "[plugin:greeting data=\"{}\"]",
            "[plugin:greeting trailing]",
            "not a directive",
        ] {
            let err = parse(raw).unwrap_err();
            assert!(
                matches!(err, ParseError::InvalidFormat { .. }),
                "expected InvalidFormat for {raw:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_invalid_json_payload() {
        let err = parse("[plugin:greeting data='{bad}']").unwrap_err();
        match err {
            ParseError::InvalidPayload { raw, cause } => {
                assert_eq!(raw, "[plugin:greeting data='{bad}']");
                assert!(!cause.is_empty());
            }
            other => panic!("expected InvalidPayload, got {other:?}"),
        }
    }

    #[test]
    fn test_non_object_payload() {
        for raw in [
            "[plugin:greeting data='[1,2,3]']",
            "[plugin:greeting data='42']",
            "[plugin:greeting data='\"text\"']",
            "[plugin:greeting data='null']",
        ] {
            let err = parse(raw).unwrap_err();
            assert!(
                matches!(err, ParseError::InvalidPayload { .. }),
                "expected InvalidPayload for {raw:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_error_message_mentions_raw_span() {
        let err = parse("[plugin:bad format]").unwrap_err();
        assert!(err.to_string().contains("[plugin:bad format]"));
    }

    #[test]
    fn test_is_valid_type_key() {
        assert!(is_valid_type_key("greeting"));
        assert!(is_valid_type_key("videoEmbed"));
        assert!(is_valid_type_key("image_slider2"));
        assert!(!is_valid_type_key(""));
        assert!(!is_valid_type_key("foo-bar"));
        assert!(!is_valid_type_key("foo bar"));
        assert!(!is_valid_type_key("café"));
    }
}
