//! Format predicates and coercions used by characteristics and value validators.
//!
//! These cover the string grammars SCIM relies on: attribute names, absolute
//! URLs, root-relative paths, date-time strings and base64 payloads.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use url::Url;

/// Attribute name grammar from RFC 7643 section 2.1.
static ATTRIBUTE_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9$_-]*$").expect("ATTRIBUTE_NAME_REGEX is a valid regex pattern")
});

/// URL schemes accepted for absolute URLs.
const URL_SCHEMES: [&str; 3] = ["http", "https", "ftp"];

/// Check an attribute name against the SCIM `ATTRNAME` grammar.
///
/// The literal `$ref` is not part of the grammar; callers that accept it
/// check for it separately.
pub fn is_attribute_name(value: &str) -> bool {
    ATTRIBUTE_NAME_REGEX.is_match(value)
}

/// Check that a string is an absolute URL with a host.
///
/// URNs and relative references are rejected.
pub fn is_absolute_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => URL_SCHEMES.contains(&url.scheme()) && url.has_host(),
        Err(_) => false,
    }
}

/// Check that a string is a root-relative path.
///
/// Query strings, percent-encoding and `..` sequences are rejected.
pub fn is_root_path(value: &str) -> bool {
    if !value.starts_with('/') || value.contains("..") {
        return false;
    }

    value.chars().all(|c| {
        c.is_ascii_alphanumeric()
            || matches!(
                c,
                '/' | '.'
                    | '_'
                    | '-'
                    | '~'
                    | ':'
                    | '@'
                    | '!'
                    | '$'
                    | '&'
                    | '\''
                    | '('
                    | ')'
                    | '*'
                    | '+'
                    | ','
                    | ';'
                    | '='
            )
    })
}

/// Parse a date-time string into a UTC timestamp.
///
/// Accepts RFC 3339 (the SCIM `dateTime` format), RFC 2822, date-times without
/// an offset (read as UTC) and plain dates (midnight UTC).
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Decode a standard, padded base64 string.
pub fn decode_base64(value: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(value)
}

/// Encode bytes as standard, padded base64.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Get the type name of a JSON value for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "decimal",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
