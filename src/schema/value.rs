//! Canonical attribute values produced by validators.

use super::formats;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// A validated, canonical attribute value.
///
/// Strings of case-insensitive attributes are lower-cased, date-times are
/// normalized to UTC, binary data is decoded and complex values are keyed by
/// their lower-cased sub-attribute names.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    String(String),
    Boolean(bool),
    Decimal(f64),
    Integer(i64),
    DateTime(DateTime<Utc>),
    Binary(Vec<u8>),
    Reference(String),
    Complex(BTreeMap<String, AttributeValue>),
    Multi(Vec<AttributeValue>),
}

impl AttributeValue {
    /// Name of the value's type, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Boolean(_) => "boolean",
            Self::Decimal(_) => "decimal",
            Self::Integer(_) => "integer",
            Self::DateTime(_) => "dateTime",
            Self::Binary(_) => "binary",
            Self::Reference(_) => "reference",
            Self::Complex(_) => "object",
            Self::Multi(_) => "array",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Reference(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Decimal(d) => Some(*d),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, AttributeValue>> {
        match self {
            Self::Complex(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[AttributeValue]> {
        match self {
            Self::Multi(values) => Some(values),
            _ => None,
        }
    }

    /// JSON form of the value.
    ///
    /// Date-times are rendered as RFC 3339 and binary data as padded base64,
    /// so validating the result again yields an equal value.
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) | Self::Reference(s) => json!(s),
            Self::Boolean(b) => json!(b),
            Self::Decimal(d) => json!(d),
            Self::Integer(i) => json!(i),
            Self::DateTime(dt) => json!(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Binary(bytes) => json!(formats::encode_base64(bytes)),
            Self::Complex(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
            Self::Multi(values) => Value::Array(values.iter().map(|v| v.to_json()).collect()),
        }
    }
}

impl From<AttributeValue> for Value {
    fn from(value: AttributeValue) -> Self {
        value.to_json()
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
