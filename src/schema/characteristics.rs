//! Parsing of individual attribute characteristics.
//!
//! Each characteristic of an attribute definition is parsed on its own: the
//! input is the raw JSON field (or `None` when absent) and the output is the
//! typed value, with the characteristic's default filled in where it has one.
//! Failures name the offending field path and the received value.
//!
//! `referenceTypes` and `subAttributes` are only parsed structurally here; their
//! validity depends on the sibling `type` field and is checked by
//! [`definition`](super::definition).

use super::formats::{self, json_type_name};
use super::types::{AttributeType, Mutability, Returned, Uniqueness};
use crate::error::{ValidationError, ValidationResult};
use serde_json::Value;
use std::str::FromStr;

/// Name reserved for the reference sub-attribute of multi-valued attributes.
pub const REF_NAME: &str = "$ref";

/// Join a definition path and a field name.
pub(crate) fn field_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

fn expect_str<'a>(field: &str, value: &'a Value) -> ValidationResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| ValidationError::invalid_field_type(field, "string", json_type_name(value)))
}

fn expect_bool(field: &str, value: &Value) -> ValidationResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| ValidationError::invalid_field_type(field, "boolean", json_type_name(value)))
}

fn parse_enum<T>(field: &str, value: Option<&Value>, allowed: fn() -> Vec<String>) -> ValidationResult<Option<T>>
where
    T: FromStr,
{
    let Some(value) = value else {
        return Ok(None);
    };
    let text = expect_str(field, value)?;
    text.parse::<T>()
        .map(Some)
        .map_err(|_| ValidationError::InvalidEnumValue {
            field: field.to_string(),
            value: text.to_string(),
            allowed: allowed(),
        })
}

/// The name of the attribute.
///
/// Required. Must follow the attribute name grammar and is lower-cased.
pub fn parse_name(field: &str, value: Option<&Value>) -> ValidationResult<String> {
    let value = value.ok_or_else(|| ValidationError::missing_field(field))?;
    let name = expect_str(field, value)?;
    if name.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if !formats::is_attribute_name(name) {
        return Err(ValidationError::InvalidName {
            field: field.to_string(),
            value: name.to_string(),
        });
    }
    Ok(name.to_lowercase())
}

/// The name of a reference attribute: a regular name or the literal `$ref`.
pub fn parse_reference_name(field: &str, value: Option<&Value>) -> ValidationResult<String> {
    match value {
        Some(Value::String(name)) if name == REF_NAME => Ok(REF_NAME.to_string()),
        _ => parse_name(field, value),
    }
}

/// The data type of the attribute. Defaults to `string`.
pub fn parse_type(field: &str, value: Option<&Value>) -> ValidationResult<AttributeType> {
    Ok(parse_enum(field, value, AttributeType::allowed_values)?.unwrap_or_default())
}

/// Whether the attribute holds an array of values. Required.
pub fn parse_multi_valued(field: &str, value: Option<&Value>) -> ValidationResult<bool> {
    let value = value.ok_or_else(|| ValidationError::missing_field(field))?;
    expect_bool(field, value)
}

/// A short description of the attribute. Defaults to an empty string.
pub fn parse_description(field: &str, value: Option<&Value>) -> ValidationResult<String> {
    value
        .map(|v| expect_str(field, v).map(str::to_string))
        .transpose()
        .map(Option::unwrap_or_default)
}

/// Whether a value is required. Defaults to `false`.
pub fn parse_required(field: &str, value: Option<&Value>) -> ValidationResult<bool> {
    value.map_or(Ok(false), |v| expect_bool(field, v))
}

/// Permitted values of a string attribute. Defaults to none (unrestricted).
pub fn parse_canonical_values(field: &str, value: Option<&Value>) -> ValidationResult<Vec<String>> {
    match value {
        None => Ok(Vec::new()),
        Some(value) => parse_string_list(field, value),
    }
}

/// Whether string values are case-sensitive. Defaults to `false`.
pub fn parse_case_exact(field: &str, value: Option<&Value>) -> ValidationResult<bool> {
    value.map_or(Ok(false), |v| expect_bool(field, v))
}

/// The mutability of the attribute. Defaults to `readWrite`.
pub fn parse_mutability(field: &str, value: Option<&Value>) -> ValidationResult<Mutability> {
    Ok(parse_enum(field, value, Mutability::allowed_values)?.unwrap_or_default())
}

/// When the attribute is returned. Defaults to `default`.
pub fn parse_returned(field: &str, value: Option<&Value>) -> ValidationResult<Returned> {
    Ok(parse_enum(field, value, Returned::allowed_values)?.unwrap_or_default())
}

/// The uniqueness of the attribute's values. Defaults to `none`.
pub fn parse_uniqueness(field: &str, value: Option<&Value>) -> ValidationResult<Uniqueness> {
    Ok(parse_enum(field, value, Uniqueness::allowed_values)?.unwrap_or_default())
}

/// Raw `referenceTypes`: a non-empty list of non-empty strings.
pub fn parse_reference_types(field: &str, value: &Value) -> ValidationResult<Vec<String>> {
    let types = parse_string_list(field, value)?;
    if types.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(types)
}

/// Raw `subAttributes`: a non-empty list, whose entries are parsed as definitions.
pub fn parse_sub_attribute_list<'a>(field: &str, value: &'a Value) -> ValidationResult<&'a [Value]> {
    let list = value
        .as_array()
        .ok_or_else(|| ValidationError::invalid_field_type(field, "array", json_type_name(value)))?;
    if list.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(list)
}

fn parse_string_list(field: &str, value: &Value) -> ValidationResult<Vec<String>> {
    let list = value
        .as_array()
        .ok_or_else(|| ValidationError::invalid_field_type(field, "array", json_type_name(value)))?;

    list.iter()
        .enumerate()
        .map(|(index, item)| {
            let item_field = format!("{field}[{index}]");
            let text = expect_str(&item_field, item)?;
            if text.is_empty() {
                return Err(ValidationError::empty_field(item_field));
            }
            Ok(text.to_string())
        })
        .collect()
}
