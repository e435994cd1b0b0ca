//! Compilation of attribute definitions into value validators.
//!
//! [`create_attribute_validator`] walks a validated [`AttributeDefinition`] once
//! and produces an [`AttributeValidator`]: an immutable tree that checks and
//! canonicalizes values without consulting the definition again. The tree is
//! layered in a fixed order:
//!
//! 1. a base validator chosen by the data type,
//! 2. a sequence wrapper for multi-valued attributes, non-empty when required,
//! 3. an optional wrapper accepting an absent value when not required.
//!
//! Complex attributes compile one such tree per sub-attribute. Sub-attributes
//! are never complex, so the recursion is at most one level deep.

use super::formats::{self, json_type_name};
use super::types::{
    AttributeCharacteristics, AttributeDefinition, ReferenceAttribute, ReferenceType, SimpleAttribute,
    SimpleType, SubAttributeDefinition,
};
use super::urn::SchemaUrn;
use super::value::AttributeValue;
use crate::config::ValidationConfig;
use crate::error::{ValidationError, ValidationResult};
use log::{debug, trace};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

/// Compile a validator for values of an attribute with the default configuration.
///
/// # Examples
///
/// ```rust
/// use scim_schema::schema::{AttributeValue, create_attribute_schema, create_attribute_validator};
/// use serde_json::json;
///
/// let definition = create_attribute_schema(&json!({
///     "name": "nickName",
///     "multiValued": false
/// }))
/// .unwrap();
/// let validator = create_attribute_validator(&definition);
///
/// assert_eq!(
///     validator.validate(Some(&json!("Babs"))).unwrap(),
///     Some(AttributeValue::String("babs".to_string()))
/// );
/// assert_eq!(validator.validate(None).unwrap(), None);
/// ```
pub fn create_attribute_validator(definition: &AttributeDefinition) -> AttributeValidator {
    create_attribute_validator_with_config(definition, &ValidationConfig::default())
}

/// Compile a validator for values of an attribute.
pub fn create_attribute_validator_with_config(
    definition: &AttributeDefinition,
    config: &ValidationConfig,
) -> AttributeValidator {
    let root = match definition {
        AttributeDefinition::Simple(attr) => compile_simple(attr),
        AttributeDefinition::Reference(attr) => compile_reference(attr),
        AttributeDefinition::Complex(attr) => {
            let sub_attributes = attr
                .sub_attributes
                .iter()
                .map(|sub| (sub.name().to_string(), compile_sub_attribute(sub)))
                .collect();
            let scalar = ScalarValidator::Complex {
                sub_attributes,
                null_as_absent: config.null_as_absent,
            };
            ValueValidator::layered(scalar, &attr.characteristics)
        }
    };

    debug!(
        "Compiled validator for {} attribute '{}'",
        definition.data_type(),
        definition.name()
    );

    AttributeValidator {
        name: definition.name().to_string(),
        null_as_absent: config.null_as_absent,
        root,
    }
}

fn compile_sub_attribute(sub: &SubAttributeDefinition) -> ValueValidator {
    match sub {
        SubAttributeDefinition::Simple(attr) => compile_simple(attr),
        SubAttributeDefinition::Reference(attr) => compile_reference(attr),
    }
}

fn compile_simple(attr: &SimpleAttribute) -> ValueValidator {
    let characteristics = &attr.characteristics;
    let scalar = match attr.data_type {
        SimpleType::String => {
            let canonical_values = characteristics
                .canonical_values
                .iter()
                .map(|value| fold_case(value, characteristics.case_exact))
                .collect();
            ScalarValidator::String {
                canonical_values,
                case_exact: characteristics.case_exact,
            }
        }
        SimpleType::Boolean => ScalarValidator::Boolean,
        SimpleType::Decimal => ScalarValidator::Decimal,
        SimpleType::Integer => ScalarValidator::Integer,
        SimpleType::DateTime => ScalarValidator::DateTime,
        SimpleType::Binary => ScalarValidator::Binary,
    };
    ValueValidator::layered(scalar, characteristics)
}

fn compile_reference(attr: &ReferenceAttribute) -> ValueValidator {
    let scalar = ScalarValidator::Reference {
        reference_types: attr.reference_types.clone(),
    };
    ValueValidator::layered(scalar, &attr.characteristics)
}

fn fold_case(value: &str, case_exact: bool) -> String {
    if case_exact {
        value.to_string()
    } else {
        value.to_lowercase()
    }
}

/// A compiled, reusable validator for the values of one attribute.
///
/// Validators hold no mutable state and can be shared between threads.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeValidator {
    name: String,
    null_as_absent: bool,
    root: ValueValidator,
}

impl AttributeValidator {
    /// Name of the attribute, used as the root of error paths.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validate an untyped value, `None` meaning absent.
    ///
    /// Returns the canonical value, or `None` when an absent value is acceptable.
    pub fn validate(&self, value: Option<&Value>) -> ValidationResult<Option<AttributeValue>> {
        trace!("Validating value of attribute '{}'", self.name);
        let input = value.map(Input::Json);
        self.root
            .validate(&self.name, present(input, self.null_as_absent))
    }

    /// Validate an already-typed value, such as a parsed date-time or decoded bytes.
    pub fn validate_typed(&self, value: Option<&AttributeValue>) -> ValidationResult<Option<AttributeValue>> {
        trace!("Validating typed value of attribute '{}'", self.name);
        self.root.validate(&self.name, value.map(Input::Typed))
    }
}

/// Multiplicity and optionality layers around a base validator.
#[derive(Debug, Clone, PartialEq)]
enum ValueValidator {
    Scalar(ScalarValidator),
    Multi { item: ScalarValidator, non_empty: bool },
    Optional(Box<ValueValidator>),
}

impl ValueValidator {
    /// Wrap a base validator according to `multiValued` and `required`.
    ///
    /// Optionality is layered the same way for single- and multi-valued
    /// attributes: only required attributes reject an absent value.
    fn layered(scalar: ScalarValidator, characteristics: &AttributeCharacteristics) -> Self {
        let validator = if characteristics.multi_valued {
            Self::Multi {
                item: scalar,
                non_empty: characteristics.required,
            }
        } else {
            Self::Scalar(scalar)
        };

        if characteristics.required {
            validator
        } else {
            Self::Optional(Box::new(validator))
        }
    }

    fn validate(&self, path: &str, input: Option<Input<'_>>) -> ValidationResult<Option<AttributeValue>> {
        match (self, input) {
            (Self::Optional(_), None) => Ok(None),
            (_, None) => Err(ValidationError::missing_required(path)),
            (_, Some(input)) => self.validate_present(path, input).map(Some),
        }
    }

    fn validate_present(&self, path: &str, input: Input<'_>) -> ValidationResult<AttributeValue> {
        match self {
            Self::Optional(inner) => inner.validate_present(path, input),
            Self::Scalar(scalar) => {
                if input.is_array() {
                    return Err(ValidationError::ExpectedSingleValue {
                        attribute: path.to_string(),
                    });
                }
                scalar.validate(path, input)
            }
            Self::Multi { item, non_empty } => {
                let items = input.items().ok_or_else(|| ValidationError::ExpectedMultiValue {
                    attribute: path.to_string(),
                })?;
                if *non_empty && items.is_empty() {
                    return Err(ValidationError::EmptyMultiValue {
                        attribute: path.to_string(),
                    });
                }

                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, value)| item.validate(&format!("{path}[{index}]"), value))
                    .collect::<ValidationResult<Vec<_>>>()
                    .map(AttributeValue::Multi)
            }
        }
    }
}

/// Base validator selected by the data type.
#[derive(Debug, Clone, PartialEq)]
enum ScalarValidator {
    String {
        /// Permitted values, lower-cased unless `case_exact`
        canonical_values: Vec<String>,
        case_exact: bool,
    },
    Boolean,
    Decimal,
    Integer,
    DateTime,
    Binary,
    Reference {
        reference_types: Vec<ReferenceType>,
    },
    Complex {
        /// Lower-cased sub-attribute names with their validators
        sub_attributes: Vec<(String, ValueValidator)>,
        null_as_absent: bool,
    },
}

impl ScalarValidator {
    fn expected(&self) -> &'static str {
        match self {
            Self::String { .. } => "string",
            Self::Boolean => "boolean",
            Self::Decimal => "decimal",
            Self::Integer => "integer",
            Self::DateTime => "dateTime",
            Self::Binary => "binary",
            Self::Reference { .. } => "reference",
            Self::Complex { .. } => "complex",
        }
    }

    fn type_mismatch(&self, path: &str, input: Input<'_>) -> ValidationError {
        ValidationError::invalid_data_type(path, self.expected(), input.type_name())
    }

    fn validate(&self, path: &str, input: Input<'_>) -> ValidationResult<AttributeValue> {
        match self {
            Self::String {
                canonical_values,
                case_exact,
            } => {
                let text = input
                    .as_text()
                    .ok_or_else(|| self.type_mismatch(path, input))?;
                let value = fold_case(text, *case_exact);
                if !canonical_values.is_empty() && !canonical_values.contains(&value) {
                    return Err(ValidationError::InvalidCanonicalValue {
                        attribute: path.to_string(),
                        value: text.to_string(),
                        allowed: canonical_values.clone(),
                    });
                }
                Ok(AttributeValue::String(value))
            }
            Self::Boolean => match input {
                Input::Json(Value::Bool(b)) | Input::Typed(AttributeValue::Boolean(b)) => {
                    Ok(AttributeValue::Boolean(*b))
                }
                _ => Err(self.type_mismatch(path, input)),
            },
            Self::Decimal => match input {
                Input::Json(Value::Number(n)) => n
                    .as_f64()
                    .map(AttributeValue::Decimal)
                    .ok_or_else(|| self.type_mismatch(path, input)),
                Input::Typed(AttributeValue::Decimal(d)) => Ok(AttributeValue::Decimal(*d)),
                Input::Typed(AttributeValue::Integer(i)) => Ok(AttributeValue::Decimal(*i as f64)),
                _ => Err(self.type_mismatch(path, input)),
            },
            Self::Integer => validate_integer(input).ok_or_else(|| match input {
                Input::Json(Value::Number(n)) => ValidationError::InvalidIntegerValue {
                    attribute: path.to_string(),
                    value: n.to_string(),
                },
                Input::Typed(AttributeValue::Decimal(d)) => ValidationError::InvalidIntegerValue {
                    attribute: path.to_string(),
                    value: d.to_string(),
                },
                _ => self.type_mismatch(path, input),
            }),
            Self::DateTime => match input {
                Input::Typed(AttributeValue::DateTime(dt)) => Ok(AttributeValue::DateTime(*dt)),
                _ => {
                    let text = input
                        .as_text()
                        .ok_or_else(|| self.type_mismatch(path, input))?;
                    formats::parse_datetime(text)
                        .map(AttributeValue::DateTime)
                        .ok_or_else(|| ValidationError::InvalidDateTimeFormat {
                            attribute: path.to_string(),
                            value: text.to_string(),
                        })
                }
            },
            Self::Binary => match input {
                Input::Typed(AttributeValue::Binary(bytes)) => Ok(AttributeValue::Binary(bytes.clone())),
                _ => {
                    let text = input
                        .as_text()
                        .ok_or_else(|| self.type_mismatch(path, input))?;
                    formats::decode_base64(text)
                        .map(AttributeValue::Binary)
                        .map_err(|e| ValidationError::InvalidBinaryData {
                            attribute: path.to_string(),
                            details: e.to_string(),
                        })
                }
            },
            Self::Reference { reference_types } => {
                let text = match input {
                    Input::Typed(AttributeValue::Reference(s)) => s.as_str(),
                    _ => input
                        .as_text()
                        .ok_or_else(|| self.type_mismatch(path, input))?,
                };
                if reference_types.iter().any(|kind| matches_reference(kind, text)) {
                    Ok(AttributeValue::Reference(text.to_string()))
                } else {
                    Err(ValidationError::InvalidReference {
                        attribute: path.to_string(),
                        value: text.to_string(),
                        reference_types: reference_types.iter().map(ToString::to_string).collect(),
                    })
                }
            }
            Self::Complex {
                sub_attributes,
                null_as_absent,
            } => {
                let entries = input
                    .entries()
                    .ok_or_else(|| self.type_mismatch(path, input))?;

                if let Some((key, _)) = entries.iter().find(|(key, _)| {
                    !sub_attributes
                        .iter()
                        .any(|(name, _)| name.eq_ignore_ascii_case(key))
                }) {
                    return Err(ValidationError::UnknownSubAttribute {
                        attribute: path.to_string(),
                        sub_attribute: key.to_string(),
                    });
                }

                if let Some(key) = repeated_name(entries.iter().map(|(key, _)| *key)) {
                    return Err(ValidationError::DuplicateSubAttribute {
                        attribute: path.to_string(),
                        sub_attribute: key,
                    });
                }

                let mut values = BTreeMap::new();
                for (name, validator) in sub_attributes {
                    let input = entries
                        .iter()
                        .find(|(key, _)| key.eq_ignore_ascii_case(name))
                        .map(|(_, value)| *value);
                    let sub_path = format!("{path}.{name}");
                    if let Some(value) = validator.validate(&sub_path, present(input, *null_as_absent))? {
                        values.insert(name.clone(), value);
                    }
                }
                Ok(AttributeValue::Complex(values))
            }
        }
    }
}

/// Whole numbers only. Non-integral or out-of-range numbers yield `None`.
fn validate_integer(input: Input<'_>) -> Option<AttributeValue> {
    let value = match input {
        Input::Json(Value::Number(n)) => match n.as_i64() {
            Some(i) => Some(i),
            None if n.is_u64() => None,
            None => n.as_f64().and_then(integral),
        },
        Input::Typed(AttributeValue::Integer(i)) => Some(*i),
        Input::Typed(AttributeValue::Decimal(d)) => integral(*d),
        _ => None,
    };
    value.map(AttributeValue::Integer)
}

fn integral(value: f64) -> Option<i64> {
    // i64::MAX is not representable as f64; the bound is exclusive of 2^63.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (value.is_finite() && value.fract() == 0.0 && value >= -LIMIT && value < LIMIT).then_some(value as i64)
}

fn matches_reference(kind: &ReferenceType, value: &str) -> bool {
    match kind {
        ReferenceType::Uri => SchemaUrn::is_valid(value),
        ReferenceType::External => formats::is_absolute_url(value),
        ReferenceType::Resource(_) => !value.is_empty(),
    }
}

/// A value under validation: untyped JSON or an already-canonical value.
#[derive(Debug, Clone, Copy)]
enum Input<'a> {
    Json(&'a Value),
    Typed(&'a AttributeValue),
}

impl<'a> Input<'a> {
    fn type_name(self) -> &'static str {
        match self {
            Self::Json(value) => json_type_name(value),
            Self::Typed(value) => value.type_name(),
        }
    }

    fn is_array(self) -> bool {
        matches!(self, Self::Json(Value::Array(_)) | Self::Typed(AttributeValue::Multi(_)))
    }

    fn is_null(self) -> bool {
        matches!(self, Self::Json(Value::Null))
    }

    fn as_text(self) -> Option<&'a str> {
        match self {
            Self::Json(Value::String(s)) | Self::Typed(AttributeValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    fn items(self) -> Option<Vec<Input<'a>>> {
        match self {
            Self::Json(Value::Array(items)) => Some(items.iter().map(Input::Json).collect()),
            Self::Typed(AttributeValue::Multi(items)) => Some(items.iter().map(Input::Typed).collect()),
            _ => None,
        }
    }

    fn entries(self) -> Option<Vec<(&'a str, Input<'a>)>> {
        match self {
            Self::Json(Value::Object(map)) => {
                Some(map.iter().map(|(k, v)| (k.as_str(), Input::Json(v))).collect())
            }
            Self::Typed(AttributeValue::Complex(map)) => {
                Some(map.iter().map(|(k, v)| (k.as_str(), Input::Typed(v))).collect())
            }
            _ => None,
        }
    }
}

/// First name, lower-cased, that equals an earlier one ignoring case.
pub(crate) fn repeated_name<'k>(names: impl IntoIterator<Item = &'k str>) -> Option<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .map(str::to_lowercase)
        .find(|name| !seen.insert(name.clone()))
}

fn present(input: Option<Input<'_>>, null_as_absent: bool) -> Option<Input<'_>> {
    input.filter(|input| !(null_as_absent && input.is_null()))
}
