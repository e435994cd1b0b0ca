//! Attributes: a definition bound to its compiled validator.

use super::definition::create_attribute_schema_with_config;
use super::types::AttributeDefinition;
use super::validation::{AttributeValidator, create_attribute_validator_with_config};
use super::value::AttributeValue;
use crate::config::ValidationConfig;
use crate::error::{ValidationError, ValidationResult};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// A SCIM attribute.
///
/// The validator is compiled once when the attribute is created and reused
/// for every value.
///
/// # Examples
///
/// ```rust
/// use scim_schema::schema::{Attribute, AttributeValue};
/// use serde_json::json;
///
/// let emails = Attribute::new(&json!({
///     "name": "emails",
///     "type": "complex",
///     "multiValued": true,
///     "required": true,
///     "subAttributes": [
///         { "name": "value", "multiValued": false, "required": true },
///         { "name": "type", "multiValued": false, "canonicalValues": ["work", "home"] }
///     ]
/// }))
/// .unwrap();
///
/// let value = emails
///     .validate(&json!([{ "value": "BJensen@example.com", "type": "Work" }]))
///     .unwrap();
/// assert!(matches!(value, AttributeValue::Multi(ref items) if items.len() == 1));
///
/// assert!(emails.validate(&json!([{ "value": "a@example.com", "type": "school" }])).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    definition: AttributeDefinition,
    validator: AttributeValidator,
}

impl Attribute {
    /// Create an attribute from its JSON definition with the default configuration.
    pub fn new(definition: &Value) -> ValidationResult<Self> {
        Self::with_config(definition, &ValidationConfig::default())
    }

    /// Create an attribute from its JSON definition.
    pub fn with_config(definition: &Value, config: &ValidationConfig) -> ValidationResult<Self> {
        let definition = create_attribute_schema_with_config(definition, config)?;
        Ok(Self::from_definition_with_config(definition, config))
    }

    /// Create an attribute from an already validated definition.
    pub fn from_definition(definition: AttributeDefinition) -> Self {
        Self::from_definition_with_config(definition, &ValidationConfig::default())
    }

    pub fn from_definition_with_config(definition: AttributeDefinition, config: &ValidationConfig) -> Self {
        let validator = create_attribute_validator_with_config(&definition, config);
        Self {
            definition,
            validator,
        }
    }

    pub fn name(&self) -> &str {
        self.definition.name()
    }

    pub fn definition(&self) -> &AttributeDefinition {
        &self.definition
    }

    pub fn validator(&self) -> &AttributeValidator {
        &self.validator
    }

    /// Validate a value that must be present.
    ///
    /// An absent (`null`) value fails with
    /// [`ValidationError::MissingRequiredAttribute`] for required attributes and
    /// [`ValidationError::ValueAbsent`] for optional ones.
    pub fn validate(&self, value: &Value) -> ValidationResult<AttributeValue> {
        self.validate_optional(Some(value))?
            .ok_or_else(|| ValidationError::ValueAbsent {
                attribute: self.name().to_string(),
            })
    }

    /// Validate a value that may be absent.
    pub fn validate_optional(&self, value: Option<&Value>) -> ValidationResult<Option<AttributeValue>> {
        self.validator.validate(value)
    }

    /// Validate an already-typed value.
    pub fn validate_value(&self, value: Option<&AttributeValue>) -> ValidationResult<Option<AttributeValue>> {
        self.validator.validate_typed(value)
    }
}

impl TryFrom<&Value> for Attribute {
    type Error = ValidationError;

    fn try_from(value: &Value) -> ValidationResult<Self> {
        Self::new(value)
    }
}

impl From<AttributeDefinition> for Attribute {
    fn from(definition: AttributeDefinition) -> Self {
        Self::from_definition(definition)
    }
}

impl Serialize for Attribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.definition.serialize(serializer)
    }
}
