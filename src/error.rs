//! Error types for SCIM attribute and schema validation.
//!
//! Every failure raised while building a definition or validating a value is a
//! [`ValidationError`]. Each variant names the offending field or attribute path,
//! the received value and the constraint that was violated, so callers can build
//! precise diagnostics. [`ScimError`] wraps validation failures together with the
//! JSON and I/O errors that can occur while loading schema documents.

use std::fmt;
use std::path::PathBuf;

/// Top-level error type for loading and validating SCIM schemas.
#[derive(Debug, thiserror::Error)]
pub enum ScimError {
    /// Definition or value doesn't conform to its schema
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Schema document could not be read
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Broad category of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// Unknown fields, wrong field types or missing required fields
    Structural,
    /// A rule that depends on a sibling field was violated
    ConditionalInvariant,
    /// A value does not have the shape or type the validator expects
    ValueType,
    /// A value has the right shape but fails a format predicate
    Format,
    /// A value is not one of the permitted values
    EnumMembership,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Structural => "structural",
            Self::ConditionalInvariant => "conditional invariant",
            Self::ValueType => "value type",
            Self::Format => "format",
            Self::EnumMembership => "enum membership",
        };
        f.write_str(name)
    }
}

/// Validation errors for attribute definitions, schemas and attribute values.
///
/// Definition-level variants use `field` for the path of the offending
/// characteristic (for example `attributes[2].subAttributes[0].type`), while
/// value-level variants use `attribute` for the path of the offending value
/// (for example `emails[1].value`).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    // Structural errors
    /// Field that is not part of the definition format
    #[error("Unknown field '{field}'")]
    UnknownField { field: String },

    /// Required field is missing
    #[error("Required field '{field}' is missing")]
    MissingField { field: String },

    /// Field has the wrong JSON type
    #[error("Field '{field}' has invalid type, expected {expected}, got {actual}")]
    InvalidFieldType {
        field: String,
        expected: String,
        actual: String,
    },

    /// Field must not be empty
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    // Conditional invariant errors
    /// Reference attribute without `referenceTypes`
    #[error("Reference attribute '{attribute}' requires 'referenceTypes'")]
    MissingReferenceTypes { attribute: String },

    /// `referenceTypes` on an attribute that isn't a reference
    #[error("Attribute '{attribute}' of type '{data_type}' cannot declare 'referenceTypes'")]
    UnexpectedReferenceTypes { attribute: String, data_type: String },

    /// Complex attribute without `subAttributes`
    #[error("Complex attribute '{attribute}' requires 'subAttributes'")]
    MissingSubAttributes { attribute: String },

    /// `subAttributes` on an attribute that isn't complex
    #[error("Attribute '{attribute}' of type '{data_type}' cannot declare 'subAttributes'")]
    UnexpectedSubAttributes { attribute: String, data_type: String },

    /// Complex attribute nested inside another complex attribute
    #[error("Nested complex attributes are not allowed: '{attribute}'")]
    NestedComplexAttributes { attribute: String },

    /// Two attributes or sub-attributes whose names are equal ignoring case
    #[error("Field '{field}' repeats attribute name '{name}'")]
    DuplicateAttributeName { field: String, name: String },

    /// Reference type token that is neither `uri`, `external` nor a resource type name
    #[error("Attribute '{attribute}' has unsupported reference type '{ref_type}'")]
    UnsupportedReferenceType { attribute: String, ref_type: String },

    /// `meta.created` is later than `meta.lastModified`
    #[error(
        "Field '{field}' is invalid: 'lastModified' ({last_modified}) is {diff_ms}ms before 'created' ({created})"
    )]
    ModifiedBeforeCreated {
        field: String,
        created: String,
        last_modified: String,
        diff_ms: i64,
    },

    // Value type errors
    /// Value is absent where one must be given
    #[error("Attribute '{attribute}' has no value")]
    ValueAbsent { attribute: String },

    /// Required attribute is absent
    #[error("Required attribute '{attribute}' is missing")]
    MissingRequiredAttribute { attribute: String },

    /// Value doesn't match the expected type
    #[error("Attribute '{attribute}' has invalid type, expected {expected}, got {actual}")]
    InvalidDataType {
        attribute: String,
        expected: String,
        actual: String,
    },

    /// Single value provided for a multi-valued attribute
    #[error("Attribute '{attribute}' must be multi-valued (array)")]
    ExpectedMultiValue { attribute: String },

    /// Array provided for a single-valued attribute
    #[error("Attribute '{attribute}' must be single-valued (not array)")]
    ExpectedSingleValue { attribute: String },

    /// Empty array for a required multi-valued attribute
    #[error("Required multi-valued attribute '{attribute}' cannot be empty")]
    EmptyMultiValue { attribute: String },

    /// Key in a complex value that isn't a declared sub-attribute
    #[error("Complex attribute '{attribute}' contains unknown sub-attribute '{sub_attribute}'")]
    UnknownSubAttribute {
        attribute: String,
        sub_attribute: String,
    },

    /// Keys in a complex value that name the same sub-attribute
    #[error("Complex attribute '{attribute}' contains sub-attribute '{sub_attribute}' more than once")]
    DuplicateSubAttribute {
        attribute: String,
        sub_attribute: String,
    },

    // Format errors
    /// Attribute name doesn't follow the SCIM name grammar
    #[error("Field '{field}' has invalid attribute name '{value}'")]
    InvalidName { field: String, value: String },

    /// Number that isn't integral, or out of range, for an integer attribute
    #[error("Attribute '{attribute}' has invalid integer value: {value}")]
    InvalidIntegerValue { attribute: String, value: String },

    /// Unparsable date-time string
    #[error("Attribute '{attribute}' has invalid datetime format: {value}")]
    InvalidDateTimeFormat { attribute: String, value: String },

    /// Malformed base64 data
    #[error("Attribute '{attribute}' has invalid binary data: {details}")]
    InvalidBinaryData { attribute: String, details: String },

    /// Reference that satisfies none of the declared reference types
    #[error("Attribute '{attribute}' has invalid reference '{value}', expected one of {reference_types:?}")]
    InvalidReference {
        attribute: String,
        value: String,
        reference_types: Vec<String>,
    },

    /// String that isn't a valid SCIM schema URN
    #[error("Invalid schema URN '{uri}': {reason}")]
    InvalidSchemaUrn { uri: String, reason: String },

    /// Location that is neither an absolute URL nor a root-relative path
    #[error("Field '{field}' has invalid location '{value}'")]
    InvalidLocation { field: String, value: String },

    // Enum membership errors
    /// Characteristic value outside its enumeration
    #[error("Field '{field}' has invalid value '{value}', allowed values: {allowed:?}")]
    InvalidEnumValue {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    /// String value outside the attribute's canonical values
    #[error("Attribute '{attribute}' has invalid value '{value}', allowed values: {allowed:?}")]
    InvalidCanonicalValue {
        attribute: String,
        value: String,
        allowed: Vec<String>,
    },
}

impl ValidationError {
    /// Category of this error.
    pub fn kind(&self) -> ValidationErrorKind {
        use ValidationErrorKind::*;
        match self {
            Self::UnknownField { .. }
            | Self::MissingField { .. }
            | Self::InvalidFieldType { .. }
            | Self::EmptyField { .. } => Structural,
            Self::MissingReferenceTypes { .. }
            | Self::UnexpectedReferenceTypes { .. }
            | Self::MissingSubAttributes { .. }
            | Self::UnexpectedSubAttributes { .. }
            | Self::NestedComplexAttributes { .. }
            | Self::DuplicateAttributeName { .. }
            | Self::UnsupportedReferenceType { .. }
            | Self::ModifiedBeforeCreated { .. } => ConditionalInvariant,
            Self::ValueAbsent { .. }
            | Self::MissingRequiredAttribute { .. }
            | Self::InvalidDataType { .. }
            | Self::ExpectedMultiValue { .. }
            | Self::ExpectedSingleValue { .. }
            | Self::EmptyMultiValue { .. }
            | Self::UnknownSubAttribute { .. }
            | Self::DuplicateSubAttribute { .. } => ValueType,
            Self::InvalidName { .. }
            | Self::InvalidIntegerValue { .. }
            | Self::InvalidDateTimeFormat { .. }
            | Self::InvalidBinaryData { .. }
            | Self::InvalidReference { .. }
            | Self::InvalidSchemaUrn { .. }
            | Self::InvalidLocation { .. } => Format,
            Self::InvalidEnumValue { .. } | Self::InvalidCanonicalValue { .. } => EnumMembership,
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid field type error
    pub fn invalid_field_type(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::InvalidFieldType {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an empty field error
    pub fn empty_field(field: impl Into<String>) -> Self {
        Self::EmptyField {
            field: field.into(),
        }
    }

    /// Create a missing required attribute error
    pub fn missing_required(attribute: impl Into<String>) -> Self {
        Self::MissingRequiredAttribute {
            attribute: attribute.into(),
        }
    }

    /// Create an invalid data type error
    pub fn invalid_data_type(
        attribute: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::InvalidDataType {
            attribute: attribute.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Result type alias for SCIM schema operations
pub type ScimResult<T> = Result<T, ScimError>;

/// Result type alias for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;
