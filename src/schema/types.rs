//! Core type definitions for SCIM attribute definitions.
//!
//! This module contains the data structures describing attribute definitions
//! and their characteristics as specified in RFC 7643 section 7. Definitions are
//! a tagged union over three shapes: simple, reference and complex. Complex
//! attributes hold [`SubAttributeDefinition`]s, which cannot themselves be
//! complex, so nesting is bounded to one level by construction.
//!
//! Values of these types are produced by the validating factories in
//! [`definition`](super::definition); they are immutable once built.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};
use std::fmt;
use std::str::FromStr;

/// Implements the string mapping shared by all enumerated characteristics.
macro_rules! characteristic_enum {
    ($ty:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// All values, in declaration order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// SCIM wire representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $text),+
                }
            }

            /// Wire representations of all values.
            pub fn allowed_values() -> Vec<String> {
                Self::ALL.iter().map(|v| v.as_str().to_string()).collect()
            }
        }

        impl FromStr for $ty {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($ty::$variant),)+
                    _ => Err(()),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

/// SCIM attribute data types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AttributeType {
    /// String value
    #[default]
    String,
    /// Boolean value
    Boolean,
    /// Decimal number
    Decimal,
    /// Integer number
    Integer,
    /// DateTime value
    DateTime,
    /// Binary data (base64 encoded on the wire)
    Binary,
    /// Reference to a resource, URN or external URL
    Reference,
    /// Complex attribute with sub-attributes
    Complex,
}

characteristic_enum!(AttributeType {
    String => "string",
    Boolean => "boolean",
    Decimal => "decimal",
    Integer => "integer",
    DateTime => "dateTime",
    Binary => "binary",
    Reference => "reference",
    Complex => "complex",
});

/// Data types of simple attributes: everything except reference and complex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SimpleType {
    #[default]
    String,
    Boolean,
    Decimal,
    Integer,
    DateTime,
    Binary,
}

characteristic_enum!(SimpleType {
    String => "string",
    Boolean => "boolean",
    Decimal => "decimal",
    Integer => "integer",
    DateTime => "dateTime",
    Binary => "binary",
});

impl From<SimpleType> for AttributeType {
    fn from(value: SimpleType) -> Self {
        match value {
            SimpleType::String => AttributeType::String,
            SimpleType::Boolean => AttributeType::Boolean,
            SimpleType::Decimal => AttributeType::Decimal,
            SimpleType::Integer => AttributeType::Integer,
            SimpleType::DateTime => AttributeType::DateTime,
            SimpleType::Binary => AttributeType::Binary,
        }
    }
}

impl TryFrom<AttributeType> for SimpleType {
    type Error = AttributeType;

    fn try_from(value: AttributeType) -> Result<Self, Self::Error> {
        match value {
            AttributeType::String => Ok(SimpleType::String),
            AttributeType::Boolean => Ok(SimpleType::Boolean),
            AttributeType::Decimal => Ok(SimpleType::Decimal),
            AttributeType::Integer => Ok(SimpleType::Integer),
            AttributeType::DateTime => Ok(SimpleType::DateTime),
            AttributeType::Binary => Ok(SimpleType::Binary),
            other => Err(other),
        }
    }
}

/// Attribute mutability characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mutability {
    /// Read-only attribute (managed by server)
    ReadOnly,
    /// Read-write attribute (can be modified by clients)
    #[default]
    ReadWrite,
    /// Immutable attribute (set once, never modified)
    Immutable,
    /// Write-only attribute (passwords, etc.)
    WriteOnly,
}

characteristic_enum!(Mutability {
    ReadOnly => "readOnly",
    ReadWrite => "readWrite",
    Immutable => "immutable",
    WriteOnly => "writeOnly",
});

/// When an attribute is returned in a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Returned {
    Always,
    Never,
    #[default]
    Default,
    Request,
}

characteristic_enum!(Returned {
    Always => "always",
    Never => "never",
    Default => "default",
    Request => "request",
});

/// Attribute uniqueness constraints.
///
/// Uniqueness is recorded but not enforced; enforcing it needs storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Uniqueness {
    /// No uniqueness constraint
    #[default]
    None,
    /// Unique within the server
    Server,
    /// Globally unique
    Global,
}

characteristic_enum!(Uniqueness {
    None => "none",
    Server => "server",
    Global => "global",
});

/// One entry of a reference attribute's `referenceTypes`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReferenceType {
    /// A SCIM URN, e.g. a schema identifier
    Uri,
    /// An absolute URL to an external resource
    External,
    /// A SCIM resource type such as `User` or `Group`
    Resource(String),
}

impl ReferenceType {
    /// SCIM wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            ReferenceType::Uri => "uri",
            ReferenceType::External => "external",
            ReferenceType::Resource(name) => name,
        }
    }
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ReferenceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Characteristics shared by every attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeCharacteristics {
    /// Attribute name, lower-cased
    pub name: String,
    /// Whether this attribute holds an array of values
    pub multi_valued: bool,
    /// Human-readable description
    pub description: String,
    /// Whether a value must be present
    pub required: bool,
    /// Permitted values for string attributes; empty means unrestricted
    pub canonical_values: Vec<String>,
    /// Whether string values are case-sensitive
    pub case_exact: bool,
    pub mutability: Mutability,
    pub returned: Returned,
    pub uniqueness: Uniqueness,
}

impl AttributeCharacteristics {
    fn write_json(&self, data_type: AttributeType, map: &mut Map<String, Value>) {
        map.insert("name".to_string(), json!(self.name));
        map.insert("type".to_string(), json!(data_type.as_str()));
        map.insert("multiValued".to_string(), json!(self.multi_valued));
        map.insert("description".to_string(), json!(self.description));
        map.insert("required".to_string(), json!(self.required));
        map.insert("canonicalValues".to_string(), json!(self.canonical_values));
        map.insert("caseExact".to_string(), json!(self.case_exact));
        map.insert("mutability".to_string(), json!(self.mutability.as_str()));
        map.insert("returned".to_string(), json!(self.returned.as_str()));
        map.insert("uniqueness".to_string(), json!(self.uniqueness.as_str()));
    }
}

/// Attribute of any type except reference and complex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleAttribute {
    pub characteristics: AttributeCharacteristics,
    pub data_type: SimpleType,
}

/// Reference attribute, restricted to the kinds listed in `reference_types`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceAttribute {
    pub characteristics: AttributeCharacteristics,
    /// Non-empty list of accepted reference kinds
    pub reference_types: Vec<ReferenceType>,
}

/// Complex attribute made of simple and reference sub-attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexAttribute {
    pub characteristics: AttributeCharacteristics,
    /// Non-empty list of sub-attribute definitions
    pub sub_attributes: Vec<SubAttributeDefinition>,
}

/// Definition of a SCIM attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeDefinition {
    Simple(SimpleAttribute),
    Reference(ReferenceAttribute),
    Complex(ComplexAttribute),
}

/// Definition of a sub-attribute of a complex attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubAttributeDefinition {
    Simple(SimpleAttribute),
    Reference(ReferenceAttribute),
}

impl SimpleAttribute {
    fn to_json(&self) -> Value {
        let mut map = Map::new();
        self.characteristics
            .write_json(self.data_type.into(), &mut map);
        Value::Object(map)
    }
}

impl ReferenceAttribute {
    fn to_json(&self) -> Value {
        let mut map = Map::new();
        self.characteristics
            .write_json(AttributeType::Reference, &mut map);
        map.insert("referenceTypes".to_string(), json!(self.reference_types));
        Value::Object(map)
    }
}

impl ComplexAttribute {
    fn to_json(&self) -> Value {
        let mut map = Map::new();
        self.characteristics
            .write_json(AttributeType::Complex, &mut map);
        let sub_attributes: Vec<Value> = self.sub_attributes.iter().map(|s| s.to_json()).collect();
        map.insert("subAttributes".to_string(), Value::Array(sub_attributes));
        Value::Object(map)
    }

    /// Look up a sub-attribute by name, ignoring case.
    pub fn sub_attribute(&self, name: &str) -> Option<&SubAttributeDefinition> {
        self.sub_attributes
            .iter()
            .find(|sub| sub.name().eq_ignore_ascii_case(name))
    }
}

impl AttributeDefinition {
    /// Characteristics shared by all definition shapes.
    pub fn characteristics(&self) -> &AttributeCharacteristics {
        match self {
            Self::Simple(attr) => &attr.characteristics,
            Self::Reference(attr) => &attr.characteristics,
            Self::Complex(attr) => &attr.characteristics,
        }
    }

    /// Attribute name, lower-cased.
    pub fn name(&self) -> &str {
        &self.characteristics().name
    }

    /// Data type of the attribute.
    pub fn data_type(&self) -> AttributeType {
        match self {
            Self::Simple(attr) => attr.data_type.into(),
            Self::Reference(_) => AttributeType::Reference,
            Self::Complex(_) => AttributeType::Complex,
        }
    }

    pub fn multi_valued(&self) -> bool {
        self.characteristics().multi_valued
    }

    pub fn required(&self) -> bool {
        self.characteristics().required
    }

    /// SCIM JSON representation of the definition, with all defaults filled in.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Simple(attr) => attr.to_json(),
            Self::Reference(attr) => attr.to_json(),
            Self::Complex(attr) => attr.to_json(),
        }
    }
}

impl SubAttributeDefinition {
    pub fn characteristics(&self) -> &AttributeCharacteristics {
        match self {
            Self::Simple(attr) => &attr.characteristics,
            Self::Reference(attr) => &attr.characteristics,
        }
    }

    pub fn name(&self) -> &str {
        &self.characteristics().name
    }

    pub fn data_type(&self) -> AttributeType {
        match self {
            Self::Simple(attr) => attr.data_type.into(),
            Self::Reference(_) => AttributeType::Reference,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Simple(attr) => attr.to_json(),
            Self::Reference(attr) => attr.to_json(),
        }
    }
}

impl From<SubAttributeDefinition> for AttributeDefinition {
    fn from(value: SubAttributeDefinition) -> Self {
        match value {
            SubAttributeDefinition::Simple(attr) => AttributeDefinition::Simple(attr),
            SubAttributeDefinition::Reference(attr) => AttributeDefinition::Reference(attr),
        }
    }
}

impl Serialize for AttributeDefinition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl Serialize for SubAttributeDefinition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
