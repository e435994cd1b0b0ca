//! Attribute definitions, compiled validators and schema documents.
//!
//! This module implements the schema layer of RFC 7643: attribute definitions
//! and their characteristics, validators compiled from those definitions, and
//! schema documents grouping attributes under an identifier.
//!
//! # Key Types
//!
//! - [`AttributeDefinition`] - Validated attribute definition (simple, reference or complex)
//! - [`AttributeValidator`] - Compiled validator for the values of one attribute
//! - [`Attribute`] - A definition bound to its compiled validator
//! - [`Schema`] - SCIM schema with attributes and metadata
//!
//! # Examples
//!
//! ```rust
//! use scim_schema::schema::{AttributeValue, embedded};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let user = embedded::user()?;
//! let values = user.validate_attributes(&json!({
//!     "userName": "BJensen",
//!     "active": true
//! }))?;
//! assert_eq!(values["username"], AttributeValue::String("bjensen".to_string()));
//! # Ok(())
//! # }
//! ```

pub mod attribute;
pub mod characteristics;
pub mod collection;
pub mod definition;
pub mod embedded;
pub mod formats;
pub mod meta;
pub mod types;
pub mod urn;
pub mod validation;
pub mod value;

// Re-export the main types for convenience
pub use attribute::Attribute;
pub use collection::{Schema, create_schema, create_schema_with_config};
pub use definition::{create_attribute_schema, create_attribute_schema_with_config};
pub use meta::SchemaMeta;
pub use types::{
    AttributeCharacteristics, AttributeDefinition, AttributeType, ComplexAttribute, Mutability,
    ReferenceAttribute, ReferenceType, Returned, SimpleAttribute, SimpleType, SubAttributeDefinition,
    Uniqueness,
};
pub use urn::{SchemaUrn, UrnKind};
pub use validation::{AttributeValidator, create_attribute_validator, create_attribute_validator_with_config};
pub use value::AttributeValue;
