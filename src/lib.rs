//! SCIM 2.0 attribute and schema definitions for Rust.
//!
//! Validates SCIM attribute definitions (RFC 7643 section 7) and compiles each
//! definition into a reusable validator that checks runtime values and turns
//! them into canonical [`AttributeValue`]s: case-insensitive strings are
//! lower-cased, date-times parsed, base64 decoded and complex values checked
//! key by key.
//!
//! # Core Components
//!
//! - [`Attribute`] - Attribute definition with its compiled validator
//! - [`Schema`] - Identified collection of attributes with metadata
//! - [`ValidationConfig`] - Options shared by all factories
//! - [`ValidationError`] - Structured validation failures
//!
//! # Quick Start
//!
//! ```rust
//! use scim_schema::{Attribute, AttributeValue};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let photo = Attribute::new(&json!({
//!     "name": "photo",
//!     "type": "binary",
//!     "multiValued": false
//! }))?;
//!
//! assert_eq!(
//!     photo.validate(&json!("SGVsbG8gV29ybGQh"))?,
//!     AttributeValue::Binary(b"Hello World!".to_vec())
//! );
//! assert!(photo.validate(&json!("Mario")).is_err());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod schema;

// Re-export commonly used types for convenience
pub use config::{ReferenceTypePolicy, ValidationConfig};
pub use error::{ScimError, ScimResult, ValidationError, ValidationErrorKind, ValidationResult};
pub use schema::{
    Attribute, AttributeDefinition, AttributeValidator, AttributeValue, Schema, SchemaMeta, SchemaUrn,
    create_attribute_schema, create_attribute_validator, create_schema,
};
