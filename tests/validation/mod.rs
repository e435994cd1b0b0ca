//! Validation tests module.
//!
//! Tests for attribute definitions, compiled validators and schema documents,
//! organized by category.

pub mod characteristics;
pub mod properties;

// Re-export commonly used test utilities
pub use crate::common::{
    builders::{AttributeBuilder, SchemaBuilder},
    fixtures::{rfc_examples, test_fixtures},
    init_logging,
};

// Re-export assertion macros
pub use crate::{
    assert_error_kind, assert_error_message_contains, assert_validation_error,
    assert_validation_success,
};
