//! Common test utilities for SCIM attribute and schema validation testing.
//!
//! This module provides macros, builders, and fixtures shared by the
//! validation test categories.

use scim_schema::ValidationErrorKind;
use std::collections::HashSet;

pub mod builders;
pub mod fixtures;

/// Install a test logger once, honouring `RUST_LOG`.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Custom assertion macro for a specific validation error variant
#[macro_export]
macro_rules! assert_validation_error {
    ($result:expr, $error_variant:pat) => {
        match $result {
            Err($error_variant) => {
                // Specific error type matched
            }
            Ok(value) => panic!(
                "Expected validation error {}, but validation passed with {:?}",
                stringify!($error_variant),
                value
            ),
            Err(other) => panic!(
                "Expected validation error {}, got {:?}",
                stringify!($error_variant),
                other
            ),
        }
    };
}

/// Custom assertion macro for the category of a validation error
#[macro_export]
macro_rules! assert_error_kind {
    ($result:expr, $kind:expr) => {
        match $result {
            Err(err) => assert_eq!(err.kind(), $kind, "Unexpected error kind for: {}", err),
            Ok(value) => panic!(
                "Expected {:?} error, but validation passed with {:?}",
                $kind, value
            ),
        }
    };
}

/// Custom assertion macro for specific error messages
#[macro_export]
macro_rules! assert_error_message_contains {
    ($result:expr, $substring:expr) => {
        match $result {
            Err(err) => assert!(
                err.to_string().contains($substring),
                "Error message '{}' does not contain '{}'",
                err.to_string(),
                $substring
            ),
            Ok(_) => panic!(
                "Expected error containing '{}', but validation passed",
                $substring
            ),
        }
    };
}

/// Custom assertion macro for successful validation
#[macro_export]
macro_rules! assert_validation_success {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(err) => panic!("Expected validation to succeed, but got error: {}", err),
        }
    };
}

/// Tracks which error categories a group of tests exercised.
#[derive(Debug, Default)]
pub struct KindCoverage {
    covered: HashSet<ValidationErrorKind>,
}

impl KindCoverage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark<T: std::fmt::Debug>(&mut self, result: Result<T, scim_schema::ValidationError>) {
        if let Err(err) = result {
            self.covered.insert(err.kind());
        }
    }

    pub fn is_covered(&self, kind: ValidationErrorKind) -> bool {
        self.covered.contains(&kind)
    }

    pub fn all_kinds() -> [ValidationErrorKind; 5] {
        [
            ValidationErrorKind::Structural,
            ValidationErrorKind::ConditionalInvariant,
            ValidationErrorKind::ValueType,
            ValidationErrorKind::Format,
            ValidationErrorKind::EnumMembership,
        ]
    }

    pub fn missing(&self) -> Vec<ValidationErrorKind> {
        Self::all_kinds()
            .into_iter()
            .filter(|kind| !self.covered.contains(kind))
            .collect()
    }
}
