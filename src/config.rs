//! Validation configuration.
//!
//! The defaults follow RFC 7643 strictly. Every factory in this crate has a
//! default form and a `*_with_config` form taking a [`ValidationConfig`].

/// How `referenceTypes` tokens other than `uri` and `external` are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceTypePolicy {
    /// Tokens must be `uri`, `external` or a resource type name such as `User`.
    /// Anything else is rejected when the definition is built.
    #[default]
    Strict,
    /// Any token is accepted and matches any string value.
    Permissive,
}

/// Configuration shared by definition construction and value validation.
///
/// # Examples
///
/// ```rust
/// use scim_schema::{ReferenceTypePolicy, ValidationConfig};
///
/// let config = ValidationConfig::default()
///     .with_null_as_absent(false)
///     .with_reference_types(ReferenceTypePolicy::Permissive);
/// assert!(!config.null_as_absent);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Treat a JSON `null` value as an absent value
    pub null_as_absent: bool,
    /// Policy for unrecognized reference type tokens
    pub reference_types: ReferenceTypePolicy,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            null_as_absent: true,
            reference_types: ReferenceTypePolicy::Strict,
        }
    }
}

impl ValidationConfig {
    /// Set whether JSON `null` counts as an absent value.
    pub fn with_null_as_absent(mut self, null_as_absent: bool) -> Self {
        self.null_as_absent = null_as_absent;
        self
    }

    /// Set the policy for unrecognized reference type tokens.
    pub fn with_reference_types(mut self, policy: ReferenceTypePolicy) -> Self {
        self.reference_types = policy;
        self
    }
}
