//! SchemaUrn value object for SCIM schema identifiers.
//!
//! SCIM names its schemas and protocol messages with URNs under
//! `urn:ietf:params:scim:`. This module provides a type-safe wrapper that only
//! admits URNs following the registry rules of RFC 7643 section 10.2.

use crate::error::{ValidationError, ValidationResult};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Prefix shared by every SCIM URN.
pub const SCIM_URN_PREFIX: &str = "urn:ietf:params:scim:";

static URN_CHARSET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Za-z()+,\-:.=@;$_!*']+$").expect("URN_CHARSET_REGEX is a valid regex pattern")
});

/// Schema names that may appear under the reserved `schemas:core` namespace.
const CORE_SCHEMA_NAMES: [&str; 5] = [
    "2.0:User",
    "2.0:Group",
    "2.0:ServiceProviderConfig",
    "2.0:ResourceType",
    "2.0:Schema",
];

/// Message names that may appear under the reserved `api:messages` namespace.
const API_MESSAGE_NAMES: [&str; 6] = [
    "2.0:ListResponse",
    "2.0:SearchRequest",
    "2.0:PatchOp",
    "2.0:BulkRequest",
    "2.0:BulkResponse",
    "2.0:Error",
];

/// Kind of SCIM URN, taken from the fifth URN segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrnKind {
    /// `urn:ietf:params:scim:schemas:...`
    Schemas,
    /// `urn:ietf:params:scim:api:...`
    Api,
    /// `urn:ietf:params:scim:param:...`
    Param,
}

/// A validated SCIM schema URN.
///
/// ## Validation Rules
///
/// - Must start with `urn:ietf:params:scim:`
/// - Must only contain URN characters
/// - Must have a kind (`schemas`, `api` or `param`) and a namespace
/// - Reserved namespaces (`schemas:core`, `api`, `param`) only admit the names
///   defined by RFC 7643 and RFC 7644
///
/// ## Examples
///
/// ```rust
/// use scim_schema::schema::SchemaUrn;
///
/// let urn = SchemaUrn::new("urn:ietf:params:scim:schemas:core:2.0:User").unwrap();
/// assert_eq!(urn.namespace(), "core");
///
/// assert!(SchemaUrn::new("urn:ietf:params:scim:schemas:core:MyUser").is_err());
/// assert!(SchemaUrn::new("urn:ietf:params:scim:schemas:Application:MyUser").is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaUrn {
    value: String,
    kind: UrnKind,
}

impl SchemaUrn {
    /// Create a new SchemaUrn with validation.
    pub fn new(value: impl Into<String>) -> ValidationResult<Self> {
        let value = value.into();
        let kind = Self::validate_format(&value)?;
        Ok(Self { value, kind })
    }

    /// Check whether a string is a valid SCIM schema URN.
    pub fn is_valid(value: &str) -> bool {
        Self::validate_format(value).is_ok()
    }

    /// Get the string representation of the URN.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Get the owned string value of the URN.
    pub fn into_string(self) -> String {
        self.value
    }

    /// Kind of the URN.
    pub fn kind(&self) -> UrnKind {
        self.kind
    }

    /// Namespace segment following the kind, e.g. `core` or `extension`.
    pub fn namespace(&self) -> &str {
        self.value.split(':').nth(5).unwrap_or_default()
    }

    fn validate_format(value: &str) -> ValidationResult<UrnKind> {
        let invalid = |reason: String| ValidationError::InvalidSchemaUrn {
            uri: value.to_string(),
            reason,
        };

        if !value.starts_with(SCIM_URN_PREFIX) {
            return Err(invalid(format!(
                "URN does not start with '{SCIM_URN_PREFIX}'"
            )));
        }
        if !URN_CHARSET_REGEX.is_match(value) {
            return Err(invalid("URN contains invalid characters".to_string()));
        }

        let segments: Vec<&str> = value.split(':').collect();
        if segments.len() < 6 {
            return Err(invalid("URN has too few segments".to_string()));
        }

        let name = segments[5];
        let rest = segments[6..].join(":");
        let kind = match segments[4] {
            "schemas" => UrnKind::Schemas,
            "api" => UrnKind::Api,
            "param" => UrnKind::Param,
            other => return Err(invalid(format!("URN kind '{other}' is invalid"))),
        };

        match kind {
            UrnKind::Schemas if name == "core" && !CORE_SCHEMA_NAMES.contains(&rest.as_str()) => {
                Err(invalid(format!("core schema name '{rest}' is not allowed")))
            }
            UrnKind::Api if name != "messages" || !API_MESSAGE_NAMES.contains(&rest.as_str()) => {
                Err(invalid(format!("api name '{name}' is not allowed")))
            }
            UrnKind::Param => Err(invalid(format!("param name '{name}' is not allowed"))),
            _ => Ok(kind),
        }
    }
}

impl fmt::Display for SchemaUrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Serialize for SchemaUrn {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SchemaUrn {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<String> for SchemaUrn {
    type Error = ValidationError;

    fn try_from(value: String) -> ValidationResult<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for SchemaUrn {
    type Error = ValidationError;

    fn try_from(value: &str) -> ValidationResult<Self> {
        Self::new(value)
    }
}
