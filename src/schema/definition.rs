//! Construction of attribute definitions from untyped JSON.
//!
//! Building a definition happens in three steps:
//!
//! 1. [`PartialAttribute::parse`] rejects unknown fields and parses every
//!    characteristic that is present, independently of the others.
//! 2. [`PartialAttribute::complete`] fills in defaults and rejects missing
//!    required characteristics, producing a [`CompletedAttribute`].
//! 3. [`CompletedAttribute::build`] runs the whole-definition invariants that
//!    depend on `type` and assembles the simple, reference or complex shape.
//!    Sub-attributes of complex attributes go through the same steps with
//!    complex types rejected.

use super::characteristics::{self as chars, REF_NAME, field_path};
use super::formats;
use super::types::{
    AttributeCharacteristics, AttributeDefinition, AttributeType, ComplexAttribute, Mutability,
    ReferenceAttribute, ReferenceType, Returned, SimpleAttribute, SimpleType,
    SubAttributeDefinition, Uniqueness,
};
use crate::config::{ReferenceTypePolicy, ValidationConfig};
use crate::error::{ValidationError, ValidationResult};
use log::{trace, warn};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Fields an attribute definition may contain.
pub const DEFINITION_FIELDS: [&str; 12] = [
    "name",
    "type",
    "multiValued",
    "description",
    "required",
    "canonicalValues",
    "caseExact",
    "mutability",
    "returned",
    "uniqueness",
    "referenceTypes",
    "subAttributes",
];

/// Validate and create an attribute definition with the default configuration.
///
/// Characteristics that are absent are filled in with their defaults.
///
/// # Examples
///
/// ```rust
/// use scim_schema::schema::{AttributeType, create_attribute_schema};
/// use serde_json::json;
///
/// let definition = create_attribute_schema(&json!({
///     "name": "userName",
///     "multiValued": false,
///     "required": true
/// }))
/// .unwrap();
///
/// assert_eq!(definition.name(), "username");
/// assert_eq!(definition.data_type(), AttributeType::String);
/// ```
pub fn create_attribute_schema(value: &Value) -> ValidationResult<AttributeDefinition> {
    create_attribute_schema_with_config(value, &ValidationConfig::default())
}

/// Validate and create an attribute definition.
pub fn create_attribute_schema_with_config(
    value: &Value,
    config: &ValidationConfig,
) -> ValidationResult<AttributeDefinition> {
    build_attribute(value, "", config)
}

/// Build a top-level definition located at `path` inside a larger document.
pub(crate) fn build_attribute(
    value: &Value,
    path: &str,
    config: &ValidationConfig,
) -> ValidationResult<AttributeDefinition> {
    let context = DefinitionContext {
        path: path.to_string(),
        parent: None,
        config,
    };
    PartialAttribute::parse(value, &context)?
        .complete(&context)?
        .build(&context)
}

/// Names are already lower-cased, so equal names differ at most by case in
/// the source document. `field` maps the repeating index to its error path.
pub(crate) fn check_unique_names<'n>(
    names: impl IntoIterator<Item = &'n str>,
    field: impl Fn(usize) -> String,
) -> ValidationResult<()> {
    let mut seen = HashSet::new();
    for (index, name) in names.into_iter().enumerate() {
        if !seen.insert(name) {
            return Err(ValidationError::DuplicateAttributeName {
                field: field(index),
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

/// Where a definition sits while it is being built.
struct DefinitionContext<'a> {
    /// Field path prefix, e.g. `attributes[3].subAttributes[0]`
    path: String,
    /// Name of the enclosing complex attribute
    parent: Option<&'a str>,
    config: &'a ValidationConfig,
}

impl DefinitionContext<'_> {
    fn field(&self, name: &str) -> String {
        field_path(&self.path, name)
    }

    fn attribute(&self, name: &str) -> String {
        match self.parent {
            Some(parent) => format!("{parent}.{name}"),
            None => name.to_string(),
        }
    }
}

/// An attribute definition with every present characteristic parsed.
#[derive(Debug, Clone, Default)]
pub struct PartialAttribute<'v> {
    pub name: Option<String>,
    pub data_type: Option<AttributeType>,
    pub multi_valued: Option<bool>,
    pub description: Option<String>,
    pub required: Option<bool>,
    pub canonical_values: Option<Vec<String>>,
    pub case_exact: Option<bool>,
    pub mutability: Option<Mutability>,
    pub returned: Option<Returned>,
    pub uniqueness: Option<Uniqueness>,
    pub reference_types: Option<Vec<String>>,
    pub sub_attributes: Option<&'v [Value]>,
}

/// An attribute definition with defaults filled in, before type-dependent checks.
#[derive(Debug, Clone)]
pub struct CompletedAttribute<'v> {
    pub characteristics: AttributeCharacteristics,
    pub data_type: AttributeType,
    pub reference_types: Option<Vec<String>>,
    pub sub_attributes: Option<&'v [Value]>,
}

impl<'v> PartialAttribute<'v> {
    fn parse(value: &'v Value, context: &DefinitionContext<'_>) -> ValidationResult<Self> {
        let object = value.as_object().ok_or_else(|| {
            ValidationError::invalid_field_type(
                context.path.clone(),
                "object",
                formats::json_type_name(value),
            )
        })?;

        if let Some(unknown) = object
            .keys()
            .find(|key| !DEFINITION_FIELDS.contains(&key.as_str()))
        {
            return Err(ValidationError::UnknownField {
                field: context.field(unknown),
            });
        }

        let field = |name: &str| present(object, name, context.config);

        // `$ref` is accepted here and restricted to reference attributes once the type is known.
        let name = match field("name") {
            Some(value) => Some(chars::parse_reference_name(&context.field("name"), Some(value))?),
            None => None,
        };

        Ok(Self {
            name,
            data_type: field("type")
                .map(|v| chars::parse_type(&context.field("type"), Some(v)))
                .transpose()?,
            multi_valued: field("multiValued")
                .map(|v| chars::parse_multi_valued(&context.field("multiValued"), Some(v)))
                .transpose()?,
            description: field("description")
                .map(|v| chars::parse_description(&context.field("description"), Some(v)))
                .transpose()?,
            required: field("required")
                .map(|v| chars::parse_required(&context.field("required"), Some(v)))
                .transpose()?,
            canonical_values: field("canonicalValues")
                .map(|v| chars::parse_canonical_values(&context.field("canonicalValues"), Some(v)))
                .transpose()?,
            case_exact: field("caseExact")
                .map(|v| chars::parse_case_exact(&context.field("caseExact"), Some(v)))
                .transpose()?,
            mutability: field("mutability")
                .map(|v| chars::parse_mutability(&context.field("mutability"), Some(v)))
                .transpose()?,
            returned: field("returned")
                .map(|v| chars::parse_returned(&context.field("returned"), Some(v)))
                .transpose()?,
            uniqueness: field("uniqueness")
                .map(|v| chars::parse_uniqueness(&context.field("uniqueness"), Some(v)))
                .transpose()?,
            reference_types: field("referenceTypes")
                .map(|v| chars::parse_reference_types(&context.field("referenceTypes"), v))
                .transpose()?,
            sub_attributes: field("subAttributes")
                .map(|v| chars::parse_sub_attribute_list(&context.field("subAttributes"), v))
                .transpose()?,
        })
    }

    fn complete(self, context: &DefinitionContext<'_>) -> ValidationResult<CompletedAttribute<'v>> {
        let name = self
            .name
            .ok_or_else(|| ValidationError::missing_field(context.field("name")))?;
        let multi_valued = self
            .multi_valued
            .ok_or_else(|| ValidationError::missing_field(context.field("multiValued")))?;

        Ok(CompletedAttribute {
            characteristics: AttributeCharacteristics {
                name,
                multi_valued,
                description: self.description.unwrap_or_default(),
                required: self.required.unwrap_or(false),
                canonical_values: self.canonical_values.unwrap_or_default(),
                case_exact: self.case_exact.unwrap_or(false),
                mutability: self.mutability.unwrap_or_default(),
                returned: self.returned.unwrap_or_default(),
                uniqueness: self.uniqueness.unwrap_or_default(),
            },
            data_type: self.data_type.unwrap_or_default(),
            reference_types: self.reference_types,
            sub_attributes: self.sub_attributes,
        })
    }
}

impl CompletedAttribute<'_> {
    fn build(self, context: &DefinitionContext<'_>) -> ValidationResult<AttributeDefinition> {
        self.check_reference_name(context)?;
        self.check_reference_types(context)?;
        self.check_sub_attributes(context)?;
        self.check_canonical_values(context);

        let attribute = context.attribute(&self.characteristics.name);
        let definition = match self.data_type {
            AttributeType::Reference => AttributeDefinition::Reference(ReferenceAttribute {
                reference_types: resolve_reference_types(
                    &attribute,
                    self.reference_types.unwrap_or_default(),
                    context.config.reference_types,
                )?,
                characteristics: self.characteristics,
            }),
            AttributeType::Complex => {
                let raw = self.sub_attributes.unwrap_or_default();
                let sub_context = DefinitionContext {
                    path: String::new(),
                    parent: Some(self.characteristics.name.as_str()),
                    config: context.config,
                };
                let sub_attributes = raw
                    .iter()
                    .enumerate()
                    .map(|(index, value)| {
                        let path = format!("{}[{index}]", context.field("subAttributes"));
                        build_sub_attribute(
                            value,
                            &DefinitionContext {
                                path,
                                ..sub_context
                            },
                        )
                    })
                    .collect::<ValidationResult<Vec<_>>>()?;
                check_unique_names(
                    sub_attributes.iter().map(SubAttributeDefinition::name),
                    |index| format!("{}[{index}].name", context.field("subAttributes")),
                )?;
                AttributeDefinition::Complex(ComplexAttribute {
                    characteristics: self.characteristics,
                    sub_attributes,
                })
            }
            simple => AttributeDefinition::Simple(SimpleAttribute {
                characteristics: self.characteristics,
                data_type: SimpleType::try_from(simple).unwrap_or_default(),
            }),
        };

        trace!("Built {} attribute definition '{}'", definition.data_type(), attribute);
        Ok(definition)
    }

    /// `$ref` may only name reference attributes.
    fn check_reference_name(&self, context: &DefinitionContext<'_>) -> ValidationResult<()> {
        if self.characteristics.name == REF_NAME && self.data_type != AttributeType::Reference {
            return Err(ValidationError::InvalidName {
                field: context.field("name"),
                value: REF_NAME.to_string(),
            });
        }
        Ok(())
    }

    /// Reference attributes require `referenceTypes`; everything else forbids it.
    fn check_reference_types(&self, context: &DefinitionContext<'_>) -> ValidationResult<()> {
        let attribute = context.attribute(&self.characteristics.name);
        match (self.data_type, &self.reference_types) {
            (AttributeType::Reference, None) => {
                Err(ValidationError::MissingReferenceTypes { attribute })
            }
            (data_type, Some(_)) if data_type != AttributeType::Reference => {
                Err(ValidationError::UnexpectedReferenceTypes {
                    attribute,
                    data_type: data_type.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Complex attributes require `subAttributes`; everything else forbids it.
    fn check_sub_attributes(&self, context: &DefinitionContext<'_>) -> ValidationResult<()> {
        let attribute = context.attribute(&self.characteristics.name);
        match (self.data_type, &self.sub_attributes) {
            (AttributeType::Complex, None) => Err(ValidationError::MissingSubAttributes { attribute }),
            (data_type, Some(_)) if data_type != AttributeType::Complex => {
                Err(ValidationError::UnexpectedSubAttributes {
                    attribute,
                    data_type: data_type.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    fn check_canonical_values(&self, context: &DefinitionContext<'_>) {
        if !self.characteristics.canonical_values.is_empty()
            && self.data_type != AttributeType::String
        {
            warn!(
                "Canonical values of {} attribute '{}' are ignored",
                self.data_type,
                context.attribute(&self.characteristics.name)
            );
        }
    }
}

/// Build a sub-attribute of a complex attribute. Complex types are rejected.
fn build_sub_attribute(
    value: &Value,
    context: &DefinitionContext<'_>,
) -> ValidationResult<SubAttributeDefinition> {
    let completed = PartialAttribute::parse(value, context)?.complete(context)?;
    if completed.data_type == AttributeType::Complex {
        return Err(ValidationError::NestedComplexAttributes {
            attribute: context.attribute(&completed.characteristics.name),
        });
    }

    match completed.build(context)? {
        AttributeDefinition::Simple(attr) => Ok(SubAttributeDefinition::Simple(attr)),
        AttributeDefinition::Reference(attr) => Ok(SubAttributeDefinition::Reference(attr)),
        AttributeDefinition::Complex(attr) => Err(ValidationError::NestedComplexAttributes {
            attribute: context.attribute(&attr.characteristics.name),
        }),
    }
}

fn resolve_reference_types(
    attribute: &str,
    tokens: Vec<String>,
    policy: ReferenceTypePolicy,
) -> ValidationResult<Vec<ReferenceType>> {
    tokens
        .into_iter()
        .map(|token| {
            if token == "uri" {
                Ok(ReferenceType::Uri)
            } else if token == "external" {
                Ok(ReferenceType::External)
            } else if formats::is_attribute_name(&token) || policy == ReferenceTypePolicy::Permissive {
                Ok(ReferenceType::Resource(token))
            } else {
                Err(ValidationError::UnsupportedReferenceType {
                    attribute: attribute.to_string(),
                    ref_type: token,
                })
            }
        })
        .collect()
}

/// Look up a field, treating `null` as absent when configured to.
fn present<'v>(object: &'v Map<String, Value>, name: &str, config: &ValidationConfig) -> Option<&'v Value> {
    object
        .get(name)
        .filter(|value| !(config.null_as_absent && value.is_null()))
}

impl AttributeDefinition {
    /// Validate and create a definition with the default configuration.
    pub fn from_value(value: &Value) -> ValidationResult<Self> {
        create_attribute_schema(value)
    }

    /// Validate and create a definition.
    pub fn from_value_with_config(value: &Value, config: &ValidationConfig) -> ValidationResult<Self> {
        create_attribute_schema_with_config(value, config)
    }
}

impl TryFrom<&Value> for AttributeDefinition {
    type Error = ValidationError;

    fn try_from(value: &Value) -> ValidationResult<Self> {
        Self::from_value(value)
    }
}

impl<'de> Deserialize<'de> for AttributeDefinition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}
