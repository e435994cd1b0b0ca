//! SCIM schema documents: identified collections of attributes.
//!
//! A [`Schema`] is built once from its JSON representation (RFC 7643 section 7)
//! and is immutable afterwards. Every attribute definition is validated and
//! compiled during construction, so a built schema can validate resource
//! attribute values directly.

use super::attribute::Attribute;
use super::definition::{build_attribute, check_unique_names};
use super::formats::json_type_name;
use super::meta::SchemaMeta;
use super::validation::repeated_name;
use super::value::AttributeValue;
use crate::config::ValidationConfig;
use crate::error::{ScimError, ScimResult, ValidationError, ValidationResult};
use log::{debug, info};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const SCHEMA_FIELDS: [&str; 6] = ["id", "name", "description", "meta", "attributes", "schemas"];

/// Validate and create a schema with the default configuration.
///
/// # Examples
///
/// ```rust
/// use scim_schema::schema::create_schema;
/// use serde_json::json;
///
/// let schema = create_schema(&json!({
///     "id": "urn:ietf:params:scim:schemas:Application:MyUser",
///     "attributes": [
///         { "name": "userName", "multiValued": false, "required": true }
///     ]
/// }))
/// .unwrap();
///
/// assert_eq!(schema.attributes().len(), 1);
/// assert!(schema.attribute("USERNAME").is_some());
/// ```
pub fn create_schema(value: &Value) -> ValidationResult<Schema> {
    Schema::from_value(value)
}

/// Validate and create a schema.
pub fn create_schema_with_config(value: &Value, config: &ValidationConfig) -> ValidationResult<Schema> {
    Schema::from_value_with_config(value, config)
}

/// A SCIM schema definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    id: String,
    name: Option<String>,
    description: Option<String>,
    meta: Option<SchemaMeta>,
    schemas: Vec<String>,
    attributes: Vec<Attribute>,
}

impl Schema {
    pub fn from_value(value: &Value) -> ValidationResult<Self> {
        Self::from_value_with_config(value, &ValidationConfig::default())
    }

    pub fn from_value_with_config(value: &Value, config: &ValidationConfig) -> ValidationResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| ValidationError::invalid_field_type("", "object", json_type_name(value)))?;

        if let Some(unknown) = object.keys().find(|key| !SCHEMA_FIELDS.contains(&key.as_str())) {
            return Err(ValidationError::UnknownField {
                field: unknown.clone(),
            });
        }

        let field = |name: &str| {
            object
                .get(name)
                .filter(|value| !(config.null_as_absent && value.is_null()))
        };

        let id = field("id")
            .map(|value| non_empty_string("id", value))
            .transpose()?
            .ok_or_else(|| ValidationError::missing_field("id"))?;
        let name = field("name")
            .map(|value| non_empty_string("name", value))
            .transpose()?;
        let description = field("description")
            .map(|value| non_empty_string("description", value))
            .transpose()?;
        let meta = field("meta")
            .map(|value| SchemaMeta::from_value(value, "meta", config))
            .transpose()?;
        let schemas = match field("schemas") {
            Some(value) => string_list("schemas", value)?,
            None => Vec::new(),
        };

        let definitions = field("attributes").ok_or_else(|| ValidationError::missing_field("attributes"))?;
        let definitions = definitions.as_array().ok_or_else(|| {
            ValidationError::invalid_field_type("attributes", "array", json_type_name(definitions))
        })?;
        if definitions.is_empty() {
            return Err(ValidationError::empty_field("attributes"));
        }

        let attributes = definitions
            .iter()
            .enumerate()
            .map(|(index, definition)| {
                let definition = build_attribute(definition, &format!("attributes[{index}]"), config)?;
                Ok(Attribute::from_definition_with_config(definition, config))
            })
            .collect::<ValidationResult<Vec<_>>>()?;
        check_unique_names(attributes.iter().map(Attribute::name), |index| {
            format!("attributes[{index}].name")
        })?;

        debug!("Built schema '{}' with {} attributes", id, attributes.len());

        Ok(Self {
            id,
            name,
            description,
            meta,
            schemas,
            attributes,
        })
    }

    /// Parse and validate a schema from a JSON string.
    pub fn from_json_str(content: &str) -> ScimResult<Self> {
        let value: Value = serde_json::from_str(content)?;
        Ok(Self::from_value(&value)?)
    }

    /// Load and validate a schema from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ScimResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ScimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let schema = Self::from_json_str(&content)?;
        info!("Loaded schema '{}' from {}", schema.id, path.display());
        Ok(schema)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn meta(&self) -> Option<&SchemaMeta> {
        self.meta.as_ref()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Look up an attribute by name, ignoring case.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name().eq_ignore_ascii_case(name))
    }

    /// Validate an object holding values for this schema's attributes.
    ///
    /// Keys are matched case-insensitively, and two keys naming the same
    /// attribute are rejected. The `schemas` key is ignored.
    /// Absent optional attributes are left out of the result, which is keyed by
    /// lower-cased attribute name.
    pub fn validate_attributes(&self, values: &Value) -> ValidationResult<BTreeMap<String, AttributeValue>> {
        let object = values
            .as_object()
            .ok_or_else(|| ValidationError::invalid_data_type(&self.id, "object", json_type_name(values)))?;

        if let Some(unknown) = object
            .keys()
            .find(|key| *key != "schemas" && self.attribute(key).is_none())
        {
            return Err(ValidationError::UnknownField {
                field: unknown.clone(),
            });
        }

        if let Some(key) = repeated_name(object.keys().map(String::as_str)) {
            return Err(ValidationError::DuplicateSubAttribute {
                attribute: self.id.clone(),
                sub_attribute: key,
            });
        }

        let mut validated = BTreeMap::new();
        for attribute in &self.attributes {
            let value = object
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(attribute.name()))
                .map(|(_, value)| value);
            if let Some(value) = attribute.validate_optional(value)? {
                validated.insert(attribute.name().to_string(), value);
            }
        }
        Ok(validated)
    }

    /// SCIM JSON representation of the schema, with attribute defaults filled in.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        if !self.schemas.is_empty() {
            map.insert("schemas".to_string(), json!(self.schemas));
        }
        map.insert("id".to_string(), json!(self.id));
        if let Some(name) = &self.name {
            map.insert("name".to_string(), json!(name));
        }
        if let Some(description) = &self.description {
            map.insert("description".to_string(), json!(description));
        }
        let attributes = self
            .attributes
            .iter()
            .map(|attribute| attribute.definition().to_json())
            .collect();
        map.insert("attributes".to_string(), Value::Array(attributes));
        if let Some(meta) = &self.meta {
            map.insert("meta".to_string(), meta.to_json());
        }
        Value::Object(map)
    }
}

impl TryFrom<&Value> for Schema {
    type Error = ValidationError;

    fn try_from(value: &Value) -> ValidationResult<Self> {
        Self::from_value(value)
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

fn non_empty_string(field: &str, value: &Value) -> ValidationResult<String> {
    let text = value
        .as_str()
        .ok_or_else(|| ValidationError::invalid_field_type(field, "string", json_type_name(value)))?;
    if text.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(text.to_string())
}

fn string_list(field: &str, value: &Value) -> ValidationResult<Vec<String>> {
    let list = value
        .as_array()
        .ok_or_else(|| ValidationError::invalid_field_type(field, "array", json_type_name(value)))?;
    list.iter()
        .enumerate()
        .map(|(index, item)| non_empty_string(&format!("{field}[{index}]"), item))
        .collect()
}
