//! Schema metadata.

use super::characteristics::field_path;
use super::formats::{self, json_type_name};
use crate::config::ValidationConfig;
use crate::error::{ValidationError, ValidationResult};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};

const META_FIELDS: [&str; 5] = ["resourceType", "created", "lastModified", "location", "version"];

/// Metadata attached to a schema document.
///
/// When both timestamps are present, `created` is never later than `last_modified`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchemaMeta {
    pub resource_type: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    /// Absolute URL or root-relative path of the schema
    pub location: Option<String>,
    pub version: Option<String>,
}

impl SchemaMeta {
    /// Validate and create metadata from its JSON form, located at `path`.
    pub fn from_value(value: &Value, path: &str, config: &ValidationConfig) -> ValidationResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| ValidationError::invalid_field_type(path, "object", json_type_name(value)))?;

        if let Some(unknown) = object.keys().find(|key| !META_FIELDS.contains(&key.as_str())) {
            return Err(ValidationError::UnknownField {
                field: field_path(path, unknown),
            });
        }

        let field = |name: &str| {
            object
                .get(name)
                .filter(|value| !(config.null_as_absent && value.is_null()))
                .map(|value| (field_path(path, name), value))
        };

        let created = field("created")
            .map(|(field, value)| parse_timestamp(&field, value))
            .transpose()?;
        let last_modified = field("lastModified")
            .map(|(field, value)| parse_timestamp(&field, value))
            .transpose()?;
        let location = field("location")
            .map(|(field, value)| {
                let location = non_empty_string(&field, value)?;
                if formats::is_absolute_url(&location) || formats::is_root_path(&location) {
                    Ok(location)
                } else {
                    Err(ValidationError::InvalidLocation { field, value: location })
                }
            })
            .transpose()?;

        let meta = Self {
            resource_type: field("resourceType")
                .map(|(field, value)| non_empty_string(&field, value))
                .transpose()?,
            created,
            last_modified,
            location,
            version: field("version")
                .map(|(field, value)| non_empty_string(&field, value))
                .transpose()?,
        };
        meta.check_ordering(path)?;
        Ok(meta)
    }

    /// `lastModified` must not be before `created`.
    fn check_ordering(&self, path: &str) -> ValidationResult<()> {
        let (Some(created), Some(last_modified)) = (self.created, self.last_modified) else {
            return Ok(());
        };
        if created <= last_modified {
            return Ok(());
        }

        Err(ValidationError::ModifiedBeforeCreated {
            field: path.to_string(),
            created: render(&created),
            last_modified: render(&last_modified),
            diff_ms: (created - last_modified).num_milliseconds(),
        })
    }

    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        if let Some(resource_type) = &self.resource_type {
            map.insert("resourceType".to_string(), json!(resource_type));
        }
        if let Some(created) = &self.created {
            map.insert("created".to_string(), json!(render(created)));
        }
        if let Some(last_modified) = &self.last_modified {
            map.insert("lastModified".to_string(), json!(render(last_modified)));
        }
        if let Some(location) = &self.location {
            map.insert("location".to_string(), json!(location));
        }
        if let Some(version) = &self.version {
            map.insert("version".to_string(), json!(version));
        }
        Value::Object(map)
    }
}

impl Serialize for SchemaMeta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

fn render(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
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

fn parse_timestamp(field: &str, value: &Value) -> ValidationResult<DateTime<Utc>> {
    let text = value
        .as_str()
        .ok_or_else(|| ValidationError::invalid_field_type(field, "dateTime", json_type_name(value)))?;
    formats::parse_datetime(text).ok_or_else(|| ValidationError::InvalidDateTimeFormat {
        attribute: field.to_string(),
        value: text.to_string(),
    })
}
