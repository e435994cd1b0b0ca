//! Test data builders for attribute definitions and schema documents.
//!
//! The builders produce JSON so tests can start from a valid definition and
//! change one field at a time.

use scim_schema::schema::{Attribute, AttributeDefinition, Schema, create_attribute_schema};
use scim_schema::ValidationResult;
use serde_json::{Value, json};

/// Builder for attribute definitions with a fluent API
#[derive(Debug, Clone)]
pub struct AttributeBuilder {
    data: Value,
}

impl AttributeBuilder {
    /// Single-valued, optional string attribute
    pub fn new(name: &str) -> Self {
        Self {
            data: json!({
                "name": name,
                "multiValued": false
            }),
        }
    }

    pub fn string(name: &str) -> Self {
        Self::new(name).with_type("string")
    }

    pub fn boolean(name: &str) -> Self {
        Self::new(name).with_type("boolean")
    }

    pub fn integer(name: &str) -> Self {
        Self::new(name).with_type("integer")
    }

    pub fn decimal(name: &str) -> Self {
        Self::new(name).with_type("decimal")
    }

    pub fn date_time(name: &str) -> Self {
        Self::new(name).with_type("dateTime")
    }

    pub fn binary(name: &str) -> Self {
        Self::new(name).with_type("binary")
    }

    pub fn reference(name: &str, reference_types: &[&str]) -> Self {
        Self::new(name)
            .with_type("reference")
            .with("referenceTypes", json!(reference_types))
    }

    pub fn complex(name: &str, sub_attributes: Vec<AttributeBuilder>) -> Self {
        let subs: Vec<Value> = sub_attributes.into_iter().map(|b| b.build()).collect();
        Self::new(name)
            .with_type("complex")
            .with("subAttributes", Value::Array(subs))
    }

    pub fn with_type(self, data_type: &str) -> Self {
        self.with("type", json!(data_type))
    }

    pub fn multi_valued(self) -> Self {
        self.with("multiValued", json!(true))
    }

    pub fn required(self) -> Self {
        self.with("required", json!(true))
    }

    pub fn case_exact(self) -> Self {
        self.with("caseExact", json!(true))
    }

    pub fn canonical_values(self, values: &[&str]) -> Self {
        self.with("canonicalValues", json!(values))
    }

    /// Set any field to any value, valid or not
    pub fn with(mut self, field: &str, value: Value) -> Self {
        self.data[field] = value;
        self
    }

    /// Remove a field
    pub fn without(mut self, field: &str) -> Self {
        if let Some(map) = self.data.as_object_mut() {
            map.remove(field);
        }
        self
    }

    pub fn build(self) -> Value {
        self.data
    }

    pub fn definition(self) -> ValidationResult<AttributeDefinition> {
        create_attribute_schema(&self.data)
    }

    pub fn attribute(self) -> ValidationResult<Attribute> {
        Attribute::new(&self.data)
    }
}

/// Builder for schema documents
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    data: Value,
}

impl SchemaBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            data: json!({
                "id": id,
                "attributes": []
            }),
        }
    }

    pub fn name(self, name: &str) -> Self {
        self.with("name", json!(name))
    }

    pub fn description(self, description: &str) -> Self {
        self.with("description", json!(description))
    }

    pub fn meta(self, meta: Value) -> Self {
        self.with("meta", meta)
    }

    pub fn attribute(mut self, attribute: AttributeBuilder) -> Self {
        if let Some(list) = self.data["attributes"].as_array_mut() {
            list.push(attribute.build());
        }
        self
    }

    pub fn with(mut self, field: &str, value: Value) -> Self {
        self.data[field] = value;
        self
    }

    pub fn build(self) -> Value {
        self.data
    }

    pub fn schema(self) -> ValidationResult<Schema> {
        Schema::from_value(&self.data)
    }
}
