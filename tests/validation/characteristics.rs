//! Attribute characteristics validation tests.
//!
//! This module tests parsing of the individual characteristics of an attribute
//! definition: names, types, flags, enumerations and their defaults.

use scim_schema::schema::{
    AttributeType, Mutability, Returned, Uniqueness, create_attribute_schema_with_config,
};
use scim_schema::{ValidationConfig, ValidationError};
use serde_json::json;

use super::{AttributeBuilder, assert_validation_error, assert_validation_success, init_logging};

/// Test that absent characteristics are filled in with their defaults
#[test]
fn test_defaults_are_filled_in() {
    init_logging();
    let definition = assert_validation_success!(AttributeBuilder::new("nickName").definition());
    let characteristics = definition.characteristics();

    assert_eq!(definition.data_type(), AttributeType::String);
    assert_eq!(characteristics.name, "nickname");
    assert!(!characteristics.multi_valued);
    assert_eq!(characteristics.description, "");
    assert!(!characteristics.required);
    assert!(characteristics.canonical_values.is_empty());
    assert!(!characteristics.case_exact);
    assert_eq!(characteristics.mutability, Mutability::ReadWrite);
    assert_eq!(characteristics.returned, Returned::Default);
    assert_eq!(characteristics.uniqueness, Uniqueness::None);
}

/// Test that explicitly given characteristics are kept
#[test]
fn test_explicit_characteristics() {
    let definition = assert_validation_success!(
        AttributeBuilder::string("password")
            .required()
            .case_exact()
            .with("description", json!("The user's cleartext password."))
            .with("mutability", json!("writeOnly"))
            .with("returned", json!("never"))
            .with("uniqueness", json!("server"))
            .definition()
    );
    let characteristics = definition.characteristics();

    assert!(characteristics.required);
    assert!(characteristics.case_exact);
    assert_eq!(characteristics.description, "The user's cleartext password.");
    assert_eq!(characteristics.mutability, Mutability::WriteOnly);
    assert_eq!(characteristics.returned, Returned::Never);
    assert_eq!(characteristics.uniqueness, Uniqueness::Server);
}

/// Test that every data type keyword is recognized
#[test]
fn test_all_data_types_parse() {
    for data_type in ["string", "boolean", "decimal", "integer", "dateTime", "binary"] {
        let definition =
            assert_validation_success!(AttributeBuilder::new("value").with_type(data_type).definition());
        assert_eq!(definition.data_type().as_str(), data_type);
    }
}

/// Test that data type keywords are case-sensitive
#[test]
fn test_unknown_data_type() {
    let result = AttributeBuilder::new("nickName").with_type("text").definition();
    assert_validation_error!(result, ValidationError::InvalidEnumValue { .. });

    let result = AttributeBuilder::new("nickName").with_type("String").definition();
    match result {
        Err(ValidationError::InvalidEnumValue { value, allowed, .. }) => {
            assert_eq!(value, "String");
            assert_eq!(allowed, AttributeType::allowed_values());
        }
        other => panic!("Expected InvalidEnumValue error, got {:?}", other),
    }
}

/// Test that mutability, returned and uniqueness reject unknown keywords
#[test]
fn test_invalid_enumerated_characteristics() {
    let cases = [
        ("mutability", "readonly"),
        ("returned", "sometimes"),
        ("uniqueness", "local"),
    ];

    for (field, value) in cases {
        let result = AttributeBuilder::string("nickName").with(field, json!(value)).definition();
        match result {
            Err(ValidationError::InvalidEnumValue {
                field: error_field,
                value: error_value,
                ..
            }) => {
                assert_eq!(error_field, field);
                assert_eq!(error_value, value);
            }
            other => panic!("Expected InvalidEnumValue for {}, got {:?}", field, other),
        }
    }
}

/// Test that name and multiValued are required
#[test]
fn test_missing_required_characteristics() {
    let result = AttributeBuilder::string("nickName").without("name").definition();
    assert_eq!(result, Err(ValidationError::missing_field("name")));

    let result = AttributeBuilder::string("nickName").without("multiValued").definition();
    assert_eq!(result, Err(ValidationError::missing_field("multiValued")));
}

/// Test the attribute name grammar
#[test]
fn test_attribute_names() {
    for name in ["displayName", "x509Certificates", "d$i$s$p$l$a$y", "given_name", "zip-code"] {
        let definition = assert_validation_success!(AttributeBuilder::string(name).definition());
        assert_eq!(definition.name(), name.to_lowercase());
    }

    for name in ["$displayName", "2fa", "_private", "display name", "émail", "user.name"] {
        let result = AttributeBuilder::string(name).definition();
        assert_validation_error!(result, ValidationError::InvalidName { .. });
    }

    let result = AttributeBuilder::string("").definition();
    assert_eq!(result, Err(ValidationError::empty_field("name")));
}

/// Test that `$ref` is only a valid name for reference attributes
#[test]
fn test_ref_name_position() {
    let result = AttributeBuilder::string("$ref").definition();
    assert_eq!(
        result,
        Err(ValidationError::InvalidName {
            field: "name".to_string(),
            value: "$ref".to_string(),
        })
    );

    let definition = assert_validation_success!(AttributeBuilder::reference("$ref", &["User"]).definition());
    assert_eq!(definition.name(), "$ref");
}

/// Test that characteristics with the wrong JSON type are rejected
#[test]
fn test_invalid_field_types() {
    let cases = [
        ("name", json!(42), "string", "integer"),
        ("multiValued", json!("false"), "boolean", "string"),
        ("required", json!(1), "boolean", "integer"),
        ("caseExact", json!("yes"), "boolean", "string"),
        ("description", json!(["a"]), "string", "array"),
        ("mutability", json!(true), "string", "boolean"),
        ("canonicalValues", json!("work"), "array", "string"),
    ];

    for (field, value, expected, actual) in cases {
        let result = AttributeBuilder::string("nickName").with(field, value).definition();
        assert_eq!(
            result,
            Err(ValidationError::invalid_field_type(field, expected, actual)),
            "field {}",
            field
        );
    }
}

/// Test that canonical values must be non-empty strings
#[test]
fn test_canonical_value_entries() {
    let result = AttributeBuilder::string("type").with("canonicalValues", json!(["work", 1])).definition();
    assert_eq!(
        result,
        Err(ValidationError::invalid_field_type("canonicalValues[1]", "string", "integer"))
    );

    let result = AttributeBuilder::string("type").canonical_values(&["work", ""]).definition();
    assert_eq!(result, Err(ValidationError::empty_field("canonicalValues[1]")));
}

/// Test that canonical values on non-string attributes are accepted and ignored
#[test]
fn test_canonical_values_on_non_string_types() {
    init_logging();
    let attribute = assert_validation_success!(
        AttributeBuilder::integer("priority").canonical_values(&["1", "2"]).attribute()
    );
    assert_eq!(attribute.validate(&json!(7)).unwrap().as_i64(), Some(7));
}

/// Test that fields outside the definition format are rejected
#[test]
fn test_unknown_fields() {
    let result = AttributeBuilder::string("nickName").with("maxLength", json!(64)).definition();
    assert_eq!(
        result,
        Err(ValidationError::UnknownField {
            field: "maxLength".to_string()
        })
    );

    // Field names are matched exactly
    let result = AttributeBuilder::string("nickName").with("MultiValued", json!(false)).definition();
    assert_validation_error!(result, ValidationError::UnknownField { .. });
}

/// Test that a definition must be a JSON object
#[test]
fn test_definition_must_be_object() {
    let result = scim_schema::create_attribute_schema(&json!("nickName"));
    assert_eq!(result, Err(ValidationError::invalid_field_type("", "object", "string")));
}

/// Test that null characteristics count as absent by default
#[test]
fn test_null_characteristics() {
    let definition = assert_validation_success!(
        AttributeBuilder::string("nickName")
            .with("description", json!(null))
            .with("required", json!(null))
            .with("type", json!(null))
            .definition()
    );
    assert_eq!(definition.data_type(), AttributeType::String);
    assert!(!definition.required());

    let result = AttributeBuilder::string("nickName").with("multiValued", json!(null)).definition();
    assert_eq!(result, Err(ValidationError::missing_field("multiValued")));
}

/// Test that null characteristics are type errors when null isn't absent
#[test]
fn test_null_characteristics_strict() {
    let config = ValidationConfig::default().with_null_as_absent(false);
    let value = AttributeBuilder::string("nickName").with("description", json!(null)).build();

    let result = create_attribute_schema_with_config(&value, &config);
    assert_eq!(
        result,
        Err(ValidationError::invalid_field_type("description", "string", "null"))
    );
}
