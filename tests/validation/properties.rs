//! Property-based tests for definitions and validators.
//!
//! Uses proptest to check the name grammar, case folding and numeric
//! validation across wide input ranges, and that validators never panic on
//! arbitrary JSON.

use proptest::prelude::*;
use scim_schema::schema::{Attribute, formats};
use scim_schema::{AttributeValue, ValidationError};
use serde_json::{Value, json};

use super::{AttributeBuilder, test_fixtures};

fn json_value_strategy(max_depth: u32) -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|v| Value::Number(v.into())),
        any::<f64>()
            .prop_filter("finite", |v| v.is_finite())
            .prop_map(|v| serde_json::Number::from_f64(v).map_or(Value::Null, Value::Number)),
        ".{0,12}".prop_map(Value::String),
        prop_oneof![Just("value"), Just("type"), Just("primary")].prop_map(|s| Value::String(s.to_string())),
    ];

    leaf.prop_recursive(max_depth, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(
                prop_oneof![Just("value".to_string()), Just("Type".to_string()), "[a-z]{1,6}"],
                inner,
                0..4
            )
            .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

fn attribute(builder: AttributeBuilder) -> Attribute {
    builder.attribute().unwrap()
}

proptest! {
    #[test]
    fn names_following_the_grammar_are_lower_cased(name in "[A-Za-z][A-Za-z0-9$_-]{0,20}") {
        let definition = AttributeBuilder::string(&name).definition().unwrap();
        prop_assert_eq!(definition.name(), name.to_lowercase());
        prop_assert!(formats::is_attribute_name(&name));
    }

    #[test]
    fn names_starting_with_a_non_letter_are_rejected(name in "[0-9$_-][A-Za-z0-9$_-]{0,20}") {
        let result = AttributeBuilder::string(&name).definition();
        let is_invalid_name = matches!(result, Err(ValidationError::InvalidName { .. }));
        prop_assert!(is_invalid_name);
    }

    #[test]
    fn case_insensitive_strings_are_lower_cased(text in ".{0,24}") {
        let folded = attribute(AttributeBuilder::string("nickName"));
        let value = folded.validate(&json!(text)).unwrap();
        prop_assert_eq!(&value, &AttributeValue::String(text.to_lowercase()));
        prop_assert_eq!(folded.validate(&value.to_json()).unwrap(), value);

        let exact = attribute(AttributeBuilder::string("nickName").case_exact());
        prop_assert_eq!(exact.validate(&json!(text)).unwrap(), AttributeValue::String(text.clone()));
    }

    #[test]
    fn integers_are_accepted_unchanged(value in any::<i64>()) {
        let integer = attribute(AttributeBuilder::integer("count"));
        prop_assert_eq!(integer.validate(&json!(value)).unwrap(), AttributeValue::Integer(value));
    }

    #[test]
    fn non_integral_numbers_are_not_integers(whole in any::<i32>(), fraction in 0.01f64..0.99) {
        let integer = attribute(AttributeBuilder::integer("count"));
        let result = integer.validate(&json!(f64::from(whole) + fraction));
        let is_invalid_integer = matches!(result, Err(ValidationError::InvalidIntegerValue { .. }));
        prop_assert!(is_invalid_integer);
    }

    #[test]
    fn decimals_are_accepted_unchanged(value in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
        let decimal = attribute(AttributeBuilder::decimal("weight"));
        prop_assert_eq!(decimal.validate(&json!(value)).unwrap(), AttributeValue::Decimal(value));
    }

    #[test]
    fn binary_values_decode_their_encoding(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let binary = attribute(AttributeBuilder::binary("photo"));
        let encoded = formats::encode_base64(&bytes);
        prop_assert_eq!(binary.validate(&json!(encoded)).unwrap(), AttributeValue::Binary(bytes));
    }

    #[test]
    fn validators_never_panic(value in json_value_strategy(3)) {
        let emails = Attribute::new(&test_fixtures::emails_definition()).unwrap();
        if let Ok(canonical) = emails.validate(&value) {
            prop_assert_eq!(emails.validate(&canonical.to_json()).unwrap(), canonical);
        }
    }
}
