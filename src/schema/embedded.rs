//! Embedded RFC 7643 schema documents.
//!
//! The core SCIM schemas (User, Group, EnterpriseUser, ResourceType, Schema and
//! ServiceProviderConfig) are bundled from the crate's `schemas/` directory so
//! they can be used without any external files.
//!
//! The `Schema` document describes `attributes.subAttributes` as a complex
//! attribute inside a complex attribute, which this crate does not allow, so
//! [`core_schema_schema`] does not build into a [`Schema`](super::Schema).

use super::collection::Schema;
use crate::error::ScimResult;

/// Returns the core User schema as a JSON string.
pub fn core_user_schema() -> &'static str {
    include_str!("../../schemas/User.json")
}

/// Returns the core Group schema as a JSON string.
pub fn core_group_schema() -> &'static str {
    include_str!("../../schemas/Group.json")
}

/// Returns the enterprise User extension schema as a JSON string.
pub fn enterprise_user_schema() -> &'static str {
    include_str!("../../schemas/EnterpriseUser.json")
}

/// Returns the ResourceType schema as a JSON string.
pub fn resource_type_schema() -> &'static str {
    include_str!("../../schemas/ResourceType.json")
}

/// Returns the Schema schema as a JSON string.
pub fn core_schema_schema() -> &'static str {
    include_str!("../../schemas/Schema.json")
}

/// Returns the ServiceProviderConfig schema as a JSON string.
pub fn service_provider_config_schema() -> &'static str {
    include_str!("../../schemas/ServiceProviderConfig.json")
}

/// All embedded documents, keyed by their bundled file name.
pub fn all_schemas() -> [(&'static str, &'static str); 6] {
    [
        ("User", core_user_schema()),
        ("Group", core_group_schema()),
        ("EnterpriseUser", enterprise_user_schema()),
        ("ResourceType", resource_type_schema()),
        ("Schema", core_schema_schema()),
        ("ServiceProviderConfig", service_provider_config_schema()),
    ]
}

/// Build the core User schema.
pub fn user() -> ScimResult<Schema> {
    Schema::from_json_str(core_user_schema())
}

/// Build the core Group schema.
pub fn group() -> ScimResult<Schema> {
    Schema::from_json_str(core_group_schema())
}

/// Build the enterprise User extension schema.
pub fn enterprise_user() -> ScimResult<Schema> {
    Schema::from_json_str(enterprise_user_schema())
}

/// Build the ResourceType schema.
pub fn resource_type() -> ScimResult<Schema> {
    Schema::from_json_str(resource_type_schema())
}

/// Build the ServiceProviderConfig schema.
pub fn service_provider_config() -> ScimResult<Schema> {
    Schema::from_json_str(service_provider_config_schema())
}
