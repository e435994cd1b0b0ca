//! Test fixtures based on RFC 7643 examples.

use serde_json::{Value, json};

/// RFC 7643 example data
pub mod rfc_examples {
    use super::*;

    /// Attribute values of the RFC 7643 section 8.2 full User example,
    /// restricted to the core User schema.
    pub fn user_full() -> Value {
        json!({
            "schemas": ["urn:ietf:params:scim:schemas:core:2.0:User"],
            "userName": "bjensen",
            "name": {
                "formatted": "Ms. Barbara J Jensen, III",
                "familyName": "Jensen",
                "givenName": "Barbara",
                "middleName": "Jane",
                "honorificPrefix": "Ms.",
                "honorificSuffix": "III"
            },
            "displayName": "Babs Jensen",
            "nickName": "Babs",
            "profileUrl": "https://login.example.com/bjensen",
            "emails": [
                { "value": "bjensen@example.com", "type": "work", "primary": true },
                { "value": "babs@jensen.org", "type": "home" }
            ],
            "addresses": [
                {
                    "type": "work",
                    "streetAddress": "100 Universal City Plaza",
                    "locality": "Hollywood",
                    "region": "CA",
                    "postalCode": "91608",
                    "country": "USA",
                    "formatted": "100 Universal City Plaza\nHollywood, CA 91608 USA",
                    "primary": true
                }
            ],
            "phoneNumbers": [
                { "value": "555-555-5555", "type": "work" },
                { "value": "555-555-4444", "type": "mobile" }
            ],
            "ims": [{ "value": "someaimhandle", "type": "aim" }],
            "photos": [
                {
                    "value": "https://photos.example.com/profilephoto/72930000000Ccne/F",
                    "type": "photo"
                }
            ],
            "userType": "Employee",
            "title": "Tour Guide",
            "preferredLanguage": "en-US",
            "locale": "en-US",
            "timezone": "America/Los_Angeles",
            "active": true,
            "password": "t1meMa$heen",
            "groups": [
                {
                    "value": "e9e30dba-f08f-4109-8486-d5c6a331660a",
                    "$ref": "https://example.com/v2/Groups/e9e30dba-f08f-4109-8486-d5c6a331660a",
                    "display": "Tour Guides"
                }
            ],
            "x509Certificates": [{ "value": "SGVsbG8gV29ybGQh" }]
        })
    }

    /// Attribute values of the RFC 7643 section 8.4 Group example.
    pub fn group() -> Value {
        json!({
            "schemas": ["urn:ietf:params:scim:schemas:core:2.0:Group"],
            "displayName": "Tour Guides",
            "members": [
                {
                    "value": "2819c223-7f76-453a-919d-413861904646",
                    "$ref": "https://example.com/v2/Users/2819c223-7f76-453a-919d-413861904646",
                    "type": "User"
                }
            ]
        })
    }

    /// Attribute values of the RFC 7643 section 8.6 ResourceType example.
    pub fn resource_type() -> Value {
        json!({
            "schemas": ["urn:ietf:params:scim:schemas:core:2.0:ResourceType"],
            "id": "User",
            "name": "User",
            "endpoint": "urn:ietf:params:scim:schemas:core:2.0:User",
            "description": "User Account",
            "schema": "urn:ietf:params:scim:schemas:core:2.0:User",
            "schemaExtensions": [
                {
                    "schema": "urn:ietf:params:scim:schemas:extension:enterprise:2.0:User",
                    "required": true
                }
            ]
        })
    }
}

/// Common test fixtures
pub mod test_fixtures {
    use super::*;

    /// Metadata block with ordered timestamps
    pub fn schema_meta() -> Value {
        json!({
            "resourceType": "Schema",
            "created": "2010-01-23T04:56:22Z",
            "lastModified": "2011-05-13T04:42:34Z",
            "location": "/v2/Schemas/urn:ietf:params:scim:schemas:Application:MyUser",
            "version": "W/\"3694e05e9dff590\""
        })
    }

    /// Emails attribute definition from RFC 7643 section 8.7.1
    pub fn emails_definition() -> Value {
        json!({
            "name": "emails",
            "type": "complex",
            "multiValued": true,
            "description": "Email addresses for the user.",
            "required": false,
            "subAttributes": [
                {
                    "name": "value",
                    "type": "string",
                    "multiValued": false,
                    "required": false,
                    "caseExact": false,
                    "mutability": "readWrite",
                    "returned": "default",
                    "uniqueness": "none"
                },
                {
                    "name": "type",
                    "type": "string",
                    "multiValued": false,
                    "required": false,
                    "caseExact": false,
                    "canonicalValues": ["work", "home", "other"],
                    "mutability": "readWrite",
                    "returned": "default",
                    "uniqueness": "none"
                },
                {
                    "name": "primary",
                    "type": "boolean",
                    "multiValued": false,
                    "required": false,
                    "mutability": "readWrite",
                    "returned": "default"
                }
            ],
            "mutability": "readWrite",
            "returned": "default",
            "uniqueness": "none"
        })
    }
}
