//! HAL+JSON decoding.
//!
//! A document is split into its reserved keys (`_type`, `_links`,
//! `_embedded`) and plain fields. Embedded content is decoded recursively
//! through the same path, so `_type` is required at every level. The
//! registry then picks the resource variant for the decoded type name.

use serde_json::{Map, Value};

use crate::error::{HalError, Result};
use crate::link::Link;
use crate::models::ApiError;
use crate::object::ResourceObject;
use crate::registry::TypeRegistry;
use crate::resource::{Embedded, Resource};
use crate::traits::TypedResource;

/// Decode a document into whatever resource its `_type` names.
pub fn decode(bytes: &[u8], registry: &TypeRegistry) -> Result<Resource> {
    decode_value(serde_json::from_slice(bytes)?, registry)
}

/// Decode an already parsed JSON value.
pub fn decode_value(value: Value, registry: &TypeRegistry) -> Result<Resource> {
    decode_document(into_document("$", value)?, None, registry)
}

/// Decode a document that must have the type `expected`.
///
/// A server `Error` in place of the expected type is returned as
/// [`HalError::Api`]; any other type is a [`HalError::TypeMismatch`].
pub fn decode_expected(bytes: &[u8], expected: &str, registry: &TypeRegistry) -> Result<Resource> {
    let document = into_document("$", serde_json::from_slice(bytes)?)?;
    decode_document(document, Some(expected), registry)
}

/// Decode a document straight into a typed wrapper.
///
/// Same rules as [`decode_expected`] with `T::TYPE_NAME`; the registry is
/// only used for embedded resources.
pub fn decode_as<T: TypedResource>(bytes: &[u8], registry: &TypeRegistry) -> Result<T> {
    let document = into_document("$", serde_json::from_slice(bytes)?)?;
    let type_name = read_type(&document)?;
    check_expected(&document, &type_name, T::TYPE_NAME)?;
    Ok(T::from_object(decode_object(document, type_name, registry)?))
}

fn into_document(key: &str, value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(HalError::malformed(
            key,
            format!("expected a resource object, got {}", kind(&other)),
        )),
    }
}

pub(crate) fn read_type(document: &Map<String, Value>) -> Result<String> {
    match document.get("_type") {
        None => Err(HalError::MissingType),
        Some(Value::String(name)) => Ok(name.clone()),
        Some(other) => Err(HalError::malformed(
            "_type",
            format!("expected a string, got {}", kind(other)),
        )),
    }
}

fn check_expected(document: &Map<String, Value>, actual: &str, expected: &str) -> Result<()> {
    if actual == expected {
        return Ok(());
    }
    if actual == ApiError::TYPE_NAME {
        return Err(HalError::Api(ApiError::from_map(document)?));
    }
    Err(HalError::TypeMismatch {
        expected: expected.to_string(),
        actual: actual.to_string(),
    })
}

fn decode_document(
    document: Map<String, Value>,
    expected: Option<&str>,
    registry: &TypeRegistry,
) -> Result<Resource> {
    let type_name = read_type(&document)?;
    if let Some(expected) = expected {
        check_expected(&document, &type_name, expected)?;
    }
    if type_name == ApiError::TYPE_NAME {
        return Ok(Resource::Error(ApiError::from_map(&document)?));
    }
    let object = decode_object(document, type_name, registry)?;
    Ok(registry.construct(object))
}

fn decode_object(
    document: Map<String, Value>,
    type_name: String,
    registry: &TypeRegistry,
) -> Result<ResourceObject> {
    let mut object = ResourceObject::new(type_name);
    for (key, value) in document {
        match key.as_str() {
            "_type" => {}
            "_links" => decode_links(&mut object, value)?,
            "_embedded" => decode_embedded(&mut object, value, registry)?,
            _ => {
                object.set_field(key, value);
            }
        }
    }
    Ok(object)
}

fn decode_links(object: &mut ResourceObject, value: Value) -> Result<()> {
    let links = match value {
        Value::Null => return Ok(()),
        Value::Object(links) => links,
        other => {
            return Err(HalError::malformed(
                "_links",
                format!("expected an object, got {}", kind(&other)),
            ))
        }
    };

    for (name, value) in links {
        match value {
            Value::Object(_) => {
                let link: Link = serde_json::from_value(value)
                    .map_err(|e| HalError::malformed(format!("_links.{name}"), e.to_string()))?;
                object.set_link(name, link);
            }
            Value::Array(_) => {
                // Several links under one name are not supported yet.
                tracing::debug!(link = %name, "skipping link array");
            }
            other => {
                return Err(HalError::malformed(
                    format!("_links.{name}"),
                    format!("expected a link object, got {}", kind(&other)),
                ))
            }
        }
    }
    Ok(())
}

fn decode_embedded(
    object: &mut ResourceObject,
    value: Value,
    registry: &TypeRegistry,
) -> Result<()> {
    let embedded = match value {
        Value::Null => return Ok(()),
        Value::Object(embedded) => embedded,
        other => {
            return Err(HalError::malformed(
                "_embedded",
                format!("expected an object, got {}", kind(&other)),
            ))
        }
    };

    for (name, value) in embedded {
        let key = format!("_embedded.{name}");
        let entry = match value {
            Value::Array(items) => Embedded::List(
                items
                    .into_iter()
                    .map(|item| decode_document(into_document(&key, item)?, None, registry))
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Object(document) => {
                Embedded::Resource(Box::new(decode_document(document, None, registry)?))
            }
            other => Embedded::Value(other),
        };
        object.insert_embedded(name, entry);
    }
    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Collection, Project};
    use crate::traits::HalResource;
    use serde_json::json;

    fn registry() -> TypeRegistry {
        TypeRegistry::default()
    }

    fn decode_json(value: Value) -> Result<Resource> {
        decode_value(value, &registry())
    }

    #[test]
    fn test_missing_type_is_fatal() {
        let err = decode_json(json!({"id": 1})).unwrap_err();
        assert!(matches!(err, HalError::MissingType));
    }

    #[test]
    fn test_missing_type_in_embedded_is_fatal() {
        let err = decode_json(json!({
            "_type": "WorkPackage",
            "_embedded": {"author": {"name": "nobody"}}
        }))
        .unwrap_err();
        assert!(matches!(err, HalError::MissingType));
    }

    #[test]
    fn test_non_string_type_is_malformed() {
        let err = decode_json(json!({"_type": 3})).unwrap_err();
        assert!(matches!(err, HalError::Malformed { ref key, .. } if key == "_type"));
    }

    #[test]
    fn test_non_object_document_is_malformed() {
        let err = decode(b"[1, 2]", &registry()).unwrap_err();
        assert!(matches!(err, HalError::Malformed { .. }));
        let err = decode(b"{not json", &registry()).unwrap_err();
        assert!(matches!(err, HalError::ParseError(_)));
    }

    #[test]
    fn test_registered_types_dispatch() {
        let cases = [
            ("Collection", "Collection"),
            ("WorkPackageCollection", "Collection"),
            ("Project", "Project"),
            ("WorkPackage", "WorkPackage"),
            ("User", "User"),
            ("UserPreferences", "UserPreferences"),
            ("TimeEntry", "TimeEntry"),
            ("TimeEntriesActivity", "TimeEntriesActivity"),
            ("Attachment", "Attachment"),
        ];
        for (type_name, variant) in cases {
            let res = decode_json(json!({"_type": type_name})).unwrap();
            assert_eq!(res.resource_type(), type_name);
            let actual = match res {
                Resource::Collection(_) => "Collection",
                Resource::Project(_) => "Project",
                Resource::WorkPackage(_) => "WorkPackage",
                Resource::User(_) => "User",
                Resource::UserPreferences(_) => "UserPreferences",
                Resource::TimeEntry(_) => "TimeEntry",
                Resource::TimeEntriesActivity(_) => "TimeEntriesActivity",
                Resource::Attachment(_) => "Attachment",
                Resource::Generic(_) => "Generic",
                Resource::Error(_) => "Error",
            };
            assert_eq!(actual, variant, "wrong variant for {type_name}");
        }
    }

    #[test]
    fn test_unregistered_type_is_generic() {
        let res = decode_json(json!({"_type": "Configuration", "maximumAttachmentFileSize": 5242880}))
            .unwrap();
        assert!(matches!(res, Resource::Generic(_)));
        assert_eq!(res.resource_type(), "Configuration");
        assert_eq!(res.object().unwrap().int("maximumAttachmentFileSize"), 5242880);
    }

    #[test]
    fn test_empty_registry_decodes_everything_generic() {
        let res = decode_value(json!({"_type": "Project"}), &TypeRegistry::empty()).unwrap();
        assert!(matches!(res, Resource::Generic(_)));
    }

    #[test]
    fn test_error_decodes_as_error_resource() {
        let res = decode_json(json!({
            "_type": "Error",
            "errorIdentifier": "E1",
            "message": "boom"
        }))
        .unwrap();
        assert_eq!(res.as_error().unwrap().error_identifier, "E1");
    }

    #[test]
    fn test_nested_errors_must_be_typed_errors() {
        let err = decode_json(json!({
            "_type": "Error",
            "errorIdentifier": "urn:openproject-org:api:v3:errors:MultipleErrors",
            "message": "Multiple field constraints have been violated.",
            "_embedded": {"errors": [{"message": "untyped"}]}
        }))
        .unwrap_err();
        assert!(matches!(err, HalError::MissingType));

        let body = br#"{
            "_type": "Error",
            "errorIdentifier": "urn:openproject-org:api:v3:errors:MultipleErrors",
            "_embedded": {"errors": [{"_type": "Project", "id": 1}]}
        }"#;
        let err = decode_as::<Collection>(body, &registry()).unwrap_err();
        assert!(matches!(err, HalError::Malformed { ref key, .. } if key == "_embedded.errors"));
    }

    #[test]
    fn test_expected_type_error_short_circuit() {
        let body = br#"{"_type":"Error","errorIdentifier":"E1","message":"boom"}"#;
        let err = decode_as::<Collection>(body, &registry()).unwrap_err();
        match err {
            HalError::Api(api) => assert_eq!(api.error_identifier, "E1"),
            other => panic!("Expected Api error, got {other:?}"),
        }

        let err = decode_expected(body, "Collection", &registry()).unwrap_err();
        assert_eq!(err.api_error().unwrap().message, "boom");
    }

    #[test]
    fn test_expected_type_mismatch() {
        let err = decode_as::<Collection>(br#"{"_type":"Project","id":1}"#, &registry())
            .unwrap_err();
        match err {
            HalError::TypeMismatch { expected, actual } => {
                assert_eq!(expected, "Collection");
                assert_eq!(actual, "Project");
            }
            other => panic!("Expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_as_typed() {
        let project: Project =
            decode_as(br#"{"_type":"Project","id":3,"name":"Lectio"}"#, &registry()).unwrap();
        assert_eq!(project.id(), 3);
        assert_eq!(project.name(), "Lectio");
    }

    #[test]
    fn test_links_decode() {
        let res = decode_json(json!({
            "_type": "Project",
            "_links": {
                "self": {"href": "/api/v3/projects/3", "title": "Lectio"},
                "createWorkPackage": {"href": "/api/v3/projects/3/work_packages/form", "method": "post"},
                "parent": {"href": null}
            }
        }))
        .unwrap();
        assert_eq!(res.link("self").unwrap().title.as_deref(), Some("Lectio"));
        assert_eq!(
            res.link("createWorkPackage").unwrap().method.as_deref(),
            Some("post")
        );
        assert!(!res.link("parent").unwrap().is_resolvable());
    }

    #[test]
    fn test_link_arrays_are_skipped() {
        let res = decode_json(json!({
            "_type": "WorkPackage",
            "_links": {
                "self": {"href": "/api/v3/work_packages/1"},
                "customField3": [
                    {"href": "/api/v3/custom_options/1"},
                    {"href": "/api/v3/custom_options/2"}
                ]
            }
        }))
        .unwrap();
        assert!(res.link("self").is_some());
        assert!(res.link("customField3").is_none());
    }

    #[test]
    fn test_scalar_link_is_malformed() {
        let err = decode_json(json!({"_type": "Project", "_links": {"self": "/api/v3/projects/1"}}))
            .unwrap_err();
        assert!(matches!(err, HalError::Malformed { ref key, .. } if key == "_links.self"));

        let err = decode_json(json!({"_type": "Project", "_links": []})).unwrap_err();
        assert!(matches!(err, HalError::Malformed { ref key, .. } if key == "_links"));
    }

    #[test]
    fn test_embedded_shapes() {
        let res = decode_json(json!({
            "_type": "WorkPackage",
            "_embedded": {
                "author": {"_type": "User", "id": 4, "name": "test1 tester"},
                "watchers": [{"_type": "User", "id": 1}, {"_type": "User", "id": 2}],
                "count": 2,
                "nothing": null
            }
        }))
        .unwrap();
        let object = res.object().unwrap();

        let author = object.embedded_resource("author").unwrap();
        assert!(matches!(author, Resource::User(_)));

        let watchers = object.embedded_resource_list("watchers").unwrap();
        assert_eq!(watchers.len(), 2);
        assert_eq!(watchers[1].object().unwrap().int("id"), 2);

        assert_eq!(object.embedded("count"), Some(&Embedded::Value(json!(2))));
        assert_eq!(object.embedded("nothing"), Some(&Embedded::Value(Value::Null)));
        // Lists are not single resources and vice versa.
        assert!(object.embedded_resource("watchers").is_none());
        assert!(object.embedded_resource_list("author").is_none());
    }

    #[test]
    fn test_embedded_list_elements_must_be_objects() {
        let err = decode_json(json!({
            "_type": "Collection",
            "_embedded": {"elements": [1, 2]}
        }))
        .unwrap_err();
        assert!(matches!(err, HalError::Malformed { ref key, .. } if key == "_embedded.elements"));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let res = decode(br#"{"_type":"Project","id":1,"id":2}"#, &registry()).unwrap();
        assert_eq!(res.object().unwrap().int("id"), 2);
    }

    #[test]
    fn test_round_trip() {
        let original = decode_json(json!({
            "_type": "Collection",
            "total": 1,
            "count": 1,
            "pageSize": 20,
            "offset": 1,
            "_embedded": {
                "elements": [
                    {"_type": "Project", "id": 3, "name": "Lectio",
                     "_links": {"self": {"href": "/api/v3/projects/3"}}}
                ]
            },
            "_links": {
                "self": {"href": "/api/v3/projects"},
                "nextByOffset": {"href": "/api/v3/projects?offset=2&pageSize=20"}
            }
        }))
        .unwrap();

        let encoded = serde_json::to_vec(&original).unwrap();
        let decoded = decode(&encoded, &registry()).unwrap();

        assert_eq!(decoded.resource_type(), original.resource_type());
        let (a, b) = (original.object().unwrap(), decoded.object().unwrap());
        assert_eq!(a.fields(), b.fields());
        let names = |o: &ResourceObject| o.links().map(|(n, _)| n.to_string()).collect::<Vec<_>>();
        assert_eq!(names(a), names(b));
        assert_eq!(decoded, original);
    }
}
