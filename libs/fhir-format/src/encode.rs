//! Resource graph to JSON
//!
//! Encoding is total: every graph the decoder produces maps back to JSON, and
//! the field order of each node is kept. Primitive metadata is split into the
//! `_field` sibling, and lists of primitives into parallel arrays.

use crate::parallel;
use serde_json::{Map, Value as JsonValue};
use tessera_models::{Complex, Element, Extension, FieldValue, Resource, Value};

pub(crate) fn resource(resource: &Resource) -> JsonValue {
    let mut object = Map::new();
    object.insert(
        "resourceType".to_string(),
        JsonValue::from(resource.resource_type()),
    );
    write_fields(&mut object, &resource.fields);
    JsonValue::Object(object)
}

fn complex(value: &Complex) -> JsonValue {
    let mut object = Map::new();
    write_element(&mut object, &value.element);
    write_fields(&mut object, &value.fields);
    JsonValue::Object(object)
}

fn extension(extension: &Extension) -> JsonValue {
    let mut object = Map::new();
    write_element(&mut object, &extension.element);
    object.insert("url".to_string(), JsonValue::from(extension.url.as_str()));
    if let Some(choice) = &extension.value {
        write_single(&mut object, &choice.key("value"), &choice.value);
    }
    JsonValue::Object(object)
}

/// `_field` metadata object, or `None` for an empty element.
fn metadata(element: &Element) -> Option<JsonValue> {
    if element.is_empty() {
        return None;
    }
    let mut object = Map::new();
    write_element(&mut object, element);
    Some(JsonValue::Object(object))
}

fn write_element(object: &mut Map<String, JsonValue>, element: &Element) {
    if let Some(id) = &element.id {
        object.insert("id".to_string(), JsonValue::from(id.as_str()));
    }
    if !element.extension.is_empty() {
        let extensions = element.extension.iter().map(extension).collect();
        object.insert("extension".to_string(), JsonValue::Array(extensions));
    }
}

fn write_fields(object: &mut Map<String, JsonValue>, fields: &[(&'static str, FieldValue)]) {
    for (name, value) in fields {
        match value {
            FieldValue::Single(value) => write_single(object, name, value),
            FieldValue::Choice(choice) => write_single(object, &choice.key(name), &choice.value),
            FieldValue::List(items) => write_list(object, name, items),
        }
    }
}

fn write_single(object: &mut Map<String, JsonValue>, key: &str, value: &Value) {
    match value.primitive_parts() {
        Some((json, element)) => {
            if let Some(json) = json {
                object.insert(key.to_string(), json);
            }
            if let Some(meta) = metadata(element) {
                object.insert(format!("_{key}"), meta);
            }
        }
        None => {
            object.insert(key.to_string(), composite(value));
        }
    }
}

fn write_list(object: &mut Map<String, JsonValue>, key: &str, items: &[Value]) {
    if items.is_empty() {
        return;
    }
    if !items.iter().all(Value::is_primitive) {
        let values = items.iter().map(composite).collect();
        object.insert(key.to_string(), JsonValue::Array(values));
        return;
    }

    let (values, meta) = parallel::split(
        items
            .iter()
            .filter_map(Value::primitive_parts)
            .map(|(json, element)| (json, metadata(element))),
    );
    if let Some(values) = values {
        object.insert(key.to_string(), values);
    }
    if let Some(meta) = meta {
        object.insert(format!("_{key}"), meta);
    }
}

/// A list item that is not part of a parallel pair. Primitives mixed into
/// such a list keep their value only.
fn composite(value: &Value) -> JsonValue {
    match value {
        Value::Complex(c) => complex(c),
        Value::Extension(e) => extension(e),
        Value::Resource(r) => resource(r),
        primitive => primitive
            .primitive_parts()
            .and_then(|(json, _)| json)
            .unwrap_or(JsonValue::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tessera_models::{Choice, Date, Primitive};

    fn string(s: &str) -> Value {
        Value::String(Primitive::new(s.to_string()))
    }

    #[test]
    fn test_primitive_metadata_goes_to_sibling() {
        let birth_date: Date = "1974-12-25".parse().unwrap();
        let patient = Resource::new("Patient").with_field(
            "birthDate",
            Value::Date(Primitive::new(birth_date).with_id("bd")),
        );
        assert_eq!(
            resource(&patient),
            json!({
                "resourceType": "Patient",
                "birthDate": "1974-12-25",
                "_birthDate": {"id": "bd"}
            })
        );
    }

    #[test]
    fn test_primitive_list_splits_into_parallel_arrays() {
        let given = vec![
            string("Peter"),
            Value::String(Primitive::from_parts(None, Element::with_id("g1")).unwrap()),
            string("James"),
        ];
        let name = Complex::new("HumanName").with_field("given", given);
        let patient = Resource::new("Patient").with_field("name", vec![Value::Complex(name)]);

        assert_eq!(
            resource(&patient)["name"][0],
            json!({
                "given": ["Peter", null, "James"],
                "_given": [null, {"id": "g1"}, null]
            })
        );
    }

    #[test]
    fn test_choice_and_extension_keys() {
        let reason = Extension::new(
            "http://example.org/reason",
            Choice::new("String", string("asked")),
        );
        let deceased = Choice::new("Boolean", Value::Boolean(Primitive::new(false)));
        let patient = Resource::new("Patient")
            .with_field("extension", vec![Value::Extension(reason)])
            .with_field("deceased", deceased);

        assert_eq!(
            resource(&patient),
            json!({
                "resourceType": "Patient",
                "extension": [{"url": "http://example.org/reason", "valueString": "asked"}],
                "deceasedBoolean": false
            })
        );
    }

    #[test]
    fn test_empty_lists_are_omitted() {
        let patient = Resource::new("Patient").with_field("name", Vec::<Value>::new());
        assert_eq!(resource(&patient), json!({"resourceType": "Patient"}));
    }
}
