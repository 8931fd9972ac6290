//! Choice-field resolution
//!
//! A choice field `value[x]` appears on the wire under exactly one of the keys
//! `value` + suffix, where the shape lists the permitted suffixes. Primitive
//! alternatives may also carry an `_value<Suffix>` metadata sibling, which
//! counts as the alternative being present.

use crate::error::{Error, Result};
use serde_json::{Map, Value as JsonValue};
use tessera_context::ChoiceOption;

/// The alternative found in an object, and the key it was found under.
#[derive(Debug)]
pub(crate) struct Resolved {
    pub option: &'static ChoiceOption,
    pub key: String,
}

pub(crate) fn key(field: &str, suffix: &str) -> String {
    format!("{field}{suffix}")
}

/// Finds the populated alternative of `field`, if any.
///
/// More than one populated alternative is an error; the document is never
/// resolved by picking one.
pub(crate) fn resolve(
    object: &Map<String, JsonValue>,
    field: &str,
    options: &'static [ChoiceOption],
    path: &str,
) -> Result<Option<Resolved>> {
    let mut found: Vec<Resolved> = Vec::new();
    for option in options {
        let key = key(field, option.suffix);
        let has_metadata =
            option.field_type.primitive().is_some() && object.contains_key(&format!("_{key}"));
        if object.contains_key(&key) || has_metadata {
            found.push(Resolved { option, key });
        }
    }

    if found.len() > 1 {
        return Err(Error::ChoiceConflict {
            path: format!("{path}.{field}[x]"),
            keys: found.into_iter().map(|r| r.key).collect(),
        });
    }
    Ok(found.pop())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tessera_context::shape::option;
    use tessera_context::shape::types::{BOOLEAN, DATE_TIME, STRING};
    use tessera_context::FieldType;

    const OPTIONS: &[ChoiceOption] = &[
        option("String", STRING),
        option("Boolean", BOOLEAN),
        option("DateTime", DATE_TIME),
        option("Reference", FieldType::Complex("Reference")),
    ];

    fn object(value: JsonValue) -> Map<String, JsonValue> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_absent_choice() {
        let obj = object(json!({"status": "final"}));
        assert!(resolve(&obj, "value", OPTIONS, "Observation").unwrap().is_none());
    }

    #[test]
    fn test_single_alternative() {
        let obj = object(json!({"valueBoolean": true}));
        let resolved = resolve(&obj, "value", OPTIONS, "Observation").unwrap().unwrap();
        assert_eq!(resolved.key, "valueBoolean");
        assert_eq!(resolved.option.suffix, "Boolean");
    }

    #[test]
    fn test_metadata_only_alternative() {
        let obj = object(json!({"_valueDateTime": {"id": "t"}}));
        let resolved = resolve(&obj, "value", OPTIONS, "Observation").unwrap().unwrap();
        assert_eq!(resolved.key, "valueDateTime");
    }

    #[test]
    fn test_metadata_sibling_of_complex_is_not_a_match() {
        let obj = object(json!({"_valueReference": {"id": "r"}}));
        assert!(resolve(&obj, "value", OPTIONS, "Observation").unwrap().is_none());
    }

    #[test]
    fn test_conflict() {
        let obj = object(json!({
            "valueString": "a",
            "valueReference": {"reference": "Patient/1"}
        }));
        let err = resolve(&obj, "value", OPTIONS, "Observation").unwrap_err();
        match err {
            Error::ChoiceConflict { path, keys } => {
                assert_eq!(path, "Observation.value[x]");
                assert_eq!(keys, vec!["valueString", "valueReference"]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_value_and_foreign_metadata_conflict() {
        let obj = object(json!({"valueBoolean": true, "_valueString": {"id": "s"}}));
        assert!(matches!(
            resolve(&obj, "value", OPTIONS, "Extension"),
            Err(Error::ChoiceConflict { .. })
        ));
    }
}
