//! Primitive value/metadata parallel arrays
//!
//! A repeated primitive field is written as two aligned arrays:
//!
//! ```json
//! "given":  ["Peter", null, "James"],
//! "_given": [null, {"id": "a"}, null]
//! ```
//!
//! Position `i` of both arrays describes one logical element. `null` marks
//! the half that is absent at that position. Decoding merges the arrays into
//! slots; encoding splits slots back, placing `null` exactly where a half is
//! missing.

use crate::error::{Error, Result};
use serde_json::{Map, Value as JsonValue};

/// One logical position of a primitive list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Slot<'a> {
    pub value: Option<&'a JsonValue>,
    pub metadata: Option<&'a Map<String, JsonValue>>,
}

fn entries<'a>(json: &'a JsonValue, path: &str) -> Result<&'a [JsonValue]> {
    let items = json.as_array().ok_or_else(|| Error::UnexpectedType {
        path: path.to_string(),
        expected: "an array",
    })?;
    if items.iter().all(JsonValue::is_null) {
        return Err(Error::EmptyArray(path.to_string()));
    }
    Ok(items)
}

/// Merges a value array and its metadata array into aligned slots.
pub(crate) fn merge<'a>(
    values: Option<&'a JsonValue>,
    metadata: Option<&'a JsonValue>,
    path: &str,
    metadata_path: &str,
) -> Result<Vec<Slot<'a>>> {
    let values = values.map(|v| entries(v, path)).transpose()?;
    let metadata = metadata.map(|m| entries(m, metadata_path)).transpose()?;

    let len = match (values, metadata) {
        (Some(v), Some(m)) if v.len() != m.len() => {
            return Err(Error::MisalignedArrays {
                path: path.to_string(),
                values: v.len(),
                metadata: m.len(),
            });
        }
        (Some(v), _) => v.len(),
        (None, Some(m)) => m.len(),
        (None, None) => return Ok(Vec::new()),
    };

    let mut slots = Vec::with_capacity(len);
    for index in 0..len {
        let value = values
            .and_then(|v| v.get(index))
            .filter(|v| !v.is_null());
        let meta = match metadata.and_then(|m| m.get(index)) {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::Object(map)) => Some(map),
            Some(_) => {
                return Err(Error::UnexpectedType {
                    path: format!("{metadata_path}[{index}]"),
                    expected: "an object or null",
                })
            }
        };
        if value.is_none() && meta.is_none() {
            let path = format!("{path}[{index}]");
            return Err(match metadata {
                Some(_) => Error::EmptyElement(path),
                None => Error::Null(path),
            });
        }
        slots.push(Slot {
            value,
            metadata: meta,
        });
    }
    Ok(slots)
}

/// Splits per-position `(value, metadata)` pairs into the value array and
/// the metadata array. An array is omitted when it would hold only `null`s.
pub(crate) fn split<I>(items: I) -> (Option<JsonValue>, Option<JsonValue>)
where
    I: IntoIterator<Item = (Option<JsonValue>, Option<JsonValue>)>,
{
    let (values, metadata): (Vec<_>, Vec<_>) = items.into_iter().unzip();
    let pack = |column: Vec<Option<JsonValue>>| {
        if column.iter().all(Option::is_none) {
            None
        } else {
            Some(JsonValue::Array(
                column
                    .into_iter()
                    .map(|v| v.unwrap_or(JsonValue::Null))
                    .collect(),
            ))
        }
    };
    (pack(values), pack(metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_with_placeholders() {
        let values = json!([1, null, 3]);
        let metadata = json!([null, {"id": "x"}, null]);
        let slots = merge(Some(&values), Some(&metadata), "a.b", "a._b").unwrap();

        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].value, Some(&json!(1)));
        assert!(slots[0].metadata.is_none());
        assert!(slots[1].value.is_none());
        assert_eq!(slots[1].metadata.and_then(|m| m.get("id")), Some(&json!("x")));
        assert_eq!(slots[2].value, Some(&json!(3)));
    }

    #[test]
    fn test_merge_values_only_and_metadata_only() {
        let values = json!(["a", "b"]);
        let slots = merge(Some(&values), None, "p", "_p").unwrap();
        assert!(slots.iter().all(|s| s.value.is_some() && s.metadata.is_none()));

        let metadata = json!([{"id": "1"}]);
        let slots = merge(None, Some(&metadata), "p", "_p").unwrap();
        assert_eq!(slots.len(), 1);
        assert!(slots[0].value.is_none());
    }

    #[test]
    fn test_merge_rejects_misaligned_arrays() {
        let values = json!([1, 2]);
        let metadata = json!([null, null, {"id": "x"}]);
        match merge(Some(&values), Some(&metadata), "p", "_p") {
            Err(Error::MisalignedArrays {
                values, metadata, ..
            }) => assert_eq!((values, metadata), (2, 3)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_merge_rejects_hollow_positions() {
        let values = json!([1, null]);
        let metadata = json!([null, null]);
        assert!(matches!(
            merge(Some(&values), Some(&metadata), "p", "_p"),
            Err(Error::EmptyArray(path)) if path == "_p"
        ));

        let values = json!([1, null, 3]);
        let metadata = json!([{"id": "a"}, null, null]);
        assert!(matches!(
            merge(Some(&values), Some(&metadata), "p", "_p"),
            Err(Error::EmptyElement(path)) if path == "p[1]"
        ));

        let values = json!([1, null]);
        assert!(matches!(
            merge(Some(&values), None, "p", "_p"),
            Err(Error::Null(path)) if path == "p[1]"
        ));
    }

    #[test]
    fn test_merge_rejects_empty_and_non_arrays() {
        let empty = json!([]);
        assert!(matches!(
            merge(Some(&empty), None, "p", "_p"),
            Err(Error::EmptyArray(_))
        ));
        let scalar = json!("x");
        assert!(matches!(
            merge(Some(&scalar), None, "p", "_p"),
            Err(Error::UnexpectedType { .. })
        ));
        let values = json!(["x"]);
        let bad_meta = json!(["id"]);
        assert!(matches!(
            merge(Some(&values), Some(&bad_meta), "p", "_p"),
            Err(Error::UnexpectedType { path, .. }) if path == "_p[0]"
        ));
    }

    #[test]
    fn test_split_restores_placeholders() {
        let (values, metadata) = split(vec![
            (Some(json!(1)), None),
            (None, Some(json!({"id": "x"}))),
            (Some(json!(3)), None),
        ]);
        assert_eq!(values, Some(json!([1, null, 3])));
        assert_eq!(metadata, Some(json!([null, {"id": "x"}, null])));
    }

    #[test]
    fn test_split_omits_all_null_columns() {
        let (values, metadata) = split(vec![(Some(json!("a")), None), (Some(json!("b")), None)]);
        assert_eq!(values, Some(json!(["a", "b"])));
        assert_eq!(metadata, None);
    }
}
