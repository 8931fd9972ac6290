//! Typed resource graph
//!
//! A decoded document is a tree: a [`Resource`] owns its fields, complex values
//! own theirs, and contained resources are owned by their parent. Field order
//! follows the declaration order of the shape that produced the node.

use crate::calendar::{Date, DateTime, Instant, Time};
use crate::element::{Element, Extension};
use crate::primitive::{FhirPrimitive, Primitive};
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(Primitive<bool>),
    Integer(Primitive<i32>),
    Decimal(Primitive<Decimal>),
    String(Primitive<String>),
    Date(Primitive<Date>),
    DateTime(Primitive<DateTime>),
    Time(Primitive<Time>),
    Instant(Primitive<Instant>),
    Complex(Complex),
    Extension(Extension),
    Resource(Box<Resource>),
}

impl Value {
    pub fn is_primitive(&self) -> bool {
        self.primitive_parts().is_some()
    }

    /// JSON value and element metadata of a primitive; `None` for complex
    /// values, extensions and resources.
    pub fn primitive_parts(&self) -> Option<(Option<JsonValue>, &Element)> {
        fn parts<T: FhirPrimitive>(p: &Primitive<T>) -> (Option<JsonValue>, &Element) {
            (p.value_json(), p.element())
        }
        match self {
            Value::Boolean(p) => Some(parts(p)),
            Value::Integer(p) => Some(parts(p)),
            Value::Decimal(p) => Some(parts(p)),
            Value::String(p) => Some(parts(p)),
            Value::Date(p) => Some(parts(p)),
            Value::DateTime(p) => Some(parts(p)),
            Value::Time(p) => Some(parts(p)),
            Value::Instant(p) => Some(parts(p)),
            Value::Complex(_) | Value::Extension(_) | Value::Resource(_) => None,
        }
    }

    /// Element metadata of primitives and complex values.
    pub fn element(&self) -> Option<&Element> {
        match self {
            Value::Complex(c) => Some(&c.element),
            Value::Extension(e) => Some(&e.element),
            other => other.primitive_parts().map(|(_, element)| element),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(p) => p.value().map(String::as_str),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(p) => p.value().copied(),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Value::Integer(p) => p.value().copied(),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Decimal(p) => p.value().copied(),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&Date> {
        match self {
            Value::Date(p) => p.value(),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<&DateTime> {
        match self {
            Value::DateTime(p) => p.value(),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<&Time> {
        match self {
            Value::Time(p) => p.value(),
            _ => None,
        }
    }

    pub fn as_instant(&self) -> Option<&Instant> {
        match self {
            Value::Instant(p) => p.value(),
            _ => None,
        }
    }

    pub fn as_complex(&self) -> Option<&Complex> {
        match self {
            Value::Complex(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_extension(&self) -> Option<&Extension> {
        match self {
            Value::Extension(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Value::Resource(r) => Some(r),
            _ => None,
        }
    }
}

/// One populated alternative of a choice field, tagged with the type suffix
/// it was read from (`valueQuantity` has suffix `Quantity`).
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub suffix: &'static str,
    pub value: Box<Value>,
}

impl Choice {
    pub fn new(suffix: &'static str, value: Value) -> Self {
        Self {
            suffix,
            value: Box::new(value),
        }
    }

    /// Wire key for a field name, e.g. `effective` + `Period`.
    pub fn key(&self, field: &str) -> String {
        format!("{field}{}", self.suffix)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Single(Value),
    List(Vec<Value>),
    Choice(Choice),
}

impl FieldValue {
    pub fn as_single(&self) -> Option<&Value> {
        match self {
            FieldValue::Single(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            FieldValue::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_choice(&self) -> Option<&Choice> {
        match self {
            FieldValue::Choice(c) => Some(c),
            _ => None,
        }
    }

    /// The single value or chosen alternative, or the first list item.
    pub fn first(&self) -> Option<&Value> {
        match self {
            FieldValue::Single(v) => Some(v),
            FieldValue::List(items) => items.first(),
            FieldValue::Choice(c) => Some(&c.value),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Single(value)
    }
}

impl From<Vec<Value>> for FieldValue {
    fn from(values: Vec<Value>) -> Self {
        FieldValue::List(values)
    }
}

impl From<Choice> for FieldValue {
    fn from(choice: Choice) -> Self {
        FieldValue::Choice(choice)
    }
}

fn lookup<'a>(fields: &'a [(&'static str, FieldValue)], name: &str) -> Option<&'a FieldValue> {
    fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
}

fn upsert(fields: &mut Vec<(&'static str, FieldValue)>, name: &'static str, value: FieldValue) {
    match fields.iter_mut().find(|(n, _)| *n == name) {
        Some(slot) => slot.1 = value,
        None => fields.push((name, value)),
    }
}

/// A complex datatype or backbone element instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Complex {
    pub type_name: &'static str,
    pub element: Element,
    pub fields: Vec<(&'static str, FieldValue)>,
}

impl Complex {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            element: Element::default(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: &'static str, value: impl Into<FieldValue>) -> Self {
        upsert(&mut self.fields, name, value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        lookup(&self.fields, name)
    }

    /// Shorthand for the first value of a field.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(FieldValue::first)
    }
}

/// A decoded resource. `resource_type` is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    resource_type: &'static str,
    pub fields: Vec<(&'static str, FieldValue)>,
}

impl Resource {
    pub fn new(resource_type: &'static str) -> Self {
        Self {
            resource_type,
            fields: Vec::new(),
        }
    }

    pub fn from_fields(resource_type: &'static str, fields: Vec<(&'static str, FieldValue)>) -> Self {
        Self {
            resource_type,
            fields,
        }
    }

    pub fn resource_type(&self) -> &'static str {
        self.resource_type
    }

    pub fn with_field(mut self, name: &'static str, value: impl Into<FieldValue>) -> Self {
        upsert(&mut self.fields, name, value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        lookup(&self.fields, name)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(FieldValue::first)
    }

    pub fn id(&self) -> Option<&str> {
        self.value("id").and_then(Value::as_str)
    }

    pub fn meta(&self) -> Option<&Complex> {
        self.value("meta").and_then(Value::as_complex)
    }

    pub fn text(&self) -> Option<&Complex> {
        self.value("text").and_then(Value::as_complex)
    }

    pub fn contained(&self) -> impl Iterator<Item = &Resource> {
        self.get("contained")
            .and_then(FieldValue::as_list)
            .unwrap_or(&[])
            .iter()
            .filter_map(Value::as_resource)
    }

    /// Finds a contained resource by a local `#id` reference.
    pub fn find_contained(&self, reference: &str) -> Option<&Resource> {
        let id = reference.strip_prefix('#')?;
        self.contained().find(|r| r.id() == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string(s: &str) -> Value {
        Value::String(Primitive::new(s.to_string()))
    }

    #[test]
    fn test_resource_accessors() {
        let med = Resource::new("Medication").with_field("id", string("med1"));
        let patient = Resource::new("Patient")
            .with_field("id", string("example"))
            .with_field(
                "text",
                Value::Complex(Complex::new("Narrative").with_field("status", string("generated"))),
            )
            .with_field("contained", vec![Value::Resource(Box::new(med))]);

        assert_eq!(patient.resource_type(), "Patient");
        assert_eq!(patient.id(), Some("example"));
        assert_eq!(
            patient.text().and_then(|t| t.value("status")).and_then(Value::as_str),
            Some("generated")
        );
        assert_eq!(patient.contained().count(), 1);
        assert!(patient.find_contained("#med1").is_some());
        assert!(patient.find_contained("med1").is_none());
        assert!(patient.meta().is_none());
    }

    #[test]
    fn test_with_field_replaces_existing() {
        let c = Complex::new("Coding")
            .with_field("code", string("a"))
            .with_field("code", string("b"));
        assert_eq!(c.fields.len(), 1);
        assert_eq!(c.value("code").and_then(Value::as_str), Some("b"));
    }

    #[test]
    fn test_choice_key() {
        let choice = Choice::new("Boolean", Value::Boolean(Primitive::new(true)));
        assert_eq!(choice.key("deceased"), "deceasedBoolean");
        assert_eq!(FieldValue::from(choice).first().and_then(Value::as_bool), Some(true));
    }

    #[test]
    fn test_primitive_parts() {
        let v = Value::Integer(Primitive::new(3).with_id("n"));
        let (json, element) = v.primitive_parts().unwrap();
        assert_eq!(json, Some(serde_json::json!(3)));
        assert_eq!(element.id.as_deref(), Some("n"));
        assert!(Value::Complex(Complex::new("Period")).primitive_parts().is_none());
    }
}
