//! JSON to resource graph
//!
//! The decoder walks the fields a shape declares, in declaration order, and
//! pulls the matching keys out of the JSON object. Keys left over once the
//! shape is exhausted are undeclared and handled per [`UnknownFieldPolicy`].

use crate::choice::{self, Resolved};
use crate::error::{Error, Result};
use crate::options::{FormatOptions, UnknownFieldPolicy};
use crate::parallel;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashSet;
use tessera_context::{
    ChoiceOption, CodeSet, FieldDescriptor, FieldKind, FieldType, ShapeDescriptor, ShapeRegistry,
};
use tessera_models::{
    Choice, Complex, Date, DateTime, Decimal, Element, Extension, FhirPrimitive, FieldValue,
    Instant, Primitive, PrimitiveType, Resource, Time, Value,
};

/// A JSON object plus the set of keys already read from it.
struct ObjectReader<'a> {
    object: &'a Map<String, JsonValue>,
    consumed: HashSet<String>,
}

impl<'a> ObjectReader<'a> {
    fn new(object: &'a Map<String, JsonValue>) -> Self {
        Self {
            object,
            consumed: HashSet::new(),
        }
    }

    fn take(&mut self, key: &str) -> Option<&'a JsonValue> {
        let value = self.object.get(key)?;
        self.consumed.insert(key.to_string());
        Some(value)
    }

    fn unconsumed(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.object
            .keys()
            .filter(|key| !self.consumed.contains(key.as_str()))
            .map(String::as_str)
    }
}

fn child(path: &str, name: &str) -> String {
    format!("{path}.{name}")
}

fn index(path: &str, i: usize) -> String {
    format!("{path}[{i}]")
}

/// `Patient.name[0].given` -> `Patient.name[0]._given`
fn metadata_path(path: &str) -> String {
    match path.rfind('.') {
        Some(pos) => format!("{}._{}", &path[..pos], &path[pos + 1..]),
        None => format!("_{path}"),
    }
}

fn value_set(ty: FieldType) -> Option<&'static CodeSet> {
    match ty {
        FieldType::Code(codes) => Some(codes),
        _ => None,
    }
}

fn leaf<T: FhirPrimitive>(
    kind: PrimitiveType,
    json: Option<&JsonValue>,
    element: Element,
) -> tessera_models::Result<Primitive<T>> {
    let value = json.map(|j| T::from_json(kind, j)).transpose()?;
    Primitive::from_parts(value, element)
}

pub(crate) struct Decoder<'r> {
    registry: &'r dyn ShapeRegistry,
    options: &'r FormatOptions,
}

impl<'r> Decoder<'r> {
    pub(crate) fn new(registry: &'r dyn ShapeRegistry, options: &'r FormatOptions) -> Self {
        Self { registry, options }
    }

    /// Decodes a resource. `at` is the location of a nested resource; the
    /// root resource is addressed by its type name.
    pub(crate) fn resource(
        &self,
        json: &JsonValue,
        expected: Option<&str>,
        at: Option<&str>,
    ) -> Result<Resource> {
        let location = at.unwrap_or("$");
        let object = json
            .as_object()
            .ok_or_else(|| Error::ExpectedObject(location.to_string()))?;
        let mut reader = ObjectReader::new(object);

        let resource_type = match reader.take("resourceType") {
            Some(JsonValue::String(name)) => name.as_str(),
            Some(_) => {
                return Err(Error::UnexpectedType {
                    path: child(location, "resourceType"),
                    expected: "a string",
                })
            }
            None => return Err(Error::MissingResourceType(location.to_string())),
        };
        let shape = self
            .registry
            .lookup_resource(resource_type)
            .ok_or_else(|| Error::UnknownResourceType {
                resource_type: resource_type.to_string(),
                version: self.registry.version(),
            })?;
        if let Some(expected) = expected {
            if expected != shape.name {
                return Err(Error::ResourceTypeMismatch {
                    expected: expected.to_string(),
                    found: shape.name.to_string(),
                });
            }
        }

        let path = match at {
            Some(at) => {
                tracing::trace!(
                    path = at,
                    resource_type = shape.name,
                    "decoding nested resource"
                );
                at.to_string()
            }
            None => shape.name.to_string(),
        };
        let fields = self.fields(shape, &mut reader, &path)?;
        self.finish(&reader, &path)?;
        Ok(Resource::from_fields(shape.name, fields))
    }

    fn fields(
        &self,
        shape: &'static ShapeDescriptor,
        reader: &mut ObjectReader<'_>,
        path: &str,
    ) -> Result<Vec<(&'static str, FieldValue)>> {
        let mut fields = Vec::new();
        for descriptor in shape.all_fields() {
            let decoded = match descriptor.kind {
                FieldKind::Single(ty) => self.plain_field(descriptor, ty, reader, path)?,
                FieldKind::Choice(options) => {
                    self.choice_field(descriptor, options, reader, path)?
                }
            };
            if let Some(value) = decoded {
                fields.push((descriptor.name, value));
            }
        }
        Ok(fields)
    }

    fn plain_field(
        &self,
        descriptor: &FieldDescriptor,
        ty: FieldType,
        reader: &mut ObjectReader<'_>,
        path: &str,
    ) -> Result<Option<FieldValue>> {
        let field_path = child(path, descriptor.name);
        let value = reader.take(descriptor.name);
        let metadata = match ty.primitive() {
            Some(_) => reader.take(&format!("_{}", descriptor.name)),
            None => None,
        };
        if value.is_none() && metadata.is_none() {
            return if descriptor.required {
                Err(Error::MissingField(field_path))
            } else {
                Ok(None)
            };
        }

        let decoded = if descriptor.repeated {
            FieldValue::List(self.list(ty, value, metadata, &field_path)?)
        } else {
            FieldValue::Single(self.single(ty, value, metadata, &field_path)?)
        };
        Ok(Some(decoded))
    }

    fn choice_field(
        &self,
        descriptor: &FieldDescriptor,
        options: &'static [ChoiceOption],
        reader: &mut ObjectReader<'_>,
        path: &str,
    ) -> Result<Option<FieldValue>> {
        match choice::resolve(reader.object, descriptor.name, options, path)? {
            Some(resolved) => Ok(Some(FieldValue::Choice(
                self.choice_value(&resolved, reader, path)?,
            ))),
            None if descriptor.required => Err(Error::MissingField(format!(
                "{path}.{}[x]",
                descriptor.name
            ))),
            None => Ok(None),
        }
    }

    fn choice_value(
        &self,
        resolved: &Resolved,
        reader: &mut ObjectReader<'_>,
        path: &str,
    ) -> Result<Choice> {
        let ty = resolved.option.field_type;
        let value = reader.take(&resolved.key);
        let metadata = match ty.primitive() {
            Some(_) => reader.take(&format!("_{}", resolved.key)),
            None => None,
        };
        let decoded = self.single(ty, value, metadata, &child(path, &resolved.key))?;
        Ok(Choice::new(resolved.option.suffix, decoded))
    }

    fn single(
        &self,
        ty: FieldType,
        value: Option<&JsonValue>,
        metadata: Option<&JsonValue>,
        path: &str,
    ) -> Result<Value> {
        match value {
            Some(JsonValue::Null) => return Err(Error::Null(path.to_string())),
            Some(JsonValue::Array(_)) => {
                return Err(Error::UnexpectedType {
                    path: path.to_string(),
                    expected: "a single value, not an array",
                })
            }
            _ => {}
        }

        if let Some(kind) = ty.primitive() {
            let element = match metadata {
                None => Element::default(),
                Some(JsonValue::Object(map)) => self.metadata(map, &metadata_path(path))?,
                Some(JsonValue::Null) => return Err(Error::Null(metadata_path(path))),
                Some(_) => {
                    return Err(Error::UnexpectedType {
                        path: metadata_path(path),
                        expected: "an object",
                    })
                }
            };
            return self.primitive(kind, value_set(ty), value, element, path);
        }

        match value {
            Some(json) => self.composite(ty, json, path),
            None => Err(Error::MissingField(path.to_string())),
        }
    }

    fn list(
        &self,
        ty: FieldType,
        value: Option<&JsonValue>,
        metadata: Option<&JsonValue>,
        path: &str,
    ) -> Result<Vec<Value>> {
        if let Some(kind) = ty.primitive() {
            let meta_path = metadata_path(path);
            let slots = parallel::merge(value, metadata, path, &meta_path)?;
            return slots
                .into_iter()
                .enumerate()
                .map(|(i, slot)| {
                    let element = match slot.metadata {
                        Some(map) => self.metadata(map, &index(&meta_path, i))?,
                        None => Element::default(),
                    };
                    self.primitive(kind, value_set(ty), slot.value, element, &index(path, i))
                })
                .collect();
        }

        let Some(json) = value else {
            return Err(Error::MissingField(path.to_string()));
        };
        let items = json.as_array().ok_or_else(|| Error::UnexpectedType {
            path: path.to_string(),
            expected: "an array",
        })?;
        if items.is_empty() {
            return Err(Error::EmptyArray(path.to_string()));
        }
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let item_path = index(path, i);
                if item.is_null() {
                    return Err(Error::Null(item_path));
                }
                self.composite(ty, item, &item_path)
            })
            .collect()
    }

    fn composite(&self, ty: FieldType, json: &JsonValue, path: &str) -> Result<Value> {
        match ty {
            FieldType::Complex(name) => Ok(Value::Complex(self.complex(name, json, path)?)),
            FieldType::Resource => Ok(Value::Resource(Box::new(
                self.resource(json, None, Some(path))?,
            ))),
            FieldType::Extension => Ok(Value::Extension(self.extension(json, path)?)),
            FieldType::Primitive(kind) => {
                self.primitive(kind, None, Some(json), Element::default(), path)
            }
            FieldType::Code(codes) => self.primitive(
                PrimitiveType::Code,
                Some(codes),
                Some(json),
                Element::default(),
                path,
            ),
        }
    }

    fn complex(&self, name: &str, json: &JsonValue, path: &str) -> Result<Complex> {
        let shape = self
            .registry
            .lookup(name)
            .ok_or_else(|| Error::UnknownShape {
                name: name.to_string(),
                version: self.registry.version(),
            })?;
        let object = json
            .as_object()
            .ok_or_else(|| Error::ExpectedObject(path.to_string()))?;
        let mut reader = ObjectReader::new(object);

        let element = self.element(&mut reader, path)?;
        let fields = self.fields(shape, &mut reader, path)?;
        self.finish(&reader, path)?;
        if element.is_empty() && fields.is_empty() {
            return Err(Error::EmptyElement(path.to_string()));
        }
        Ok(Complex {
            type_name: shape.name,
            element,
            fields,
        })
    }

    fn extension(&self, json: &JsonValue, path: &str) -> Result<Extension> {
        let object = json
            .as_object()
            .ok_or_else(|| Error::ExpectedObject(path.to_string()))?;
        let mut reader = ObjectReader::new(object);

        let url = match reader.take("url") {
            Some(JsonValue::String(url)) => url.clone(),
            Some(JsonValue::Null) => return Err(Error::Null(child(path, "url"))),
            Some(_) => {
                return Err(Error::UnexpectedType {
                    path: child(path, "url"),
                    expected: "a string",
                })
            }
            None => return Err(Error::MissingField(child(path, "url"))),
        };
        let element = self.element(&mut reader, path)?;
        let options = self.registry.extension_value_types();
        let value = match choice::resolve(object, "value", options, path)? {
            Some(resolved) => Some(self.choice_value(&resolved, &mut reader, path)?),
            None => None,
        };
        self.finish(&reader, path)?;

        if value.is_none() && element.extension.is_empty() {
            return Err(Error::EmptyElement(path.to_string()));
        }
        Extension::from_parts(element, url, value).map_err(|source| Error::Validation {
            path: path.to_string(),
            source,
        })
    }

    fn extensions(&self, json: &JsonValue, path: &str) -> Result<Vec<Extension>> {
        let items = json.as_array().ok_or_else(|| Error::UnexpectedType {
            path: path.to_string(),
            expected: "an array",
        })?;
        if items.is_empty() {
            return Err(Error::EmptyArray(path.to_string()));
        }
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let item_path = index(path, i);
                if item.is_null() {
                    return Err(Error::Null(item_path));
                }
                self.extension(item, &item_path)
            })
            .collect()
    }

    /// Reads the `id` and `extension` keys every element may carry.
    fn element(&self, reader: &mut ObjectReader<'_>, path: &str) -> Result<Element> {
        let id = match reader.take("id") {
            Some(json) => Some(self.element_id(json, &child(path, "id"))?),
            None => None,
        };
        let extension = match reader.take("extension") {
            Some(json) => self.extensions(json, &child(path, "extension"))?,
            None => Vec::new(),
        };
        Ok(Element { id, extension })
    }

    /// Decodes a `_field` metadata object, which must carry `id` or `extension`.
    fn metadata(&self, object: &Map<String, JsonValue>, path: &str) -> Result<Element> {
        let mut reader = ObjectReader::new(object);
        let element = self.element(&mut reader, path)?;
        self.finish(&reader, path)?;
        if element.is_empty() {
            return Err(Error::EmptyElement(path.to_string()));
        }
        Ok(element)
    }

    fn element_id(&self, json: &JsonValue, path: &str) -> Result<String> {
        if json.is_null() {
            return Err(Error::Null(path.to_string()));
        }
        String::from_json(PrimitiveType::String, json).map_err(|source| Error::Validation {
            path: path.to_string(),
            source,
        })
    }

    fn primitive(
        &self,
        kind: PrimitiveType,
        codes: Option<&'static CodeSet>,
        json: Option<&JsonValue>,
        element: Element,
        path: &str,
    ) -> Result<Value> {
        if let (Some(codes), Some(JsonValue::String(code))) = (codes, json) {
            if !codes.contains(code) {
                return Err(Error::InvalidCode {
                    path: path.to_string(),
                    code: code.clone(),
                    value_set: codes.name,
                });
            }
        }

        let value = match kind {
            PrimitiveType::Boolean => leaf::<bool>(kind, json, element).map(Value::Boolean),
            PrimitiveType::Integer | PrimitiveType::PositiveInt | PrimitiveType::UnsignedInt => {
                leaf::<i32>(kind, json, element).map(Value::Integer)
            }
            PrimitiveType::Decimal => leaf::<Decimal>(kind, json, element).map(Value::Decimal),
            PrimitiveType::Date => leaf::<Date>(kind, json, element).map(Value::Date),
            PrimitiveType::DateTime => leaf::<DateTime>(kind, json, element).map(Value::DateTime),
            PrimitiveType::Time => leaf::<Time>(kind, json, element).map(Value::Time),
            PrimitiveType::Instant => leaf::<Instant>(kind, json, element).map(Value::Instant),
            PrimitiveType::String
            | PrimitiveType::Code
            | PrimitiveType::Id
            | PrimitiveType::Uri
            | PrimitiveType::Url
            | PrimitiveType::Canonical
            | PrimitiveType::Oid
            | PrimitiveType::Uuid
            | PrimitiveType::Markdown
            | PrimitiveType::Base64Binary
            | PrimitiveType::Xhtml => leaf::<String>(kind, json, element).map(Value::String),
        };
        value.map_err(|source| Error::Validation {
            path: path.to_string(),
            source,
        })
    }

    fn finish(&self, reader: &ObjectReader<'_>, path: &str) -> Result<()> {
        for key in reader.unconsumed() {
            match self.options.unknown_fields {
                UnknownFieldPolicy::Reject => return Err(Error::UnknownField(child(path, key))),
                UnknownFieldPolicy::Ignore => {
                    tracing::trace!(path, key, "ignoring undeclared field");
                }
            }
        }
        Ok(())
    }
}
