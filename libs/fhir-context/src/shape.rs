//! Shape descriptors
//!
//! A shape descriptor is the structural contract for one resource, datatype
//! or backbone element: its fields in declaration order, each with a wire
//! representation (single, list or choice) and a value type. Descriptors are
//! plain `'static` data so a registry can be built at compile time and shared
//! freely between threads.

use tessera_models::PrimitiveType;

/// A required value set: a bound `code` field must hold one of `codes`.
#[derive(Debug)]
pub struct CodeSet {
    pub name: &'static str,
    pub codes: phf::Set<&'static str>,
}

impl CodeSet {
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }
}

/// The value type of a field or choice alternative.
#[derive(Debug, Clone, Copy)]
pub enum FieldType {
    Primitive(PrimitiveType),
    /// A `code` restricted to a required value set.
    Code(&'static CodeSet),
    /// A datatype or backbone element, by registry name.
    Complex(&'static str),
    /// Any resource, dispatched on its own `resourceType`.
    Resource,
    Extension,
}

impl FieldType {
    /// The primitive type when values of this type are JSON leaves.
    pub fn primitive(&self) -> Option<PrimitiveType> {
        match self {
            FieldType::Primitive(ty) => Some(*ty),
            FieldType::Code(_) => Some(PrimitiveType::Code),
            _ => None,
        }
    }
}

/// One permitted alternative of a choice field: `value` + `Quantity`.
#[derive(Debug, Clone, Copy)]
pub struct ChoiceOption {
    pub suffix: &'static str,
    pub field_type: FieldType,
}

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Single(FieldType),
    Choice(&'static [ChoiceOption]),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub repeated: bool,
}

impl FieldDescriptor {
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind, FieldKind::Choice(_))
    }
}

pub const fn field(name: &'static str, field_type: FieldType) -> FieldDescriptor {
    FieldDescriptor {
        name,
        kind: FieldKind::Single(field_type),
        required: false,
        repeated: false,
    }
}

pub const fn choice(name: &'static str, options: &'static [ChoiceOption]) -> FieldDescriptor {
    FieldDescriptor {
        name,
        kind: FieldKind::Choice(options),
        required: false,
        repeated: false,
    }
}

pub const fn option(suffix: &'static str, field_type: FieldType) -> ChoiceOption {
    ChoiceOption { suffix, field_type }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Resource,
    Datatype,
    Backbone,
}

#[derive(Debug)]
pub struct ShapeDescriptor {
    pub name: &'static str,
    pub kind: ShapeKind,
    /// Inherited fields (Resource, DomainResource, BackboneElement).
    pub base: &'static [FieldDescriptor],
    pub fields: &'static [FieldDescriptor],
}

impl ShapeDescriptor {
    /// All fields in declaration order, inherited ones first.
    pub fn all_fields(&self) -> impl Iterator<Item = &'static FieldDescriptor> {
        self.base.iter().chain(self.fields.iter())
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.all_fields().find(|f| f.name == name)
    }

    pub fn is_resource(&self) -> bool {
        self.kind == ShapeKind::Resource
    }
}

/// Builds a `ShapeDescriptor` literal for a `static` shape table.
///
/// ```rust
/// use tessera_context::shape::types::*;
/// use tessera_context::shape::{field, ShapeDescriptor};
///
/// static PERIOD: ShapeDescriptor = tessera_context::shape_descriptor!(
///     Datatype "Period" { field("start", DATE_TIME), field("end", DATE_TIME) }
/// );
/// assert_eq!(PERIOD.fields.len(), 2);
/// ```
#[macro_export]
macro_rules! shape_descriptor {
    (Datatype $name:literal { $($field:expr),* $(,)? }) => {
        $crate::shape::ShapeDescriptor {
            name: $name,
            kind: $crate::shape::ShapeKind::Datatype,
            base: &[],
            fields: &[$($field),*],
        }
    };
    (Backbone $name:literal { $($field:expr),* $(,)? }) => {
        $crate::shape::ShapeDescriptor {
            name: $name,
            kind: $crate::shape::ShapeKind::Backbone,
            base: $crate::shape::BACKBONE_BASE,
            fields: &[$($field),*],
        }
    };
    (Resource $name:literal : $base:expr, { $($field:expr),* $(,)? }) => {
        $crate::shape::ShapeDescriptor {
            name: $name,
            kind: $crate::shape::ShapeKind::Resource,
            base: $base,
            fields: &[$($field),*],
        }
    };
}

/// Shorthands for writing shape tables.
pub mod types {
    use super::FieldType;
    use tessera_models::PrimitiveType;

    pub const BOOLEAN: FieldType = FieldType::Primitive(PrimitiveType::Boolean);
    pub const INTEGER: FieldType = FieldType::Primitive(PrimitiveType::Integer);
    pub const POSITIVE_INT: FieldType = FieldType::Primitive(PrimitiveType::PositiveInt);
    pub const UNSIGNED_INT: FieldType = FieldType::Primitive(PrimitiveType::UnsignedInt);
    pub const DECIMAL: FieldType = FieldType::Primitive(PrimitiveType::Decimal);
    pub const STRING: FieldType = FieldType::Primitive(PrimitiveType::String);
    pub const CODE: FieldType = FieldType::Primitive(PrimitiveType::Code);
    pub const ID: FieldType = FieldType::Primitive(PrimitiveType::Id);
    pub const URI: FieldType = FieldType::Primitive(PrimitiveType::Uri);
    pub const URL: FieldType = FieldType::Primitive(PrimitiveType::Url);
    pub const CANONICAL: FieldType = FieldType::Primitive(PrimitiveType::Canonical);
    pub const OID: FieldType = FieldType::Primitive(PrimitiveType::Oid);
    pub const UUID: FieldType = FieldType::Primitive(PrimitiveType::Uuid);
    pub const MARKDOWN: FieldType = FieldType::Primitive(PrimitiveType::Markdown);
    pub const BASE64_BINARY: FieldType = FieldType::Primitive(PrimitiveType::Base64Binary);
    pub const XHTML: FieldType = FieldType::Primitive(PrimitiveType::Xhtml);
    pub const DATE: FieldType = FieldType::Primitive(PrimitiveType::Date);
    pub const DATE_TIME: FieldType = FieldType::Primitive(PrimitiveType::DateTime);
    pub const TIME: FieldType = FieldType::Primitive(PrimitiveType::Time);
    pub const INSTANT: FieldType = FieldType::Primitive(PrimitiveType::Instant);
    pub const RESOURCE: FieldType = FieldType::Resource;
    pub const EXTENSION: FieldType = FieldType::Extension;

    pub const fn complex(name: &'static str) -> FieldType {
        FieldType::Complex(name)
    }
}

use types::*;

/// Fields every resource inherits from `Resource`.
pub const RESOURCE_BASE: &[FieldDescriptor] = &[
    field("id", ID),
    field("meta", complex("Meta")),
    field("implicitRules", URI),
    field("language", CODE),
];

/// Fields every domain resource inherits from `Resource` and `DomainResource`.
pub const DOMAIN_RESOURCE_BASE: &[FieldDescriptor] = &[
    field("id", ID),
    field("meta", complex("Meta")),
    field("implicitRules", URI),
    field("language", CODE),
    field("text", complex("Narrative")),
    field("contained", RESOURCE).repeated(),
    field("extension", EXTENSION).repeated(),
    field("modifierExtension", EXTENSION).repeated(),
];

/// Fields every backbone element carries besides `id` and `extension`.
pub const BACKBONE_BASE: &[FieldDescriptor] = &[field("modifierExtension", EXTENSION).repeated()];

#[cfg(test)]
mod tests {
    use super::*;

    const OPTIONS: &[ChoiceOption] = &[option("Boolean", BOOLEAN), option("Integer", INTEGER)];

    static SAMPLE: ShapeDescriptor = ShapeDescriptor {
        name: "Sample",
        kind: ShapeKind::Resource,
        base: RESOURCE_BASE,
        fields: &[
            field("status", CODE).required(),
            field("note", STRING).repeated(),
            choice("multipleBirth", OPTIONS),
        ],
    };

    #[test]
    fn test_builders() {
        let f = field("name", STRING).required().repeated();
        assert!(f.required && f.repeated);
        assert!(!f.is_choice());
        assert!(choice("value", OPTIONS).is_choice());
    }

    #[test]
    fn test_all_fields_keeps_declaration_order() {
        let names: Vec<_> = SAMPLE.all_fields().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec!["id", "meta", "implicitRules", "language", "status", "note", "multipleBirth"]
        );
        assert!(SAMPLE.field("status").is_some_and(|f| f.required));
        assert!(SAMPLE.field("missing").is_none());
        assert!(SAMPLE.is_resource());
    }

    #[test]
    fn test_primitive_of_field_type() {
        assert_eq!(DATE.primitive(), Some(PrimitiveType::Date));
        assert_eq!(complex("Period").primitive(), None);
        assert_eq!(EXTENSION.primitive(), None);
    }
}
