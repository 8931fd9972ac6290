//! R4 datatypes

use super::codes::*;
use crate::shape::types::*;
use crate::shape::{
    choice, field, option, ChoiceOption, FieldDescriptor, FieldType, ShapeDescriptor, ShapeKind,
};
use crate::shape_descriptor;

const fn quantity_like(name: &'static str) -> ShapeDescriptor {
    ShapeDescriptor {
        name,
        kind: ShapeKind::Datatype,
        base: &[],
        fields: QUANTITY_FIELDS,
    }
}

pub static META: ShapeDescriptor = shape_descriptor!(Datatype "Meta" {
    field("versionId", ID),
    field("lastUpdated", INSTANT),
    field("source", URI),
    field("profile", CANONICAL).repeated(),
    field("security", complex("Coding")).repeated(),
    field("tag", complex("Coding")).repeated(),
});

pub static NARRATIVE: ShapeDescriptor = shape_descriptor!(Datatype "Narrative" {
    field("status", FieldType::Code(&NARRATIVE_STATUS)).required(),
    field("div", XHTML).required(),
});

pub static CODING: ShapeDescriptor = shape_descriptor!(Datatype "Coding" {
    field("system", URI),
    field("version", STRING),
    field("code", CODE),
    field("display", STRING),
    field("userSelected", BOOLEAN),
});

pub static CODEABLE_CONCEPT: ShapeDescriptor = shape_descriptor!(Datatype "CodeableConcept" {
    field("coding", complex("Coding")).repeated(),
    field("text", STRING),
});

pub static IDENTIFIER: ShapeDescriptor = shape_descriptor!(Datatype "Identifier" {
    field("use", FieldType::Code(&IDENTIFIER_USE)),
    field("type", complex("CodeableConcept")),
    field("system", URI),
    field("value", STRING),
    field("period", complex("Period")),
    field("assigner", complex("Reference")),
});

pub static REFERENCE: ShapeDescriptor = shape_descriptor!(Datatype "Reference" {
    field("reference", STRING),
    field("type", URI),
    field("identifier", complex("Identifier")),
    field("display", STRING),
});

pub static PERIOD: ShapeDescriptor = shape_descriptor!(Datatype "Period" {
    field("start", DATE_TIME),
    field("end", DATE_TIME),
});

const QUANTITY_FIELDS: &[FieldDescriptor] = &[
    field("value", DECIMAL),
    field("comparator", FieldType::Code(&QUANTITY_COMPARATOR)),
    field("unit", STRING),
    field("system", URI),
    field("code", CODE),
];

pub static QUANTITY: ShapeDescriptor = quantity_like("Quantity");
pub static SIMPLE_QUANTITY: ShapeDescriptor = quantity_like("SimpleQuantity");
pub static AGE: ShapeDescriptor = quantity_like("Age");
pub static COUNT: ShapeDescriptor = quantity_like("Count");
pub static DISTANCE: ShapeDescriptor = quantity_like("Distance");
pub static DURATION: ShapeDescriptor = quantity_like("Duration");

pub static MONEY: ShapeDescriptor = shape_descriptor!(Datatype "Money" {
    field("value", DECIMAL),
    field("currency", CODE),
});

pub static RANGE: ShapeDescriptor = shape_descriptor!(Datatype "Range" {
    field("low", complex("SimpleQuantity")),
    field("high", complex("SimpleQuantity")),
});

pub static RATIO: ShapeDescriptor = shape_descriptor!(Datatype "Ratio" {
    field("numerator", complex("Quantity")),
    field("denominator", complex("Quantity")),
});

pub static HUMAN_NAME: ShapeDescriptor = shape_descriptor!(Datatype "HumanName" {
    field("use", FieldType::Code(&NAME_USE)),
    field("text", STRING),
    field("family", STRING),
    field("given", STRING).repeated(),
    field("prefix", STRING).repeated(),
    field("suffix", STRING).repeated(),
    field("period", complex("Period")),
});

pub static CONTACT_POINT: ShapeDescriptor = shape_descriptor!(Datatype "ContactPoint" {
    field("system", FieldType::Code(&CONTACT_POINT_SYSTEM)),
    field("value", STRING),
    field("use", FieldType::Code(&CONTACT_POINT_USE)),
    field("rank", POSITIVE_INT),
    field("period", complex("Period")),
});

pub static ADDRESS: ShapeDescriptor = shape_descriptor!(Datatype "Address" {
    field("use", FieldType::Code(&ADDRESS_USE)),
    field("type", FieldType::Code(&ADDRESS_TYPE)),
    field("text", STRING),
    field("line", STRING).repeated(),
    field("city", STRING),
    field("district", STRING),
    field("state", STRING),
    field("postalCode", STRING),
    field("country", STRING),
    field("period", complex("Period")),
});

const ANNOTATION_AUTHOR: &[ChoiceOption] = &[
    option("Reference", complex("Reference")),
    option("String", STRING),
];

pub static ANNOTATION: ShapeDescriptor = shape_descriptor!(Datatype "Annotation" {
    choice("author", ANNOTATION_AUTHOR),
    field("time", DATE_TIME),
    field("text", STRING).required(),
});

pub static ATTACHMENT: ShapeDescriptor = shape_descriptor!(Datatype "Attachment" {
    field("contentType", CODE),
    field("language", CODE),
    field("data", BASE64_BINARY),
    field("url", URL),
    field("size", UNSIGNED_INT),
    field("hash", BASE64_BINARY),
    field("title", STRING),
    field("creation", DATE_TIME),
});

/// `Extension.value[x]` alternatives.
pub const EXTENSION_VALUES: &[ChoiceOption] = &[
    option("Base64Binary", BASE64_BINARY),
    option("Boolean", BOOLEAN),
    option("Canonical", CANONICAL),
    option("Code", CODE),
    option("Date", DATE),
    option("DateTime", DATE_TIME),
    option("Decimal", DECIMAL),
    option("Id", ID),
    option("Instant", INSTANT),
    option("Integer", INTEGER),
    option("Markdown", MARKDOWN),
    option("Oid", OID),
    option("PositiveInt", POSITIVE_INT),
    option("String", STRING),
    option("Time", TIME),
    option("UnsignedInt", UNSIGNED_INT),
    option("Uri", URI),
    option("Url", URL),
    option("Uuid", UUID),
    option("Address", complex("Address")),
    option("Age", complex("Age")),
    option("Annotation", complex("Annotation")),
    option("Attachment", complex("Attachment")),
    option("CodeableConcept", complex("CodeableConcept")),
    option("Coding", complex("Coding")),
    option("ContactPoint", complex("ContactPoint")),
    option("Count", complex("Count")),
    option("Distance", complex("Distance")),
    option("Duration", complex("Duration")),
    option("HumanName", complex("HumanName")),
    option("Identifier", complex("Identifier")),
    option("Money", complex("Money")),
    option("Period", complex("Period")),
    option("Quantity", complex("Quantity")),
    option("Range", complex("Range")),
    option("Ratio", complex("Ratio")),
    option("Reference", complex("Reference")),
    option("Meta", complex("Meta")),
];
