//! R4 resources and their backbone elements

use super::codes::*;
use crate::shape::types::*;
use crate::shape::{
    choice, field, option, ChoiceOption, FieldType, ShapeDescriptor, DOMAIN_RESOURCE_BASE,
    RESOURCE_BASE,
};
use crate::shape_descriptor;

const DECEASED: &[ChoiceOption] = &[option("Boolean", BOOLEAN), option("DateTime", DATE_TIME)];

const MULTIPLE_BIRTH: &[ChoiceOption] = &[option("Boolean", BOOLEAN), option("Integer", INTEGER)];

pub static PATIENT: ShapeDescriptor = shape_descriptor!(Resource "Patient": DOMAIN_RESOURCE_BASE, {
    field("identifier", complex("Identifier")).repeated(),
    field("active", BOOLEAN),
    field("name", complex("HumanName")).repeated(),
    field("telecom", complex("ContactPoint")).repeated(),
    field("gender", FieldType::Code(&ADMINISTRATIVE_GENDER)),
    field("birthDate", DATE),
    choice("deceased", DECEASED),
    field("address", complex("Address")).repeated(),
    field("maritalStatus", complex("CodeableConcept")),
    choice("multipleBirth", MULTIPLE_BIRTH),
    field("photo", complex("Attachment")).repeated(),
    field("contact", complex("Patient.contact")).repeated(),
    field("communication", complex("Patient.communication")).repeated(),
    field("generalPractitioner", complex("Reference")).repeated(),
    field("managingOrganization", complex("Reference")),
    field("link", complex("Patient.link")).repeated(),
});

pub static PATIENT_CONTACT: ShapeDescriptor = shape_descriptor!(Backbone "Patient.contact" {
    field("relationship", complex("CodeableConcept")).repeated(),
    field("name", complex("HumanName")),
    field("telecom", complex("ContactPoint")).repeated(),
    field("address", complex("Address")),
    field("gender", FieldType::Code(&ADMINISTRATIVE_GENDER)),
    field("organization", complex("Reference")),
    field("period", complex("Period")),
});

pub static PATIENT_COMMUNICATION: ShapeDescriptor = shape_descriptor!(Backbone "Patient.communication" {
    field("language", complex("CodeableConcept")).required(),
    field("preferred", BOOLEAN),
});

pub static PATIENT_LINK: ShapeDescriptor = shape_descriptor!(Backbone "Patient.link" {
    field("other", complex("Reference")).required(),
    field("type", FieldType::Code(&LINK_TYPE)).required(),
});

const EFFECTIVE: &[ChoiceOption] = &[
    option("DateTime", DATE_TIME),
    option("Period", complex("Period")),
];

const OBSERVATION_EFFECTIVE: &[ChoiceOption] = &[
    option("DateTime", DATE_TIME),
    option("Period", complex("Period")),
    option("Instant", INSTANT),
];

const OBSERVATION_VALUE: &[ChoiceOption] = &[
    option("Quantity", complex("Quantity")),
    option("CodeableConcept", complex("CodeableConcept")),
    option("String", STRING),
    option("Boolean", BOOLEAN),
    option("Integer", INTEGER),
    option("Range", complex("Range")),
    option("Ratio", complex("Ratio")),
    option("Time", TIME),
    option("DateTime", DATE_TIME),
    option("Period", complex("Period")),
];

pub static OBSERVATION: ShapeDescriptor = shape_descriptor!(Resource "Observation": DOMAIN_RESOURCE_BASE, {
    field("identifier", complex("Identifier")).repeated(),
    field("basedOn", complex("Reference")).repeated(),
    field("partOf", complex("Reference")).repeated(),
    field("status", FieldType::Code(&OBSERVATION_STATUS)).required(),
    field("category", complex("CodeableConcept")).repeated(),
    field("code", complex("CodeableConcept")).required(),
    field("subject", complex("Reference")),
    field("focus", complex("Reference")).repeated(),
    field("encounter", complex("Reference")),
    choice("effective", OBSERVATION_EFFECTIVE),
    field("issued", INSTANT),
    field("performer", complex("Reference")).repeated(),
    choice("value", OBSERVATION_VALUE),
    field("dataAbsentReason", complex("CodeableConcept")),
    field("interpretation", complex("CodeableConcept")).repeated(),
    field("note", complex("Annotation")).repeated(),
    field("bodySite", complex("CodeableConcept")),
    field("method", complex("CodeableConcept")),
    field("specimen", complex("Reference")),
    field("device", complex("Reference")),
    field("referenceRange", complex("Observation.referenceRange")).repeated(),
    field("hasMember", complex("Reference")).repeated(),
    field("derivedFrom", complex("Reference")).repeated(),
    field("component", complex("Observation.component")).repeated(),
});

pub static OBSERVATION_REFERENCE_RANGE: ShapeDescriptor = shape_descriptor!(Backbone "Observation.referenceRange" {
    field("low", complex("SimpleQuantity")),
    field("high", complex("SimpleQuantity")),
    field("type", complex("CodeableConcept")),
    field("appliesTo", complex("CodeableConcept")).repeated(),
    field("age", complex("Range")),
    field("text", STRING),
});

pub static OBSERVATION_COMPONENT: ShapeDescriptor = shape_descriptor!(Backbone "Observation.component" {
    field("code", complex("CodeableConcept")).required(),
    choice("value", OBSERVATION_VALUE),
    field("dataAbsentReason", complex("CodeableConcept")),
    field("interpretation", complex("CodeableConcept")).repeated(),
    field("referenceRange", complex("Observation.referenceRange")).repeated(),
});

const MEDICATION: &[ChoiceOption] = &[
    option("CodeableConcept", complex("CodeableConcept")),
    option("Reference", complex("Reference")),
];

pub static MEDICATION_STATEMENT: ShapeDescriptor = shape_descriptor!(Resource "MedicationStatement": DOMAIN_RESOURCE_BASE, {
    field("identifier", complex("Identifier")).repeated(),
    field("basedOn", complex("Reference")).repeated(),
    field("partOf", complex("Reference")).repeated(),
    field("status", FieldType::Code(&MEDICATION_STATEMENT_STATUS)).required(),
    field("statusReason", complex("CodeableConcept")).repeated(),
    field("category", complex("CodeableConcept")),
    choice("medication", MEDICATION).required(),
    field("subject", complex("Reference")).required(),
    field("context", complex("Reference")),
    choice("effective", EFFECTIVE),
    field("dateAsserted", DATE_TIME),
    field("informationSource", complex("Reference")),
    field("derivedFrom", complex("Reference")).repeated(),
    field("reasonCode", complex("CodeableConcept")).repeated(),
    field("reasonReference", complex("Reference")).repeated(),
    field("note", complex("Annotation")).repeated(),
});

pub static ACCOUNT: ShapeDescriptor = shape_descriptor!(Resource "Account": DOMAIN_RESOURCE_BASE, {
    field("identifier", complex("Identifier")).repeated(),
    field("status", FieldType::Code(&ACCOUNT_STATUS)).required(),
    field("type", complex("CodeableConcept")),
    field("name", STRING),
    field("subject", complex("Reference")).repeated(),
    field("servicePeriod", complex("Period")),
    field("coverage", complex("Account.coverage")).repeated(),
    field("owner", complex("Reference")),
    field("description", STRING),
    field("guarantor", complex("Account.guarantor")).repeated(),
    field("partOf", complex("Reference")),
});

pub static ACCOUNT_COVERAGE: ShapeDescriptor = shape_descriptor!(Backbone "Account.coverage" {
    field("coverage", complex("Reference")).required(),
    field("priority", POSITIVE_INT),
});

pub static ACCOUNT_GUARANTOR: ShapeDescriptor = shape_descriptor!(Backbone "Account.guarantor" {
    field("party", complex("Reference")).required(),
    field("onHold", BOOLEAN),
    field("period", complex("Period")),
});

pub static BASIC: ShapeDescriptor = shape_descriptor!(Resource "Basic": DOMAIN_RESOURCE_BASE, {
    field("identifier", complex("Identifier")).repeated(),
    field("code", complex("CodeableConcept")).required(),
    field("subject", complex("Reference")),
    field("created", DATE),
    field("author", complex("Reference")),
});

pub static BUNDLE: ShapeDescriptor = shape_descriptor!(Resource "Bundle": RESOURCE_BASE, {
    field("identifier", complex("Identifier")),
    field("type", FieldType::Code(&BUNDLE_TYPE)).required(),
    field("timestamp", INSTANT),
    field("total", UNSIGNED_INT),
    field("link", complex("Bundle.link")).repeated(),
    field("entry", complex("Bundle.entry")).repeated(),
});

pub static BUNDLE_LINK: ShapeDescriptor = shape_descriptor!(Backbone "Bundle.link" {
    field("relation", STRING).required(),
    field("url", URI).required(),
});

pub static BUNDLE_ENTRY: ShapeDescriptor = shape_descriptor!(Backbone "Bundle.entry" {
    field("link", complex("Bundle.link")).repeated(),
    field("fullUrl", URI),
    field("resource", RESOURCE),
    field("search", complex("Bundle.entry.search")),
    field("request", complex("Bundle.entry.request")),
    field("response", complex("Bundle.entry.response")),
});

pub static BUNDLE_ENTRY_SEARCH: ShapeDescriptor = shape_descriptor!(Backbone "Bundle.entry.search" {
    field("mode", FieldType::Code(&SEARCH_ENTRY_MODE)),
    field("score", DECIMAL),
});

pub static BUNDLE_ENTRY_REQUEST: ShapeDescriptor = shape_descriptor!(Backbone "Bundle.entry.request" {
    field("method", FieldType::Code(&HTTP_VERB)).required(),
    field("url", URI).required(),
    field("ifNoneMatch", STRING),
    field("ifModifiedSince", INSTANT),
    field("ifMatch", STRING),
    field("ifNoneExist", STRING),
});

pub static BUNDLE_ENTRY_RESPONSE: ShapeDescriptor = shape_descriptor!(Backbone "Bundle.entry.response" {
    field("status", STRING).required(),
    field("location", URI),
    field("etag", STRING),
    field("lastModified", INSTANT),
    field("outcome", RESOURCE),
});
