//! FHIR STU3 (3.0.x) shape registry

pub mod codes;
pub mod datatypes;
pub mod resources;

use crate::registry::StaticRegistry;
use crate::shape::ShapeDescriptor;
use crate::version::FhirVersion;
use datatypes::*;
use phf::phf_map;
use resources::*;

static SHAPES: phf::Map<&'static str, &'static ShapeDescriptor> = phf_map! {
    // Datatypes
    "Meta" => &META,
    "Narrative" => &NARRATIVE,
    "Coding" => &CODING,
    "CodeableConcept" => &CODEABLE_CONCEPT,
    "Identifier" => &IDENTIFIER,
    "Reference" => &REFERENCE,
    "Period" => &PERIOD,
    "Quantity" => &QUANTITY,
    "SimpleQuantity" => &SIMPLE_QUANTITY,
    "Age" => &AGE,
    "Count" => &COUNT,
    "Distance" => &DISTANCE,
    "Duration" => &DURATION,
    "Money" => &MONEY,
    "Range" => &RANGE,
    "Ratio" => &RATIO,
    "HumanName" => &HUMAN_NAME,
    "ContactPoint" => &CONTACT_POINT,
    "Address" => &ADDRESS,
    "Annotation" => &ANNOTATION,
    "Attachment" => &ATTACHMENT,

    // Resources
    "Patient" => &PATIENT,
    "Observation" => &OBSERVATION,
    "MedicationStatement" => &MEDICATION_STATEMENT,
    "Basic" => &BASIC,
    "Bundle" => &BUNDLE,

    // Backbone elements
    "Patient.contact" => &PATIENT_CONTACT,
    "Patient.animal" => &PATIENT_ANIMAL,
    "Patient.communication" => &PATIENT_COMMUNICATION,
    "Patient.link" => &PATIENT_LINK,
    "Observation.referenceRange" => &OBSERVATION_REFERENCE_RANGE,
    "Observation.related" => &OBSERVATION_RELATED,
    "Observation.component" => &OBSERVATION_COMPONENT,
    "Bundle.link" => &BUNDLE_LINK,
    "Bundle.entry" => &BUNDLE_ENTRY,
    "Bundle.entry.search" => &BUNDLE_ENTRY_SEARCH,
    "Bundle.entry.request" => &BUNDLE_ENTRY_REQUEST,
    "Bundle.entry.response" => &BUNDLE_ENTRY_RESPONSE,
};

pub static REGISTRY: StaticRegistry = StaticRegistry::new(FhirVersion::Stu3, &SHAPES, EXTENSION_VALUES);
