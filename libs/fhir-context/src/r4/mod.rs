//! FHIR R4 (4.0.x) shape registry

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
    "Account" => &ACCOUNT,
    "Basic" => &BASIC,
    "Bundle" => &BUNDLE,

    // Backbone elements
    "Patient.contact" => &PATIENT_CONTACT,
    "Patient.communication" => &PATIENT_COMMUNICATION,
    "Patient.link" => &PATIENT_LINK,
    "Observation.referenceRange" => &OBSERVATION_REFERENCE_RANGE,
    "Observation.component" => &OBSERVATION_COMPONENT,
    "Account.coverage" => &ACCOUNT_COVERAGE,
    "Account.guarantor" => &ACCOUNT_GUARANTOR,
    "Bundle.link" => &BUNDLE_LINK,
    "Bundle.entry" => &BUNDLE_ENTRY,
    "Bundle.entry.search" => &BUNDLE_ENTRY_SEARCH,
    "Bundle.entry.request" => &BUNDLE_ENTRY_REQUEST,
    "Bundle.entry.response" => &BUNDLE_ENTRY_RESPONSE,
};

pub static REGISTRY: StaticRegistry = StaticRegistry::new(FhirVersion::R4, &SHAPES, EXTENSION_VALUES);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ShapeRegistry;
    use crate::shape::{FieldKind, FieldType};

    #[test]
    fn test_lookup_resources_and_datatypes() {
        assert_eq!(REGISTRY.version(), FhirVersion::R4);
        assert!(REGISTRY.lookup_resource("Account").is_some());
        assert!(REGISTRY.lookup("Account.coverage").is_some());
        assert!(REGISTRY.lookup_resource("Account.coverage").is_none());
        assert!(REGISTRY.lookup("Patient.animal").is_none());
    }

    #[test]
    fn test_r4_specific_fields() {
        let observation = REGISTRY.lookup_resource("Observation").unwrap();
        assert!(observation.field("encounter").is_some());
        assert!(observation.field("context").is_none());
        assert!(observation.field("interpretation").is_some_and(|f| f.repeated));

        let statement = REGISTRY.lookup_resource("MedicationStatement").unwrap();
        assert!(statement.field("taken").is_none());

        let money = REGISTRY.lookup("Money").unwrap();
        assert!(money.field("currency").is_some());
        assert!(money.field("comparator").is_none());

        let extension_suffixes: Vec<_> = REGISTRY
            .extension_value_types()
            .iter()
            .map(|o| o.suffix)
            .collect();
        assert!(extension_suffixes.contains(&"Canonical"));
        assert!(extension_suffixes.contains(&"Uuid"));
    }

    #[test]
    fn test_every_complex_reference_resolves() {
        for (name, shape) in SHAPES.entries() {
            assert_eq!(*name, shape.name);
            for field in shape.all_fields() {
                let types: Vec<FieldType> = match field.kind {
                    FieldKind::Single(ty) => vec![ty],
                    FieldKind::Choice(options) => options.iter().map(|o| o.field_type).collect(),
                };
                for ty in types {
                    if let FieldType::Complex(name) = ty {
                        assert!(
                            REGISTRY.lookup(name).is_some(),
                            "{}.{} refers to unknown shape {name}",
                            shape.name,
                            field.name
                        );
                    }
                }
            }
        }
        for option in REGISTRY.extension_value_types() {
            if let FieldType::Complex(name) = option.field_type {
                assert!(REGISTRY.lookup(name).is_some(), "unknown extension type {name}");
            }
        }
    }

    #[test]
    fn test_code_sets() {
        assert!(codes::ADMINISTRATIVE_GENDER.contains("female"));
        assert!(!codes::ADMINISTRATIVE_GENDER.contains("f"));
        assert!(codes::HTTP_VERB.contains("PATCH"));
        assert!(codes::ACCOUNT_STATUS.contains("on-hold"));
    }
}
