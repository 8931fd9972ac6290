use std::thread;
use tessera_context::{registry_for, FhirVersion, FieldKind, FieldType, ShapeKind, ShapeRegistry};

#[test]
fn test_each_version_has_its_own_registry() {
    let stu3 = registry_for(FhirVersion::Stu3);
    let r4 = registry_for(FhirVersion::R4);

    assert_eq!(stu3.version(), FhirVersion::Stu3);
    assert_eq!(r4.version(), FhirVersion::R4);
    assert!(!std::ptr::eq(
        stu3.lookup("Meta").unwrap(),
        r4.lookup("Meta").unwrap()
    ));
}

#[test]
fn test_resource_types_are_resources() {
    for version in FhirVersion::ALL {
        let registry = registry_for(version);
        let mut names: Vec<_> = registry.resource_types().collect();
        names.sort_unstable();
        assert!(names.contains(&"Patient"), "{version} has Patient");
        for name in names {
            let shape = registry.lookup_resource(name).unwrap();
            assert_eq!(shape.kind, ShapeKind::Resource);
            assert!(shape.field("id").is_some());
        }
    }
    assert!(registry_for(FhirVersion::R4)
        .resource_types()
        .any(|name| name == "Account"));
    assert!(!registry_for(FhirVersion::Stu3)
        .resource_types()
        .any(|name| name == "Account"));
}

#[test]
fn test_choice_fields_declare_suffixes() {
    let patient = registry_for(FhirVersion::R4).lookup_resource("Patient").unwrap();
    let deceased = patient.field("deceased").unwrap();
    let FieldKind::Choice(options) = deceased.kind else {
        panic!("deceased should be a choice field");
    };
    let suffixes: Vec<_> = options.iter().map(|o| o.suffix).collect();
    assert_eq!(suffixes, vec!["Boolean", "DateTime"]);

    let gender = patient.field("gender").unwrap();
    let FieldKind::Single(FieldType::Code(codes)) = gender.kind else {
        panic!("gender should be a bound code");
    };
    assert_eq!(codes.name, "AdministrativeGender");
}

#[test]
fn test_lookups_from_many_threads() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let version = FhirVersion::ALL[i % 2];
                let registry: &dyn ShapeRegistry = registry_for(version);
                registry.lookup_resource("Observation").is_some()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
