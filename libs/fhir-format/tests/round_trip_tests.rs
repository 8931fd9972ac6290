use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tessera_context::FhirVersion;
use tessera_format::JsonCodec;

fn test_data_dir(version: FhirVersion) -> PathBuf {
    let dir = match version {
        FhirVersion::Stu3 => "stu3",
        FhirVersion::R4 => "r4",
    };
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(dir)
}

/// All `.json` fixtures for a version, sorted by file name.
fn discover_test_cases(version: FhirVersion) -> Vec<PathBuf> {
    let mut cases: Vec<PathBuf> = fs::read_dir(test_data_dir(version))
        .map(|entries| {
            entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
                .collect()
        })
        .unwrap_or_default();
    cases.sort();
    cases
}

fn load(path: &PathBuf) -> String {
    fs::read_to_string(path).unwrap_or_else(|_| panic!("Failed to read {}", path.display()))
}

fn assert_round_trip(version: FhirVersion) {
    let codec = JsonCodec::for_version(version);
    let cases = discover_test_cases(version);
    assert!(
        !cases.is_empty(),
        "No test cases found in {}",
        test_data_dir(version).display()
    );

    for path in &cases {
        let input = load(path);
        let expected: Value = serde_json::from_str(&input).expect("fixture is valid JSON");

        let resource = codec
            .decode(&input, None)
            .unwrap_or_else(|e| panic!("{} failed to decode: {e}", path.display()));
        assert_eq!(
            Some(resource.resource_type()),
            expected["resourceType"].as_str(),
            "{}",
            path.display()
        );

        let encoded: Value = serde_json::from_str(&codec.encode(&resource)).unwrap();
        assert_eq!(encoded, expected, "{} did not round trip", path.display());
    }
}

#[test]
fn test_r4_fixtures_round_trip() {
    assert_round_trip(FhirVersion::R4);
}

#[test]
fn test_stu3_fixtures_round_trip() {
    assert_round_trip(FhirVersion::Stu3);
}

#[test]
fn test_fixtures_are_version_specific() {
    let r4 = JsonCodec::for_version(FhirVersion::R4);
    let stu3 = JsonCodec::for_version(FhirVersion::Stu3);

    for path in discover_test_cases(FhirVersion::Stu3) {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if name.starts_with("patient-animal")
            || name.starts_with("observation-related")
            || name.starts_with("medicationstatement-taken")
        {
            assert!(
                r4.decode(&load(&path), None).is_err(),
                "{name} uses STU3-only fields and must not decode as R4"
            );
        }
    }

    let account = test_data_dir(FhirVersion::R4).join("account-example.json");
    assert!(stu3.decode(&load(&account), None).is_err());
}

#[test]
fn test_pretty_output_round_trips() {
    let codec = JsonCodec::for_version(FhirVersion::R4)
        .with_options(tessera_format::FormatOptions::default().with_pretty(true));
    let path = test_data_dir(FhirVersion::R4).join("patient-example.json");
    let input = load(&path);

    let encoded = codec.encode(&codec.decode(&input, Some("Patient")).unwrap());
    assert!(encoded.starts_with("{\n  \"resourceType\": \"Patient\""));
    assert_eq!(
        serde_json::from_str::<Value>(&encoded).unwrap(),
        serde_json::from_str::<Value>(&input).unwrap()
    );
}
