//! Criterion benchmarks for the JSON codec

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};
use std::time::Duration;
use tessera_context::FhirVersion;
use tessera_format::JsonCodec;

fn custom_criterion() -> Criterion {
    Criterion::default()
        .sample_size(20)
        .warm_up_time(Duration::from_millis(100))
        .measurement_time(Duration::from_secs(1))
        .nresamples(1000)
        .noise_threshold(0.05)
}

fn fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data/r4")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

/// A searchset bundle with `n` patient entries.
fn searchset(n: usize) -> Value {
    let entries: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "fullUrl": format!("https://example.com/base/Patient/{i}"),
                "resource": {
                    "resourceType": "Patient",
                    "id": i.to_string(),
                    "name": [{"family": "Chalmers", "given": ["Peter", null], "_given": [null, {"id": "g"}]}],
                    "birthDate": "1974-12-25",
                    "deceasedBoolean": false
                },
                "search": {"mode": "match", "score": 1}
            })
        })
        .collect();
    json!({"resourceType": "Bundle", "type": "searchset", "total": n, "entry": entries})
}

fn bench_decode(c: &mut Criterion) {
    let codec = JsonCodec::for_version(FhirVersion::R4);
    let patient = fixture("patient-example.json");
    let observation = fixture("observation-vitals.json");

    c.bench_function("decode_patient", |b| {
        b.iter(|| codec.decode(black_box(&patient), None).unwrap())
    });
    c.bench_function("decode_observation", |b| {
        b.iter(|| codec.decode(black_box(&observation), None).unwrap())
    });
}

fn bench_encode(c: &mut Criterion) {
    let codec = JsonCodec::for_version(FhirVersion::R4);
    let patient = codec
        .decode(&fixture("patient-example.json"), None)
        .unwrap();

    c.bench_function("encode_patient", |b| {
        b.iter(|| codec.encode(black_box(&patient)))
    });
}

fn bench_large_bundle(c: &mut Criterion) {
    let codec = JsonCodec::for_version(FhirVersion::R4);
    let bundle = searchset(500);
    let decoded = codec.decode_value(&bundle, None).unwrap();

    c.bench_function("decode_bundle_500", |b| {
        b.iter(|| codec.decode_value(black_box(&bundle), None).unwrap())
    });
    c.bench_function("encode_bundle_500", |b| {
        b.iter(|| codec.encode_value(black_box(&decoded)))
    });
}

criterion_group! {
    name = benches;
    config = custom_criterion();
    targets =
        bench_decode,
        bench_encode,
        bench_large_bundle
}
criterion_main!(benches);
