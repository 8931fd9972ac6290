//! FHIR shape registries
//!
//! The JSON codec is generic: everything it knows about a concrete resource
//! or datatype comes from a [`ShapeDescriptor`] looked up by name in a
//! [`ShapeRegistry`]. This crate defines that contract and ships one
//! compile-time registry per supported FHIR generation.
//!
//! - `shape`: field and shape descriptors, required code sets
//! - `registry`: the `ShapeRegistry` trait and `StaticRegistry`
//! - `version`: `FhirVersion`
//! - `stu3`, `r4`: the per-generation shape tables
//!
//! Registries are immutable `'static` data; lookups never allocate and may
//! run on any number of threads at once.
//!
//! # Example
//!
//! ```rust
//! use tessera_context::{registry_for, FhirVersion, ShapeRegistry};
//!
//! let r4 = registry_for(FhirVersion::R4);
//! let observation = r4.lookup_resource("Observation").unwrap();
//! assert!(observation.field("encounter").is_some());
//!
//! let stu3 = registry_for(FhirVersion::Stu3);
//! assert!(stu3.lookup_resource("Observation").unwrap().field("encounter").is_none());
//! ```

pub mod error;
pub mod r4;
pub mod registry;
pub mod shape;
pub mod stu3;
pub mod version;

pub use error::{Error, Result};
pub use registry::{registry_for, ShapeRegistry, StaticRegistry};
pub use shape::{
    ChoiceOption, CodeSet, FieldDescriptor, FieldKind, FieldType, ShapeDescriptor, ShapeKind,
};
pub use version::FhirVersion;
