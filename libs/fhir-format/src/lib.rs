//! FHIR JSON parsing and serialization.
//!
//! [`JsonCodec`] turns FHIR JSON documents into typed resource graphs and
//! back, following the JSON representation rules of HL7 FHIR:
//! - The root object names its shape in `resourceType`.
//! - Primitive metadata (`id`, `extension`) is carried in a `_field` sibling.
//! - Repeated primitives use aligned value and metadata arrays, with `null`
//!   marking the absent half at a position.
//! - Choice fields `value[x]` appear as exactly one `value<Type>` key.
//!
//! Shapes come from a [`tessera_context::ShapeRegistry`]; the codec itself
//! has no knowledge of concrete resources.
//!
//! # Example
//!
//! ```rust
//! use tessera_format::JsonCodec;
//! use tessera_context::FhirVersion;
//!
//! let codec = JsonCodec::for_version(FhirVersion::R4);
//! let input = r#"{"resourceType":"Patient","name":[{"given":["Peter",null],"_given":[null,{"id":"g2"}]}]}"#;
//!
//! let patient = codec.decode(input, Some("Patient")).unwrap();
//! assert_eq!(patient.resource_type(), "Patient");
//! assert_eq!(codec.encode(&patient), input);
//! ```

mod choice;
mod codec;
mod decode;
mod encode;
pub mod error;
pub mod options;
mod parallel;

pub use codec::JsonCodec;
pub use error::{Error, ErrorKind, Result};
pub use options::{FormatOptions, UnknownFieldPolicy};
