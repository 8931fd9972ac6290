//! FHIR primitive value system and typed resource graph
//!
//! This crate holds everything a decoded document is made of:
//!
//! - `calendar`: partial-precision `Date`, `Time`, `DateTime` and `Instant`
//!   with strict calendar validation
//! - `primitive`: the closed set of FHIR primitive types, their lexical and
//!   range rules, and `Primitive<T>` (a value plus its element metadata)
//! - `element`: the `id` + `extension` envelope and `Extension`
//! - `resource`: the owned tree of `Resource`, `Complex`, `Value`,
//!   `FieldValue` and `Choice`
//!
//! Values are immutable once constructed from validated parts; invalid
//! components fail construction instead of being clamped.
//!
//! # Example
//!
//! ```rust
//! use tessera_models::{Date, Primitive, Resource, Value};
//!
//! let birth: Date = "1974-12-25".parse().unwrap();
//! let patient = Resource::new("Patient")
//!     .with_field("birthDate", Value::Date(Primitive::new(birth).with_id("bd")));
//!
//! assert_eq!(patient.value("birthDate").and_then(Value::as_date), Some(&birth));
//! assert!("1900-02-29".parse::<Date>().is_err());
//! ```

pub mod calendar;
pub mod element;
pub mod error;
pub mod primitive;
pub mod resource;

pub use calendar::{
    days_in_month, is_leap_year, Date, DatePrecision, DateTime, Fraction, Instant, Time, TimeZone,
};
pub use element::{Element, Extension};
pub use error::{Error, Result};
pub use primitive::{FhirPrimitive, Primitive, PrimitiveType};
pub use resource::{Choice, Complex, FieldValue, Resource, Value};
pub use rust_decimal::Decimal;
