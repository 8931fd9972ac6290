//! Error types for FHIR shape registries

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid FHIR version: {0}")]
    InvalidFhirVersion(String),
}

pub type Result<T> = std::result::Result<T, Error>;
