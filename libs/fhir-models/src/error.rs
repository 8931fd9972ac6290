//! Error types for FHIR primitive values

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimeZone(String),

    #[error("Invalid dateTime: {0}")]
    InvalidDateTime(String),

    #[error("Invalid instant: {0}")]
    InvalidInstant(String),

    #[error("Invalid {kind} value: {value:?}")]
    InvalidLexical { kind: &'static str, value: String },

    #[error("{kind} value {value} is out of range")]
    OutOfRange { kind: &'static str, value: String },

    #[error("Expected a JSON {expected} for {kind}")]
    UnexpectedJson {
        kind: &'static str,
        expected: &'static str,
    },

    #[error("Primitive has neither a value nor an id or extension")]
    EmptyPrimitive,

    #[error("Extension {0:?} has neither a value nor nested extensions")]
    EmptyExtension(String),
}

pub type Result<T> = std::result::Result<T, Error>;
