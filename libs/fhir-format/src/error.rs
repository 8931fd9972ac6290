//! Error types for FHIR JSON decoding

use tessera_context::FhirVersion;
use thiserror::Error;

/// Broad class of a decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input is not well-formed JSON.
    Syntax,
    /// A primitive violates its lexical, calendar, range or value-set rules.
    Validation,
    /// The document does not have the shape its type declares.
    Structural,
    /// A type name is not registered for the active FHIR version.
    Lookup,
}

/// Every variant that refers to a location carries a path such as
/// `Patient.name[0].given[1]`; metadata siblings appear as `Patient._birthDate`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}: expected a JSON object")]
    ExpectedObject(String),

    #[error("{0}: missing resourceType property")]
    MissingResourceType(String),

    #[error("unknown resource type {resource_type:?} for FHIR {version}")]
    UnknownResourceType {
        resource_type: String,
        version: FhirVersion,
    },

    #[error("unknown shape {name:?} for FHIR {version}")]
    UnknownShape { name: String, version: FhirVersion },

    #[error("expected resource type {expected}, found {found}")]
    ResourceTypeMismatch { expected: String, found: String },

    #[error("{0}: missing required field")]
    MissingField(String),

    #[error("{path}: more than one alternative populated ({})", .keys.join(", "))]
    ChoiceConflict { path: String, keys: Vec<String> },

    #[error("{path}: {values} values but {metadata} metadata entries")]
    MisalignedArrays {
        path: String,
        values: usize,
        metadata: usize,
    },

    #[error("{path}: expected {expected}")]
    UnexpectedType {
        path: String,
        expected: &'static str,
    },

    #[error("{0}: null is only allowed as a placeholder in primitive arrays")]
    Null(String),

    #[error("{0}: array must contain at least one non-null entry")]
    EmptyArray(String),

    #[error("{0}: element carries no content")]
    EmptyElement(String),

    #[error("{0}: unknown field")]
    UnknownField(String),

    #[error("{path}: code {code:?} is not in value set {value_set}")]
    InvalidCode {
        path: String,
        code: String,
        value_set: &'static str,
    },

    #[error("{path}: {source}")]
    Validation {
        path: String,
        #[source]
        source: tessera_models::Error,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Json(_) => ErrorKind::Syntax,
            Error::Validation { .. } | Error::InvalidCode { .. } => ErrorKind::Validation,
            Error::UnknownResourceType { .. } | Error::UnknownShape { .. } => ErrorKind::Lookup,
            _ => ErrorKind::Structural,
        }
    }

    /// Location of the failure, when it has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::ExpectedObject(path)
            | Error::MissingResourceType(path)
            | Error::MissingField(path)
            | Error::Null(path)
            | Error::EmptyArray(path)
            | Error::EmptyElement(path)
            | Error::UnknownField(path)
            | Error::ChoiceConflict { path, .. }
            | Error::MisalignedArrays { path, .. }
            | Error::UnexpectedType { path, .. }
            | Error::InvalidCode { path, .. }
            | Error::Validation { path, .. } => Some(path.as_str()),
            Error::Json(_)
            | Error::UnknownResourceType { .. }
            | Error::UnknownShape { .. }
            | Error::ResourceTypeMismatch { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(Error::from(json).kind(), ErrorKind::Syntax);
        assert_eq!(
            Error::UnknownResourceType {
                resource_type: "Foo".into(),
                version: FhirVersion::R4
            }
            .kind(),
            ErrorKind::Lookup
        );
        assert_eq!(
            Error::Validation {
                path: "Patient.birthDate".into(),
                source: tessera_models::Error::InvalidDate("1900-02-29".into()),
            }
            .kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            Error::MissingField("Observation.status".into()).kind(),
            ErrorKind::Structural
        );
    }

    #[test]
    fn test_messages_carry_paths() {
        let err = Error::ChoiceConflict {
            path: "Observation.value[x]".into(),
            keys: vec!["valueString".into(), "valueQuantity".into()],
        };
        assert_eq!(
            err.to_string(),
            "Observation.value[x]: more than one alternative populated (valueString, valueQuantity)"
        );
        assert_eq!(err.path(), Some("Observation.value[x]"));
        assert_eq!(
            Error::ResourceTypeMismatch {
                expected: "Patient".into(),
                found: "Basic".into()
            }
            .path(),
            None
        );
    }
}
