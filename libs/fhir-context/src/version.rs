//! FHIR specification generations

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A specification generation with its own shape registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FhirVersion {
    #[serde(rename = "STU3")]
    Stu3,
    R4,
}

impl FhirVersion {
    pub const ALL: [FhirVersion; 2] = [FhirVersion::Stu3, FhirVersion::R4];

    /// Technical release number of the generation.
    pub fn release(&self) -> &'static str {
        match self {
            FhirVersion::Stu3 => "3.0.2",
            FhirVersion::R4 => "4.0.1",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FhirVersion::Stu3 => "STU3",
            FhirVersion::R4 => "R4",
        }
    }
}

impl fmt::Display for FhirVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FhirVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STU3" | "R3" | "3.0" | "3.0.1" | "3.0.2" => Ok(FhirVersion::Stu3),
            "R4" | "4.0" | "4.0.0" | "4.0.1" => Ok(FhirVersion::R4),
            _ => Err(Error::InvalidFhirVersion(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_releases() {
        assert_eq!("STU3".parse::<FhirVersion>(), Ok(FhirVersion::Stu3));
        assert_eq!("stu3".parse::<FhirVersion>(), Ok(FhirVersion::Stu3));
        assert_eq!("3.0.1".parse::<FhirVersion>(), Ok(FhirVersion::Stu3));
        assert_eq!("r4".parse::<FhirVersion>(), Ok(FhirVersion::R4));
        assert_eq!("4.0.1".parse::<FhirVersion>(), Ok(FhirVersion::R4));
        assert_eq!(
            "R5".parse::<FhirVersion>(),
            Err(Error::InvalidFhirVersion("R5".into()))
        );
    }

    #[test]
    fn test_display_matches_parse() {
        for version in FhirVersion::ALL {
            assert_eq!(version.to_string().parse::<FhirVersion>(), Ok(version));
        }
    }
}
