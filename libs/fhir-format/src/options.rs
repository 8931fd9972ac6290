//! Codec configuration

use serde::{Deserialize, Serialize};

/// What to do with object keys the shape does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFieldPolicy {
    /// Fail the decode. Keeps `encode(decode(json)) == json` for every
    /// accepted document.
    #[default]
    Reject,
    /// Drop the key and continue.
    Ignore,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub unknown_fields: UnknownFieldPolicy,
    /// Indent encoded JSON.
    pub pretty: bool,
}

impl FormatOptions {
    pub fn with_unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_fields = policy;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}
