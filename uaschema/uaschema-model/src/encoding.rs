use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Wire encoding a schema is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EncodingMode {
    /// Binary-oriented structural schema.
    Binary,
    /// OPC UA JSON, reversible encoding.
    #[default]
    JsonReversible,
    /// OPC UA JSON, non-reversible encoding.
    JsonNonReversible,
    /// JSON as produced by earlier publisher versions.
    JsonLegacyCompatibility,
}

impl EncodingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::JsonReversible => "jsonReversible",
            Self::JsonNonReversible => "jsonNonReversible",
            Self::JsonLegacyCompatibility => "jsonLegacyCompatibility",
        }
    }

    pub fn is_json(self) -> bool {
        !matches!(self, Self::Binary)
    }

    pub fn is_non_reversible(self) -> bool {
        matches!(self, Self::JsonNonReversible)
    }

    pub fn is_legacy(self) -> bool {
        matches!(self, Self::JsonLegacyCompatibility)
    }
}

impl FromStr for EncodingMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary" => Ok(Self::Binary),
            "jsonReversible" | "json" => Ok(Self::JsonReversible),
            "jsonNonReversible" => Ok(Self::JsonNonReversible),
            "jsonLegacyCompatibility" => Ok(Self::JsonLegacyCompatibility),
            other => Err(ModelError::UnknownEncodingMode(other.to_string())),
        }
    }
}

impl fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
