use serde::{Deserialize, Serialize};

use crate::encoding::EncodingMode;

/// Compile options supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchemaOptions {
    /// Namespace of the generated message-level types.
    pub namespace: Option<String>,
    pub encoding: EncodingMode,
    /// Compile JSON schemas in legacy-compatibility mode.
    pub legacy_compatibility: bool,
    /// Wrap the compiled message in a root-level array.
    pub use_array_envelope: bool,
    /// Describe Guid values as 16-byte fixed blocks instead of text.
    pub fixed_guid: bool,
}

impl SchemaOptions {
    pub fn new(encoding: EncodingMode) -> Self {
        Self {
            encoding,
            ..Self::default()
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Encoding mode after applying the legacy-compatibility toggle, which
    /// only affects JSON modes.
    pub fn effective_encoding(&self) -> EncodingMode {
        if self.legacy_compatibility && self.encoding.is_json() {
            EncodingMode::JsonLegacyCompatibility
        } else {
            self.encoding
        }
    }
}
