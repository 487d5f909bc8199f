//! Frozen schema handed to encoders and schema-registry consumers.

use std::fmt::{Display, Formatter, Result};

use crate::{
    error::SchemaError,
    fingerprint::fingerprint64,
    schema::{SchemaArena, SchemaId, SchemaView, TextForm, format_schema, to_json_value},
};

/// A verified schema graph with its identity.
///
/// The id is the fingerprint of the parsing canonical form, so two compiles
/// of identical inputs produce the same id.
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    arena: SchemaArena,
    root: SchemaId,
    name: String,
    version: Option<String>,
    canonical: String,
    fingerprint: u64,
}

impl CompiledSchema {
    /// Freeze `arena` at `root`.
    ///
    /// Fails with [`SchemaError::PlaceholderLeaked`] when a reserved slot is
    /// still reachable from `root`.
    pub fn new(
        arena: SchemaArena,
        root: SchemaId,
        name: impl Into<String>,
        version: Option<String>,
    ) -> std::result::Result<Self, SchemaError> {
        arena.verify(root)?;
        let canonical = serde_json::to_string(&to_json_value(&arena, root, TextForm::Canonical)?)?;
        let fingerprint = fingerprint64(canonical.as_bytes());
        Ok(Self {
            arena,
            root,
            name: name.into(),
            version,
            canonical,
            fingerprint,
        })
    }

    pub fn root(&self) -> SchemaView<'_> {
        self.arena.view(self.root)
    }

    pub fn root_id(&self) -> SchemaId {
        self.root
    }

    pub fn arena(&self) -> &SchemaArena {
        &self.arena
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Fingerprint rendered as 16 lowercase hex digits.
    pub fn id(&self) -> String {
        format!("{:016x}", self.fingerprint)
    }

    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    pub fn canonical_form(&self) -> &str {
        &self.canonical
    }

    /// Full JSON text form including namespaces, docs and logical types.
    pub fn to_json(&self) -> std::result::Result<serde_json::Value, SchemaError> {
        to_json_value(&self.arena, self.root, TextForm::Full)
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(&self.to_json()?)?)
    }
}

impl Display for CompiledSchema {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = format_schema(self.root())?;
        f.write_str(&text)
    }
}
