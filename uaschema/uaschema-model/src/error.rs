//! Error type for parsing model values from text.

/// Error returned when a textual model value cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The text is not a `ns=<n>;<i|s|g|b>=<id>` node id.
    #[error("invalid node id '{text}': {detail}")]
    InvalidNodeId { text: String, detail: String },

    /// The text does not name an encoding mode.
    #[error("unknown encoding mode '{0}'")]
    UnknownEncodingMode(String),

    /// The namespace table already uses every `u16` index.
    #[error("namespace table is full, cannot add '{uri}'")]
    NamespaceTableFull { uri: String },
}
