//! Error types for schema construction and rendering.

use crate::schema::SchemaId;

/// Error returned while building, verifying or rendering a schema graph.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A numeric built-in type id outside `0..=29` was requested.
    #[error("unknown built-in type id {0}")]
    UnknownBuiltInType(u32),

    /// A placeholder reserved to break recursion is still reachable from a
    /// completed schema.
    #[error("placeholder '{name}' leaked into a completed schema")]
    PlaceholderLeaked { name: String },

    /// Two distinct named nodes share one full name, so a reference to the
    /// name would be ambiguous.
    #[error("type name '{name}' is claimed by both {first} and {second}")]
    NameConflict {
        name: String,
        first: SchemaId,
        second: SchemaId,
    },

    /// The graph loops back to an unnamed node without passing through a
    /// named type, so it has no finite textual form.
    #[error("schema graph cycles through unnamed node {id}")]
    UnnamedCycle { id: SchemaId },

    /// Rendering the canonical text failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
