//! Error types for the schema compiler.

use uaschema_core::SchemaError;

/// Errors produced by [`SchemaCompiler`](crate::SchemaCompiler).
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// Building, verifying or rendering the schema graph failed.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A dataset writer that was compiled on its own carries no metadata.
    #[error("data set writer {writer} has no metadata")]
    MissingMetaData { writer: u16 },
}
