//! Wire-schema compiler for OPC UA PubSub messages.
//!
//! Re-exports the workspace crates and provides [`SchemaCompiler`], which
//! compiles network messages, single dataset messages or bare datasets into
//! a [`CompiledSchema`](uaschema_core::CompiledSchema) identified by the
//! fingerprint of its canonical form.

mod error;
#[cfg(feature = "pubsub")]
mod compiler;

pub use error::CompileError;
#[cfg(feature = "pubsub")]
pub use compiler::{SchemaCompiler, SchemaCompilerBuilder};
#[cfg(feature = "builtin")]
pub use uaschema_builtin as builtin;
pub use uaschema_core as core;
pub use uaschema_model as model;
#[cfg(feature = "pubsub")]
pub use uaschema_pubsub as pubsub;
