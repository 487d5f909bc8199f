//! Schemas of the OPC UA built-in types and of user-defined structures and
//! enumerations.
//!
//! [`BuiltInTypeCatalog`] maps every built-in type and rank to one schema node
//! under the rules of an [`EncodingMode`](uaschema_model::EncodingMode).
//! [`SchemaSession`] bundles the catalog with the arena, the structure caches
//! and the name registry of one compile invocation.

mod catalog;
mod session;
mod structures;

pub use catalog::BuiltInTypeCatalog;
pub use session::SchemaSession;
