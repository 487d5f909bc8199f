//! Encoding-agnostic schema intermediate representation for OPC UA PubSub
//! wire schemas.
//!
//! Schemas are graphs of [`SchemaNode`]s stored in a [`SchemaArena`] and
//! addressed by [`SchemaId`]. Recursive types are expressed through ids, so a
//! node can be reserved as a [`SchemaNode::Placeholder`] and backfilled once
//! its body is known. A finished graph is frozen into a [`CompiledSchema`],
//! which carries the parsing canonical form and its 64-bit fingerprint.

mod compiled;
mod error;
mod fingerprint;
mod names;
mod schema;

pub use compiled::CompiledSchema;
pub use error::SchemaError;
pub use fingerprint::{EMPTY_FINGERPRINT, fingerprint64};
pub use names::{UniqueNameRegistry, escape_name, namespace_from_uri};
pub use schema::{
    EnumSchema, FieldView, FixedSchema, LogicalType, PrimitiveKind, PrimitiveSchema,
    RecordSchema, SchemaArena, SchemaField, SchemaId, SchemaNode, SchemaView, TextForm,
    TypeName, format_schema, to_json_value,
};
