//! Arena-backed schema graph, navigation views and text renderers.

mod arena;
mod format;
mod json;
mod types;
mod view;

pub use arena::SchemaArena;
pub use format::format_schema;
pub use json::{TextForm, to_json_value};
pub use types::{
    EnumSchema, FixedSchema, LogicalType, PrimitiveKind, PrimitiveSchema, RecordSchema,
    SchemaField, SchemaId, SchemaNode, TypeName,
};
pub use view::{FieldView, SchemaView};
