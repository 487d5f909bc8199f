//! Schema builders for OPC UA PubSub messages.
//!
//! Builders run bottom-up inside one [`SchemaSession`](uaschema_builtin::SchemaSession):
//! a dataset payload ([`build_data_set_schema`]) is wrapped into a
//! dataset-message envelope ([`build_data_set_message_schema`]), and the
//! messages of all writers of a group are wrapped into a network message
//! ([`build_network_message_schema`]) which is frozen into a
//! [`CompiledSchema`](uaschema_core::CompiledSchema).

mod data_set;
mod data_set_message;
mod network_message;

pub use data_set::build_data_set_schema;
pub use data_set_message::build_data_set_message_schema;
pub use network_message::build_network_message_schema;
