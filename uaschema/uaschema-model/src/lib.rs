//! OPC UA PubSub metadata model consumed by the schema compiler.
//!
//! Everything here is plain input data: built-in type ids and value ranks,
//! node ids, structure/enum descriptions, dataset metadata, writer and
//! network-message descriptions, content flags and compile options. All
//! types are `serde` (de)serializable so descriptions can be loaded from
//! JSON by the caller.

mod built_in;
mod encoding;
mod error;
mod flags;
mod metadata;
mod namespace;
mod node_id;
mod options;
mod rank;
mod types;

pub use built_in::BuiltInTypeId;
pub use encoding::EncodingMode;
pub use error::ModelError;
pub use flags::{DataSetFieldContentFlags, DataSetMessageContentFlags, NetworkMessageContentFlags};
pub use metadata::{
    ConfigurationVersion, DataSetMetaData, DataSetWriter, FieldMetaData, NetworkMessage,
};
pub use namespace::{NamespaceTable, OPC_UA_NAMESPACE_URI};
pub use node_id::{Identifier, NodeId, QualifiedName};
pub use options::SchemaOptions;
pub use rank::{SchemaRank, value_rank};
pub use types::{
    EnumDescription, EnumField, StructureDescription, StructureField, StructureKind,
    TypeDescriptionProvider, TypeDictionary,
};
