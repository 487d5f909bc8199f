//! Published-dataset metadata and the writer / network-message descriptions
//! that select how datasets are framed on the wire.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    built_in::BuiltInTypeId,
    flags::{DataSetFieldContentFlags, DataSetMessageContentFlags, NetworkMessageContentFlags},
    namespace::NamespaceTable,
    node_id::NodeId,
    rank::{SchemaRank, value_rank},
    types::{
        EnumDescription, StructureDescription, TypeDescriptionProvider, find_enum, find_structure,
    },
};

/// One field of a published dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetaData {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Built-in type tag; `Null` when only `data_type` describes the value.
    #[serde(default = "default_built_in")]
    pub built_in_type: BuiltInTypeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<NodeId>,
    #[serde(default = "default_value_rank")]
    pub value_rank: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub array_dimensions: Vec<u32>,
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_set_field_id: Option<Uuid>,
}

fn default_built_in() -> BuiltInTypeId {
    BuiltInTypeId::Null
}

fn default_value_rank() -> i32 {
    value_rank::SCALAR
}

impl FieldMetaData {
    pub fn new(name: impl Into<String>, built_in_type: BuiltInTypeId) -> Self {
        Self {
            name: name.into(),
            description: None,
            built_in_type,
            data_type: None,
            value_rank: value_rank::SCALAR,
            array_dimensions: Vec::new(),
            is_optional: false,
            data_set_field_id: None,
        }
    }

    pub fn with_data_type(mut self, data_type: NodeId) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn with_value_rank(mut self, value_rank: i32, array_dimensions: Vec<u32>) -> Self {
        self.value_rank = value_rank;
        self.array_dimensions = array_dimensions;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn rank(&self) -> SchemaRank {
        SchemaRank::from_value_rank(self.value_rank, &self.array_dimensions)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigurationVersion {
    pub major_version: u32,
    pub minor_version: u32,
}

/// Metadata of a published dataset: its fields plus the type descriptions and
/// namespace table needed to resolve them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataSetMetaData {
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<FieldMetaData>,
    pub namespaces: NamespaceTable,
    pub structures: Vec<StructureDescription>,
    pub enums: Vec<EnumDescription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_set_class_id: Option<Uuid>,
    pub configuration_version: ConfigurationVersion,
}

impl DataSetMetaData {
    pub fn new(name: impl Into<String>, fields: Vec<FieldMetaData>) -> Self {
        Self {
            name: Some(name.into()),
            fields,
            ..Self::default()
        }
    }

    pub fn with_structure(mut self, structure: StructureDescription) -> Self {
        self.structures.push(structure);
        self
    }

    pub fn with_enum(mut self, enumeration: EnumDescription) -> Self {
        self.enums.push(enumeration);
        self
    }
}

impl TypeDescriptionProvider for DataSetMetaData {
    fn namespace_uri(&self, index: u16) -> Option<&str> {
        self.namespaces.get(index)
    }

    fn structure(&self, data_type_id: &NodeId) -> Option<&StructureDescription> {
        find_structure(&self.structures, data_type_id)
    }

    fn enumeration(&self, data_type_id: &NodeId) -> Option<&EnumDescription> {
        find_enum(&self.enums, data_type_id)
    }
}

/// A dataset writer: one dataset plus the content selection of its messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataSetWriter {
    pub id: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Writers without metadata contribute no message type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DataSetMetaData>,
    pub message_content: DataSetMessageContentFlags,
    pub field_content: DataSetFieldContentFlags,
}

impl DataSetWriter {
    pub fn new(id: u16, metadata: DataSetMetaData) -> Self {
        Self {
            id,
            metadata: Some(metadata),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_message_content(mut self, flags: DataSetMessageContentFlags) -> Self {
        self.message_content = flags;
        self
    }

    pub fn with_field_content(mut self, flags: DataSetFieldContentFlags) -> Self {
        self.field_content = flags;
        self
    }
}

/// A network message of one writer group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writer_group_name: Option<String>,
    pub message_content: NetworkMessageContentFlags,
    pub writers: Vec<DataSetWriter>,
    /// Caller-supplied version carried by the compiled schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl NetworkMessage {
    pub fn new(message_content: NetworkMessageContentFlags, writers: Vec<DataSetWriter>) -> Self {
        Self {
            message_content,
            writers,
            ..Self::default()
        }
    }

    pub fn with_writer_group_name(mut self, name: impl Into<String>) -> Self {
        self.writer_group_name = Some(name.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}
