//! Structure and enumeration descriptions and the provider contract used to
//! resolve data-type ids while compiling.

use serde::{Deserialize, Serialize};

use crate::{
    namespace::NamespaceTable,
    node_id::{NodeId, QualifiedName},
    rank::value_rank,
};

/// Flavour of a structured data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StructureKind {
    #[default]
    Structure,
    StructureWithOptionalFields,
    /// At most one field is set.
    Union,
}

/// A field of a [`StructureDescription`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureField {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `None` marks a field whose type is unknown; such fields are skipped.
    #[serde(default)]
    pub data_type: Option<NodeId>,
    #[serde(default = "default_value_rank")]
    pub value_rank: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub array_dimensions: Vec<u32>,
    #[serde(default)]
    pub is_optional: bool,
}

fn default_value_rank() -> i32 {
    value_rank::SCALAR
}

impl StructureField {
    pub fn new(name: impl Into<String>, data_type: NodeId) -> Self {
        Self {
            name: name.into(),
            description: None,
            data_type: Some(data_type),
            value_rank: value_rank::SCALAR,
            array_dimensions: Vec::new(),
            is_optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.is_optional = true;
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
}

/// Description of a user-defined structured data type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureDescription {
    pub data_type_id: NodeId,
    pub name: QualifiedName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_data_type: Option<NodeId>,
    #[serde(default)]
    pub kind: StructureKind,
    #[serde(default)]
    pub fields: Vec<StructureField>,
}

impl StructureDescription {
    pub fn new(data_type_id: NodeId, name: QualifiedName, fields: Vec<StructureField>) -> Self {
        Self {
            data_type_id,
            name,
            base_data_type: None,
            kind: StructureKind::Structure,
            fields,
        }
    }

    pub fn with_base(mut self, base_data_type: NodeId) -> Self {
        self.base_data_type = Some(base_data_type);
        self
    }

    pub fn with_kind(mut self, kind: StructureKind) -> Self {
        self.kind = kind;
        self
    }
}

/// A member of an [`EnumDescription`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumField {
    pub name: String,
    pub value: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EnumField {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            description: None,
        }
    }
}

/// Description of a user-defined enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDescription {
    pub data_type_id: NodeId,
    pub name: QualifiedName,
    #[serde(default)]
    pub fields: Vec<EnumField>,
}

impl EnumDescription {
    pub fn new(data_type_id: NodeId, name: QualifiedName, fields: Vec<EnumField>) -> Self {
        Self {
            data_type_id,
            name,
            fields,
        }
    }
}

/// Resolves data-type ids to descriptions and namespace indices to URIs.
pub trait TypeDescriptionProvider {
    fn namespace_uri(&self, index: u16) -> Option<&str>;

    fn structure(&self, data_type_id: &NodeId) -> Option<&StructureDescription>;

    fn enumeration(&self, data_type_id: &NodeId) -> Option<&EnumDescription>;
}

/// Self-contained set of type descriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypeDictionary {
    pub namespaces: NamespaceTable,
    pub structures: Vec<StructureDescription>,
    pub enums: Vec<EnumDescription>,
}

impl TypeDictionary {
    pub fn new(namespaces: NamespaceTable) -> Self {
        Self {
            namespaces,
            structures: Vec::new(),
            enums: Vec::new(),
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

impl TypeDescriptionProvider for TypeDictionary {
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

pub(crate) fn find_structure<'a>(
    structures: &'a [StructureDescription],
    data_type_id: &NodeId,
) -> Option<&'a StructureDescription> {
    structures.iter().find(|s| &s.data_type_id == data_type_id)
}

pub(crate) fn find_enum<'a>(
    enums: &'a [EnumDescription],
    data_type_id: &NodeId,
) -> Option<&'a EnumDescription> {
    enums.iter().find(|e| &e.data_type_id == data_type_id)
}
