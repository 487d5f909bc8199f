use std::fmt;

use serde::{Deserialize, Serialize};
use uaschema_core::SchemaError;

use crate::node_id::{Identifier, NodeId};

/// The OPC UA built-in types, including the abstract numeric and enumeration
/// types that share the data-type id space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
#[repr(u8)]
pub enum BuiltInTypeId {
    Null = 0,
    Boolean = 1,
    SByte = 2,
    Byte = 3,
    Int16 = 4,
    UInt16 = 5,
    Int32 = 6,
    UInt32 = 7,
    Int64 = 8,
    UInt64 = 9,
    Float = 10,
    Double = 11,
    String = 12,
    DateTime = 13,
    Guid = 14,
    ByteString = 15,
    XmlElement = 16,
    NodeId = 17,
    ExpandedNodeId = 18,
    StatusCode = 19,
    QualifiedName = 20,
    LocalizedText = 21,
    ExtensionObject = 22,
    DataValue = 23,
    Variant = 24,
    DiagnosticInfo = 25,
    Number = 26,
    Integer = 27,
    UInteger = 28,
    Enumeration = 29,
}

impl BuiltInTypeId {
    /// All ids in numeric order.
    pub const ALL: [BuiltInTypeId; 30] = [
        Self::Null,
        Self::Boolean,
        Self::SByte,
        Self::Byte,
        Self::Int16,
        Self::UInt16,
        Self::Int32,
        Self::UInt32,
        Self::Int64,
        Self::UInt64,
        Self::Float,
        Self::Double,
        Self::String,
        Self::DateTime,
        Self::Guid,
        Self::ByteString,
        Self::XmlElement,
        Self::NodeId,
        Self::ExpandedNodeId,
        Self::StatusCode,
        Self::QualifiedName,
        Self::LocalizedText,
        Self::ExtensionObject,
        Self::DataValue,
        Self::Variant,
        Self::DiagnosticInfo,
        Self::Number,
        Self::Integer,
        Self::UInteger,
        Self::Enumeration,
    ];

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Boolean => "Boolean",
            Self::SByte => "SByte",
            Self::Byte => "Byte",
            Self::Int16 => "Int16",
            Self::UInt16 => "UInt16",
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
            Self::Int64 => "Int64",
            Self::UInt64 => "UInt64",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::String => "String",
            Self::DateTime => "DateTime",
            Self::Guid => "Guid",
            Self::ByteString => "ByteString",
            Self::XmlElement => "XmlElement",
            Self::NodeId => "NodeId",
            Self::ExpandedNodeId => "ExpandedNodeId",
            Self::StatusCode => "StatusCode",
            Self::QualifiedName => "QualifiedName",
            Self::LocalizedText => "LocalizedText",
            Self::ExtensionObject => "ExtensionObject",
            Self::DataValue => "DataValue",
            Self::Variant => "Variant",
            Self::DiagnosticInfo => "DiagnosticInfo",
            Self::Number => "Number",
            Self::Integer => "Integer",
            Self::UInteger => "UInteger",
            Self::Enumeration => "Enumeration",
        }
    }

    /// Data-type node id of this built-in type in namespace 0.
    pub fn data_type_id(self) -> NodeId {
        NodeId::numeric(0, self.id())
    }

    /// The built-in type whose data-type node id is `node`, if any.
    ///
    /// Only `ns=0;i=1` through `ns=0;i=29` qualify; `i=0` is not a data type.
    pub fn from_data_type(node: &NodeId) -> Option<Self> {
        match (node.namespace, &node.identifier) {
            (0, Identifier::Numeric(id @ 1..=29)) => Self::try_from(*id).ok(),
            _ => None,
        }
    }
}

impl TryFrom<u32> for BuiltInTypeId {
    type Error = SchemaError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(SchemaError::UnknownBuiltInType(value))
    }
}

impl From<BuiltInTypeId> for u32 {
    fn from(value: BuiltInTypeId) -> Self {
        value.id()
    }
}

impl fmt::Display for BuiltInTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
