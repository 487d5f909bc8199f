//! Schemas of the OPC UA built-in types.
//!
//! Every (type, rank) pair resolves to exactly one arena node per catalog.
//! Composite types refer to each other (Variant contains DataValue which
//! contains Variant, DiagnosticInfo contains itself), so a placeholder slot
//! is reserved and cached under the key before the body is built and the
//! slot is filled in place afterwards.

use std::collections::HashMap;

use serde_json::json;
use tracing::trace;
use uaschema_core::{
    EnumSchema, FixedSchema, LogicalType, PrimitiveKind, PrimitiveSchema, RecordSchema,
    SchemaArena, SchemaError, SchemaId, SchemaNode, TypeName, UniqueNameRegistry,
    namespace_from_uri,
};
use uaschema_model::{BuiltInTypeId, EncodingMode, NodeId, OPC_UA_NAMESPACE_URI, SchemaRank};

/// Built-in types a Variant can carry. DiagnosticInfo is excluded, the
/// abstract types (Number, Integer, UInteger, Enumeration) never appear on
/// the wire.
const VARIANT_TYPES: [BuiltInTypeId; 24] = [
    BuiltInTypeId::Boolean,
    BuiltInTypeId::SByte,
    BuiltInTypeId::Byte,
    BuiltInTypeId::Int16,
    BuiltInTypeId::UInt16,
    BuiltInTypeId::Int32,
    BuiltInTypeId::UInt32,
    BuiltInTypeId::Int64,
    BuiltInTypeId::UInt64,
    BuiltInTypeId::Float,
    BuiltInTypeId::Double,
    BuiltInTypeId::String,
    BuiltInTypeId::DateTime,
    BuiltInTypeId::Guid,
    BuiltInTypeId::ByteString,
    BuiltInTypeId::XmlElement,
    BuiltInTypeId::NodeId,
    BuiltInTypeId::ExpandedNodeId,
    BuiltInTypeId::StatusCode,
    BuiltInTypeId::QualifiedName,
    BuiltInTypeId::LocalizedText,
    BuiltInTypeId::ExtensionObject,
    BuiltInTypeId::DataValue,
    BuiltInTypeId::Variant,
];

/// Memoizing catalog of built-in type schemas for one encoding mode.
///
/// The catalog mutates its caches on every lookup and is meant to be owned
/// by a single compile session.
#[derive(Debug, Clone)]
pub struct BuiltInTypeCatalog {
    mode: EncodingMode,
    fixed_guid: bool,
    namespace: String,
    cache: HashMap<(BuiltInTypeId, SchemaRank), SchemaId>,
    encoded_body: Option<SchemaId>,
    configuration_version: Option<SchemaId>,
    extendables: HashMap<SchemaId, SchemaId>,
    data_values: HashMap<SchemaId, SchemaId>,
}

impl BuiltInTypeCatalog {
    pub fn new(mode: EncodingMode) -> Self {
        Self {
            mode,
            fixed_guid: false,
            namespace: namespace_from_uri(OPC_UA_NAMESPACE_URI),
            cache: HashMap::new(),
            encoded_body: None,
            configuration_version: None,
            extendables: HashMap::new(),
            data_values: HashMap::new(),
        }
    }

    /// Describe Guid values as 16-byte fixed blocks.
    pub fn with_fixed_guid(mut self, fixed_guid: bool) -> Self {
        self.fixed_guid = fixed_guid;
        self
    }

    pub fn mode(&self) -> EncodingMode {
        self.mode
    }

    /// Schema namespace of the built-in records, `org.opcfoundation.UA`.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Resolve an external numeric built-in type id.
    pub fn schema_for_built_in_id(
        &mut self,
        arena: &mut SchemaArena,
        id: u32,
        rank: SchemaRank,
    ) -> Result<SchemaId, SchemaError> {
        let ty = BuiltInTypeId::try_from(id)?;
        Ok(self.schema_for_built_in_type(arena, ty, rank))
    }

    pub fn schema_for_built_in_type(
        &mut self,
        arena: &mut SchemaArena,
        ty: BuiltInTypeId,
        rank: SchemaRank,
    ) -> SchemaId {
        if let Some(&id) = self.cache.get(&(ty, rank)) {
            return id;
        }

        let id = match (ty, rank) {
            (BuiltInTypeId::Null, _) => arena.null(),
            (BuiltInTypeId::Number, _) => {
                self.schema_for_built_in_type(arena, BuiltInTypeId::Double, rank)
            }
            (BuiltInTypeId::Integer, _) => {
                self.schema_for_built_in_type(arena, BuiltInTypeId::Int64, rank)
            }
            (BuiltInTypeId::UInteger, _) => {
                self.schema_for_built_in_type(arena, BuiltInTypeId::UInt64, rank)
            }
            // Byte arrays travel as one opaque blob.
            (BuiltInTypeId::Byte, SchemaRank::Collection) => {
                self.schema_for_built_in_type(arena, BuiltInTypeId::ByteString, SchemaRank::Scalar)
            }
            _ => {
                let slot = arena.reserve(self.type_name(ty, rank));
                self.cache.insert((ty, rank), slot);
                trace!(%ty, ?rank, %slot, "building built-in type schema");
                let node = match rank {
                    SchemaRank::Scalar => self.scalar(arena, ty),
                    SchemaRank::Collection => SchemaNode::Array(self.schema_for_built_in_type(
                        arena,
                        ty,
                        SchemaRank::Scalar,
                    )),
                    SchemaRank::Matrix => {
                        let item = self.schema_for_built_in_type(arena, ty, SchemaRank::Scalar);
                        let name = self.type_name(ty, rank);
                        SchemaNode::Record(self.matrix_record(arena, name, item))
                    }
                };
                arena.fill(slot, node);
                slot
            }
        };

        self.cache.insert((ty, rank), id);
        id
    }

    /// Matrix record `{Dimensions: array<int>, Body: array<item>}`.
    pub fn matrix(&mut self, arena: &mut SchemaArena, name: TypeName, item: SchemaId) -> SchemaId {
        let record = self.matrix_record(arena, name, item);
        arena.record(record)
    }

    /// `ConfigurationVersionDataType{MajorVersion, MinorVersion}`, the
    /// metadata version carried in dataset-message headers.
    pub fn configuration_version(&mut self, arena: &mut SchemaArena) -> SchemaId {
        if let Some(id) = self.configuration_version {
            return id;
        }
        let version =
            self.schema_for_built_in_type(arena, BuiltInTypeId::UInt32, SchemaRank::Scalar);
        let id = arena.record(
            RecordSchema::new(self.ua_name("ConfigurationVersionDataType"))
                .with_field("MajorVersion", version)
                .with_field("MinorVersion", version),
        );
        self.configuration_version = Some(id);
        id
    }

    /// Extension-object wrapper for a user-defined body: the encoding type id
    /// plus a body that is either absent, the decoded structure, or the raw
    /// encoded bytes. Memoized per body.
    pub fn schema_for_extendable_type(
        &mut self,
        arena: &mut SchemaArena,
        name: &str,
        namespace: Option<&str>,
        data_type_id: &NodeId,
        body: SchemaId,
    ) -> SchemaId {
        if let Some(&id) = self.extendables.get(&body) {
            return id;
        }
        let type_id =
            self.schema_for_built_in_type(arena, BuiltInTypeId::NodeId, SchemaRank::Scalar);
        let encoded = self.encoded_body(arena);
        let null = arena.null();
        let body_union = arena.union([null, body, encoded]);
        let record = RecordSchema::new(TypeName::new(name, namespace))
            .with_field("TypeId", type_id)
            .with_field("Body", body_union)
            .with_property("dataTypeId", json!(data_type_id.to_string()));
        let id = arena.record(record);
        self.extendables.insert(body, id);
        id
    }

    /// Wrapper previously built for `body` by
    /// [`schema_for_extendable_type`](Self::schema_for_extendable_type).
    pub fn extendable(&self, body: SchemaId) -> Option<SchemaId> {
        self.extendables.get(&body).copied()
    }

    /// Schema of one dataset field value: the nullable value itself, or a
    /// nullable DataValue record around it when `as_data_value` is set.
    ///
    /// Wrapper names are claimed through `names`, so two value types with the
    /// same short name get distinct wrappers.
    pub fn schema_for_data_set_field(
        &mut self,
        arena: &mut SchemaArena,
        names: &mut UniqueNameRegistry,
        namespace: Option<&str>,
        as_data_value: bool,
        value: SchemaId,
        built_in: BuiltInTypeId,
    ) -> SchemaId {
        if !as_data_value {
            return arena.nullable(value);
        }
        if self.cache.get(&(BuiltInTypeId::Variant, SchemaRank::Scalar)) == Some(&value) {
            let data_value =
                self.schema_for_built_in_type(arena, BuiltInTypeId::DataValue, SchemaRank::Scalar);
            return arena.nullable(data_value);
        }
        if let Some(&record) = self.data_values.get(&value) {
            return arena.nullable(record);
        }

        let base = TypeName::new(
            format!("{}DataValue", data_value_prefix(arena, value, built_in)),
            namespace,
        );
        let name = names.unique_type_name(base);
        let nullable_value = arena.nullable(value);
        let record = self.data_value_record(arena, name, nullable_value);
        let id = arena.record(record);
        self.data_values.insert(value, id);
        arena.nullable(id)
    }

    fn type_name(&self, ty: BuiltInTypeId, rank: SchemaRank) -> TypeName {
        TypeName::new(format!("{ty}{}", rank.suffix()), Some(self.namespace.as_str()))
    }

    fn scalar(&mut self, arena: &mut SchemaArena, ty: BuiltInTypeId) -> SchemaNode {
        use BuiltInTypeId as B;

        let json = self.mode.is_json();
        let non_reversible = self.mode.is_non_reversible();
        match ty {
            B::Boolean => primitive(PrimitiveKind::Boolean, None),
            B::SByte | B::Byte | B::Int16 | B::UInt16 | B::Int32 => {
                primitive(PrimitiveKind::Int, None)
            }
            B::UInt32 => primitive(PrimitiveKind::Long, None),
            B::Int64 if json => primitive(PrimitiveKind::String, None),
            B::Int64 => primitive(PrimitiveKind::Long, None),
            B::UInt64 if json => primitive(PrimitiveKind::String, None),
            B::UInt64 => {
                let int = self.schema_for_built_in_type(arena, B::Int32, SchemaRank::Scalar);
                let fixed = arena.fixed(self.ua_name("UInt64"), 8, None);
                SchemaNode::Union(vec![int, fixed])
            }
            B::Float => primitive(PrimitiveKind::Float, None),
            B::Double => primitive(PrimitiveKind::Double, None),
            B::String | B::XmlElement => primitive(PrimitiveKind::String, None),
            B::DateTime if json => primitive(PrimitiveKind::String, Some(LogicalType::DateTime)),
            B::DateTime => primitive(PrimitiveKind::Long, Some(LogicalType::TimestampMicros)),
            B::Guid if self.fixed_guid => SchemaNode::Fixed(FixedSchema {
                name: self.ua_name("Guid"),
                size: 16,
                logical: Some(LogicalType::Uuid),
            }),
            B::Guid => primitive(PrimitiveKind::String, Some(LogicalType::Uuid)),
            B::ByteString if json => primitive(PrimitiveKind::String, Some(LogicalType::Base64)),
            B::ByteString => primitive(PrimitiveKind::Bytes, None),
            B::NodeId => SchemaNode::Record(self.node_id_record(arena, false)),
            B::ExpandedNodeId => SchemaNode::Record(self.node_id_record(arena, true)),
            B::StatusCode if non_reversible || self.mode.is_legacy() => {
                let code = self.schema_for_built_in_type(arena, B::UInt32, SchemaRank::Scalar);
                let symbol = self.nullable_built_in(arena, B::String);
                SchemaNode::Record(
                    RecordSchema::new(self.ua_name("StatusCode"))
                        .with_field("Code", code)
                        .with_field("Symbol", symbol),
                )
            }
            B::StatusCode => primitive(PrimitiveKind::Long, None),
            B::QualifiedName => {
                let name = self.schema_for_built_in_type(arena, B::String, SchemaRank::Scalar);
                let uri = self.namespace_schema(arena);
                SchemaNode::Record(
                    RecordSchema::new(self.ua_name("QualifiedName"))
                        .with_field("Name", name)
                        .with_field("Uri", uri),
                )
            }
            B::LocalizedText if non_reversible => primitive(PrimitiveKind::String, None),
            B::LocalizedText => {
                let text = self.nullable_built_in(arena, B::String);
                SchemaNode::Record(
                    RecordSchema::new(self.ua_name("LocalizedText"))
                        .with_field("Locale", text)
                        .with_field("Text", text),
                )
            }
            B::ExtensionObject => {
                let type_id = self.schema_for_built_in_type(arena, B::NodeId, SchemaRank::Scalar);
                let encoded = self.encoded_body(arena);
                let body = arena.nullable(encoded);
                SchemaNode::Record(
                    RecordSchema::new(self.ua_name("ExtensionObject"))
                        .with_field("TypeId", type_id)
                        .with_field("Body", body),
                )
            }
            // Variant already admits null.
            B::DataValue => {
                let variant = self.schema_for_built_in_type(arena, B::Variant, SchemaRank::Scalar);
                let name = self.ua_name("DataValue");
                SchemaNode::Record(self.data_value_record(arena, name, variant))
            }
            B::Variant => SchemaNode::Union(self.variant_members(arena)),
            B::DiagnosticInfo => SchemaNode::Record(self.diagnostic_info_record(arena)),
            B::Enumeration if non_reversible => primitive(PrimitiveKind::String, None),
            B::Enumeration => primitive(PrimitiveKind::Int, None),
            B::Null | B::Number | B::Integer | B::UInteger => {
                unreachable!("{ty} resolves to another entry before a slot is reserved")
            }
        }
    }

    fn ua_name(&self, name: &str) -> TypeName {
        TypeName::new(name, Some(self.namespace.as_str()))
    }

    fn nullable_built_in(&mut self, arena: &mut SchemaArena, ty: BuiltInTypeId) -> SchemaId {
        let id = self.schema_for_built_in_type(arena, ty, SchemaRank::Scalar);
        arena.nullable(id)
    }

    /// Namespace reference inside node ids and qualified names: the numeric
    /// index, or the namespace URI text in non-reversible JSON.
    fn namespace_schema(&mut self, arena: &mut SchemaArena) -> SchemaId {
        let ty = if self.mode.is_non_reversible() {
            BuiltInTypeId::String
        } else {
            BuiltInTypeId::Int32
        };
        self.schema_for_built_in_type(arena, ty, SchemaRank::Scalar)
    }

    fn node_id_record(&mut self, arena: &mut SchemaArena, expanded: bool) -> RecordSchema {
        use BuiltInTypeId as B;

        let id_type = self.schema_for_built_in_type(arena, B::Int32, SchemaRank::Scalar);
        let mut id_members = vec![
            self.schema_for_built_in_type(arena, B::UInt32, SchemaRank::Scalar),
            self.schema_for_built_in_type(arena, B::String, SchemaRank::Scalar),
        ];
        if !self.mode.is_json() {
            let bytes = self.schema_for_built_in_type(arena, B::ByteString, SchemaRank::Scalar);
            id_members.push(bytes);
        }
        let id = arena.union(id_members);
        let namespace = self.namespace_schema(arena);

        let name = if expanded { "ExpandedNodeId" } else { "NodeId" };
        let mut record = RecordSchema::new(self.ua_name(name))
            .with_field("IdType", id_type)
            .with_field("Id", id)
            .with_field("Namespace", namespace);
        if expanded {
            let server = if self.mode.is_non_reversible() {
                B::String
            } else {
                B::UInt32
            };
            let server = self.schema_for_built_in_type(arena, server, SchemaRank::Scalar);
            record = record.with_field("ServerUri", server);
        }
        record
    }

    fn encoded_body(&mut self, arena: &mut SchemaArena) -> SchemaId {
        if let Some(id) = self.encoded_body {
            return id;
        }
        let encoding = arena.enumeration(EnumSchema {
            name: self.ua_name("ExtensionObjectEncoding"),
            doc: None,
            symbols: ["Binary", "Xml", "Json"].map(String::from).to_vec(),
        });
        let data =
            self.schema_for_built_in_type(arena, BuiltInTypeId::ByteString, SchemaRank::Scalar);
        let id = arena.record(
            RecordSchema::new(self.ua_name("EncodedBody"))
                .with_field("Encoding", encoding)
                .with_field("Data", data),
        );
        self.encoded_body = Some(id);
        id
    }

    fn data_value_record(
        &mut self,
        arena: &mut SchemaArena,
        name: TypeName,
        value: SchemaId,
    ) -> RecordSchema {
        use BuiltInTypeId as B;

        let status = self.nullable_built_in(arena, B::StatusCode);
        let timestamp = self.nullable_built_in(arena, B::DateTime);
        let picoseconds = self.nullable_built_in(arena, B::UInt16);
        RecordSchema::new(name)
            .with_field("Value", value)
            .with_field("Status", status)
            .with_field("SourceTimestamp", timestamp)
            .with_field("SourcePicoseconds", picoseconds)
            .with_field("ServerTimestamp", timestamp)
            .with_field("ServerPicoseconds", picoseconds)
    }

    fn variant_members(&mut self, arena: &mut SchemaArena) -> Vec<SchemaId> {
        let namespace = format!("{}.Variant", self.namespace);
        let mut members = vec![arena.null()];
        for ty in VARIANT_TYPES {
            for rank in SchemaRank::ALL {
                if matches!(
                    (ty, rank),
                    (BuiltInTypeId::Byte, SchemaRank::Collection)
                        | (BuiltInTypeId::Variant, SchemaRank::Scalar)
                ) {
                    continue;
                }
                let value = self.schema_for_built_in_type(arena, ty, rank);
                let name =
                    TypeName::new(format!("{ty}{}", rank.suffix()), Some(namespace.as_str()));
                members.push(arena.record(RecordSchema::new(name).with_field("Value", value)));
            }
        }
        members
    }

    fn diagnostic_info_record(&mut self, arena: &mut SchemaArena) -> RecordSchema {
        use BuiltInTypeId as B;

        let index = self.nullable_built_in(arena, B::Int32);
        let info = self.nullable_built_in(arena, B::String);
        let status = self.nullable_built_in(arena, B::StatusCode);
        // Resolves to the reserved slot of the record being built.
        let inner = self.nullable_built_in(arena, B::DiagnosticInfo);
        RecordSchema::new(self.ua_name("DiagnosticInfo"))
            .with_field("SymbolicId", index)
            .with_field("NamespaceUri", index)
            .with_field("Locale", index)
            .with_field("LocalizedText", index)
            .with_field("AdditionalInfo", info)
            .with_field("InnerStatusCode", status)
            .with_field("InnerDiagnosticInfo", inner)
    }

    fn matrix_record(
        &mut self,
        arena: &mut SchemaArena,
        name: TypeName,
        item: SchemaId,
    ) -> RecordSchema {
        let int = self.schema_for_built_in_type(arena, BuiltInTypeId::Int32, SchemaRank::Scalar);
        let dimensions = arena.array(int);
        let body = arena.array(item);
        RecordSchema::new(name)
            .with_field("Dimensions", dimensions)
            .with_field("Body", body)
    }
}

fn primitive(kind: PrimitiveKind, logical: Option<LogicalType>) -> SchemaNode {
    SchemaNode::Primitive(PrimitiveSchema { kind, logical })
}

/// Name prefix of a DataValue wrapper: the value's own type name when it has
/// one, otherwise the built-in type it was compiled from.
fn data_value_prefix(arena: &SchemaArena, value: SchemaId, built_in: BuiltInTypeId) -> String {
    let view = arena.view(value).non_null();
    if let Some(name) = view.name() {
        return name.to_string();
    }
    if let Some(item) = view.items() {
        let item = item.non_null();
        return match item.name() {
            Some(name) => format!("{name}Collection"),
            None => format!("{built_in}Collection"),
        };
    }
    built_in.to_string()
}
