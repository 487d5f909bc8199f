use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result},
};

use serde_json::Value as JsonValue;

/// Index of a node inside a [`SchemaArena`](super::SchemaArena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(pub(crate) usize);

impl SchemaId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for SchemaId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "#{}", self.0)
    }
}

/// Name of a named schema type (record, enum, fixed or placeholder).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName {
    pub name: String,
    pub namespace: Option<String>,
}

impl TypeName {
    pub fn new(name: impl Into<String>, namespace: Option<&str>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_string),
        }
    }

    /// Dotted `namespace.name`, or the bare name when there is no namespace.
    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(&self.full_name())
    }
}

/// Primitive base kinds of the structural schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
}

impl PrimitiveKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Bytes => "bytes",
            PrimitiveKind::String => "string",
        }
    }
}

/// Logical annotation refining how a primitive or fixed value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    /// RFC 4122 UUID, as text or as 16 raw bytes.
    Uuid,
    /// Microseconds since the Unix epoch.
    TimestampMicros,
    /// ISO 8601 date-time text.
    DateTime,
    /// Base64 text carrying raw bytes.
    Base64,
}

impl LogicalType {
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalType::Uuid => "uuid",
            LogicalType::TimestampMicros => "timestamp-micros",
            LogicalType::DateTime => "date-time",
            LogicalType::Base64 => "base64",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveSchema {
    pub kind: PrimitiveKind,
    pub logical: Option<LogicalType>,
}

/// Named fixed-size byte block.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedSchema {
    pub name: TypeName,
    pub size: usize,
    pub logical: Option<LogicalType>,
}

/// A field of a [`RecordSchema`].
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    pub name: String,
    pub schema: SchemaId,
    pub position: usize,
    pub doc: Option<String>,
    pub aliases: Vec<String>,
    pub default: Option<JsonValue>,
}

impl SchemaField {
    pub fn new(name: impl Into<String>, schema: SchemaId) -> Self {
        Self {
            name: name.into(),
            schema,
            position: 0,
            doc: None,
            aliases: Vec::new(),
            default: None,
        }
    }

    pub fn with_doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc.filter(|d| !d.is_empty());
        self
    }
}

/// Named record with ordered fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    pub name: TypeName,
    pub doc: Option<String>,
    pub fields: Vec<SchemaField>,
    /// Custom attributes rendered into the full text form only.
    pub properties: BTreeMap<String, JsonValue>,
}

impl RecordSchema {
    pub fn new(name: TypeName) -> Self {
        Self {
            name,
            doc: None,
            fields: Vec::new(),
            properties: BTreeMap::new(),
        }
    }

    /// Append a field, assigning the next 0-based position.
    pub fn push(&mut self, mut field: SchemaField) {
        field.position = self.fields.len();
        self.fields.push(field);
    }

    /// Builder-style [`push`](Self::push) for a plain named field.
    pub fn with_field(mut self, name: impl Into<String>, schema: SchemaId) -> Self {
        self.push(SchemaField::new(name, schema));
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Named enumeration of symbols. The first symbol is the default.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumSchema {
    pub name: TypeName,
    pub doc: Option<String>,
    pub symbols: Vec<String>,
}

/// One node of the schema graph. Children are referenced by [`SchemaId`].
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Null,
    Primitive(PrimitiveSchema),
    Fixed(FixedSchema),
    Record(RecordSchema),
    Enum(EnumSchema),
    /// Ordered members; when nullable, null is the first member.
    Union(Vec<SchemaId>),
    Array(SchemaId),
    /// String-keyed map.
    Map(SchemaId),
    /// Reserved slot used while a recursive type is being built.
    Placeholder(TypeName),
}

impl SchemaNode {
    pub fn type_name(&self) -> &'static str {
        match self {
            SchemaNode::Null => "null",
            SchemaNode::Primitive(p) => p.kind.as_str(),
            SchemaNode::Fixed(_) => "fixed",
            SchemaNode::Record(_) => "record",
            SchemaNode::Enum(_) => "enum",
            SchemaNode::Union(_) => "union",
            SchemaNode::Array(_) => "array",
            SchemaNode::Map(_) => "map",
            SchemaNode::Placeholder(_) => "placeholder",
        }
    }

    /// Name of named nodes (records, enums, fixed and placeholders).
    pub fn named(&self) -> Option<&TypeName> {
        match self {
            SchemaNode::Fixed(f) => Some(&f.name),
            SchemaNode::Record(r) => Some(&r.name),
            SchemaNode::Enum(e) => Some(&e.name),
            SchemaNode::Placeholder(n) => Some(n),
            _ => None,
        }
    }

    /// Ids of the direct children, in declaration order.
    pub fn children(&self) -> Vec<SchemaId> {
        match self {
            SchemaNode::Record(r) => r.fields.iter().map(|f| f.schema).collect(),
            SchemaNode::Union(members) => members.clone(),
            SchemaNode::Array(item) | SchemaNode::Map(item) => vec![*item],
            _ => Vec::new(),
        }
    }
}
