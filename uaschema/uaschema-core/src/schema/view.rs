use std::fmt::{Display, Formatter, Result};

use super::{
    PrimitiveSchema, RecordSchema, SchemaArena, SchemaField, SchemaId, SchemaNode, TypeName,
};

/// Borrowed handle on one node of a [`SchemaArena`] for read-only navigation.
#[derive(Debug, Clone, Copy)]
pub struct SchemaView<'a> {
    arena: &'a SchemaArena,
    id: SchemaId,
}

/// A record field together with a view on its schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    pub field: &'a SchemaField,
    pub schema: SchemaView<'a>,
}

impl<'a> FieldView<'a> {
    pub fn name(&self) -> &'a str {
        &self.field.name
    }

    pub fn position(&self) -> usize {
        self.field.position
    }
}

impl<'a> SchemaView<'a> {
    pub(crate) fn new(arena: &'a SchemaArena, id: SchemaId) -> Self {
        Self { arena, id }
    }

    pub fn id(&self) -> SchemaId {
        self.id
    }

    pub fn arena(&self) -> &'a SchemaArena {
        self.arena
    }

    pub fn node(&self) -> &'a SchemaNode {
        self.arena.node(self.id)
    }

    pub fn type_name(&self) -> &'static str {
        self.node().type_name()
    }

    /// Name of a named node.
    pub fn named(&self) -> Option<&'a TypeName> {
        self.node().named()
    }

    /// Short name of a named node.
    pub fn name(&self) -> Option<&'a str> {
        self.named().map(|n| n.name.as_str())
    }

    pub fn is_null(&self) -> bool {
        matches!(self.node(), SchemaNode::Null)
    }

    pub fn is_nullable(&self) -> bool {
        self.arena.is_nullable(self.id)
    }

    /// For a `[null, T]` union returns `T`; any other node is returned as is.
    pub fn non_null(&self) -> SchemaView<'a> {
        match self.node() {
            SchemaNode::Union(members) if members.len() == 2 && self.is_nullable() => {
                self.arena.view(members[1])
            }
            _ => *self,
        }
    }

    pub fn as_record(&self) -> Option<&'a RecordSchema> {
        match self.node() {
            SchemaNode::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_primitive(&self) -> Option<&'a PrimitiveSchema> {
        match self.node() {
            SchemaNode::Primitive(p) => Some(p),
            _ => None,
        }
    }

    /// Record fields in position order; empty for non-record nodes.
    pub fn fields(&self) -> Vec<FieldView<'a>> {
        self.as_record()
            .map(|r| {
                r.fields
                    .iter()
                    .map(|field| FieldView {
                        field,
                        schema: self.arena.view(field.schema),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn field(&self, name: &str) -> Option<FieldView<'a>> {
        self.fields().into_iter().find(|f| f.name() == name)
    }

    pub fn field_names(&self) -> Vec<&'a str> {
        self.fields().iter().map(|f| f.name()).collect()
    }

    /// Union members; empty for non-union nodes.
    pub fn members(&self) -> Vec<SchemaView<'a>> {
        match self.node() {
            SchemaNode::Union(members) => members.iter().map(|&m| self.arena.view(m)).collect(),
            _ => Vec::new(),
        }
    }

    /// Array item schema.
    pub fn items(&self) -> Option<SchemaView<'a>> {
        match self.node() {
            SchemaNode::Array(item) => Some(self.arena.view(*item)),
            _ => None,
        }
    }

    /// Map value schema.
    pub fn values(&self) -> Option<SchemaView<'a>> {
        match self.node() {
            SchemaNode::Map(values) => Some(self.arena.view(*values)),
            _ => None,
        }
    }

    pub fn symbols(&self) -> Option<&'a [String]> {
        match self.node() {
            SchemaNode::Enum(e) => Some(&e.symbols),
            _ => None,
        }
    }
}

impl Display for SchemaView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = super::format_schema(*self)?;
        f.write_str(&text)
    }
}
