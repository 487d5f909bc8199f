use std::collections::{HashMap, HashSet};

use super::{
    EnumSchema, FixedSchema, LogicalType, PrimitiveKind, PrimitiveSchema, RecordSchema,
    SchemaId, SchemaNode, SchemaView, TypeName,
};
use crate::error::SchemaError;

/// Owning store for the nodes of one schema graph.
///
/// Nodes are never removed; ids stay valid for the arena's lifetime. Slots
/// reserved with [`reserve`](Self::reserve) are overwritten in place by
/// [`fill`](Self::fill), so every node that captured the reserved id observes
/// the completed node without a rewrite pass.
#[derive(Debug, Clone)]
pub struct SchemaArena {
    nodes: Vec<SchemaNode>,
    null: SchemaId,
    unions: HashMap<Vec<SchemaId>, SchemaId>,
    nullables: HashMap<SchemaId, SchemaId>,
}

impl Default for SchemaArena {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaArena {
    pub fn new() -> Self {
        Self {
            nodes: vec![SchemaNode::Null],
            null: SchemaId(0),
            unions: HashMap::new(),
            nullables: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node stored under `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was produced by a different arena and is out of range.
    pub fn node(&self, id: SchemaId) -> &SchemaNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: SchemaId) -> Option<&SchemaNode> {
        self.nodes.get(id.0)
    }

    pub fn view(&self, id: SchemaId) -> SchemaView<'_> {
        SchemaView::new(self, id)
    }

    /// The shared null node.
    pub fn null(&self) -> SchemaId {
        self.null
    }

    /// Store a node. Null and union nodes are routed through the shared null
    /// node and the union normalization respectively.
    pub fn add(&mut self, node: SchemaNode) -> SchemaId {
        match node {
            SchemaNode::Null => self.null,
            SchemaNode::Union(members) => self.union(members),
            other => self.push(other),
        }
    }

    pub fn primitive(&mut self, kind: PrimitiveKind) -> SchemaId {
        self.push(SchemaNode::Primitive(PrimitiveSchema {
            kind,
            logical: None,
        }))
    }

    pub fn logical(&mut self, kind: PrimitiveKind, logical: LogicalType) -> SchemaId {
        self.push(SchemaNode::Primitive(PrimitiveSchema {
            kind,
            logical: Some(logical),
        }))
    }

    pub fn fixed(&mut self, name: TypeName, size: usize, logical: Option<LogicalType>) -> SchemaId {
        self.push(SchemaNode::Fixed(FixedSchema {
            name,
            size,
            logical,
        }))
    }

    pub fn record(&mut self, record: RecordSchema) -> SchemaId {
        self.push(SchemaNode::Record(record))
    }

    pub fn enumeration(&mut self, schema: EnumSchema) -> SchemaId {
        self.push(SchemaNode::Enum(schema))
    }

    pub fn array(&mut self, item: SchemaId) -> SchemaId {
        self.push(SchemaNode::Array(item))
    }

    pub fn map(&mut self, values: SchemaId) -> SchemaId {
        self.push(SchemaNode::Map(values))
    }

    /// Reserve a slot for a type whose body is not built yet.
    pub fn reserve(&mut self, name: TypeName) -> SchemaId {
        self.push(SchemaNode::Placeholder(name))
    }

    pub fn is_placeholder(&self, id: SchemaId) -> bool {
        matches!(self.node(id), SchemaNode::Placeholder(_))
    }

    /// Backfill a reserved slot with its completed node.
    pub fn fill(&mut self, id: SchemaId, node: SchemaNode) {
        debug_assert!(self.is_placeholder(id), "slot {id} is not a placeholder");
        let node = match node {
            SchemaNode::Union(members) => {
                let members = self.normalize_members(members);
                self.unions.entry(members.clone()).or_insert(id);
                SchemaNode::Union(members)
            }
            other => other,
        };
        self.nodes[id.0] = node;
    }

    /// Build a union over `members`.
    ///
    /// Nested unions are flattened, duplicates removed and null moved to the
    /// front. A single remaining member is returned as is, an empty member
    /// list yields null. Identical member lists share one union node.
    pub fn union(&mut self, members: impl IntoIterator<Item = SchemaId>) -> SchemaId {
        let members = self.normalize_members(members);
        match members.len() {
            0 => self.null,
            1 => members[0],
            _ => {
                if let Some(&id) = self.unions.get(&members) {
                    return id;
                }
                let id = self.push(SchemaNode::Union(members.clone()));
                self.unions.insert(members, id);
                id
            }
        }
    }

    /// Union of null and `id`. Idempotent: a node that already admits null
    /// is returned unchanged.
    ///
    /// A placeholder is treated as non-null, so it must not later be filled
    /// with a union.
    pub fn nullable(&mut self, id: SchemaId) -> SchemaId {
        if let Some(&known) = self.nullables.get(&id) {
            return known;
        }
        let result = if self.is_nullable(id) {
            id
        } else {
            let null = self.null;
            self.union([null, id])
        };
        self.nullables.insert(id, result);
        result
    }

    pub fn is_nullable(&self, id: SchemaId) -> bool {
        match self.node(id) {
            SchemaNode::Null => true,
            SchemaNode::Union(members) => members.first() == Some(&self.null),
            _ => false,
        }
    }

    /// Check that no placeholder is reachable from `root`.
    pub fn verify(&self, root: SchemaId) -> Result<(), SchemaError> {
        let mut visited = HashSet::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let node = self.node(id);
            if let SchemaNode::Placeholder(name) = node {
                return Err(SchemaError::PlaceholderLeaked {
                    name: name.full_name(),
                });
            }
            stack.extend(node.children());
        }
        Ok(())
    }

    fn push(&mut self, node: SchemaNode) -> SchemaId {
        let id = SchemaId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn normalize_members(&self, members: impl IntoIterator<Item = SchemaId>) -> Vec<SchemaId> {
        let mut has_null = false;
        let mut out: Vec<SchemaId> = Vec::new();
        let mut add = |id: SchemaId, out: &mut Vec<SchemaId>| {
            if id == self.null {
                has_null = true;
            } else if !out.contains(&id) {
                out.push(id);
            }
        };
        for id in members {
            match self.node(id) {
                SchemaNode::Union(inner) => {
                    for &member in inner {
                        add(member, &mut out);
                    }
                }
                _ => add(id, &mut out),
            }
        }
        if has_null {
            out.insert(0, self.null);
        }
        out
    }
}
