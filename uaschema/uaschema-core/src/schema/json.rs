//! Avro-style JSON rendering of a schema graph.
//!
//! Named types are defined at their first occurrence and referenced by full
//! name afterwards, which is what makes recursive graphs finite. A full name
//! must belong to a single node; two distinct nodes sharing one is an error. The
//! [`TextForm::Canonical`] output follows the parsing canonical form: full
//! names only, no documentation, logical types, defaults or custom
//! properties, attributes ordered `name`, `type`, `fields`, `symbols`,
//! `items`, `values`, `size`, no whitespace.

use std::collections::{HashMap, HashSet, hash_map::Entry};

use serde_json::{Map, Value, json};

use super::{SchemaArena, SchemaId, SchemaNode};
use crate::error::SchemaError;

/// Which textual form to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextForm {
    /// Everything: namespaces, docs, logical types, defaults, properties.
    Full,
    /// Parsing canonical form used for fingerprints.
    Canonical,
}

/// Render the graph rooted at `root` as a JSON value.
pub fn to_json_value(
    arena: &SchemaArena,
    root: SchemaId,
    form: TextForm,
) -> Result<Value, SchemaError> {
    let mut writer = JsonWriter {
        arena,
        form,
        defined: HashMap::new(),
    };
    writer.write(root, &mut HashSet::new())
}

struct JsonWriter<'a> {
    arena: &'a SchemaArena,
    form: TextForm,
    /// Full names already written, with the node that owns each name.
    defined: HashMap<String, SchemaId>,
}

impl<'a> JsonWriter<'a> {
    /// `unnamed` holds the unnamed compound nodes entered since the last
    /// named definition; meeting one again means the graph has no finite text.
    fn write(
        &mut self,
        id: SchemaId,
        unnamed: &mut HashSet<SchemaId>,
    ) -> Result<Value, SchemaError> {
        let arena = self.arena;
        let node = arena.node(id);
        if let Some(name) = node.named() {
            let full_name = name.full_name();
            if let SchemaNode::Placeholder(_) = node {
                return Err(SchemaError::PlaceholderLeaked { name: full_name });
            }
            return match self.defined.entry(full_name.clone()) {
                Entry::Occupied(entry) if *entry.get() == id => Ok(Value::String(full_name)),
                Entry::Occupied(entry) => Err(SchemaError::NameConflict {
                    name: full_name,
                    first: *entry.get(),
                    second: id,
                }),
                Entry::Vacant(entry) => {
                    entry.insert(id);
                    self.write_named(node, full_name)
                }
            };
        }

        match node {
            SchemaNode::Null => Ok(Value::String("null".into())),
            SchemaNode::Primitive(p) => Ok(match (self.form, p.logical) {
                (TextForm::Full, Some(logical)) => json!({
                    "type": p.kind.as_str(),
                    "logicalType": logical.as_str(),
                }),
                _ => Value::String(p.kind.as_str().into()),
            }),
            SchemaNode::Union(members) => {
                self.enter(id, unnamed)?;
                let members = members
                    .iter()
                    .map(|&m| self.write(m, unnamed))
                    .collect::<Result<Vec<_>, _>>()?;
                unnamed.remove(&id);
                Ok(Value::Array(members))
            }
            SchemaNode::Array(item) => {
                self.enter(id, unnamed)?;
                let items = self.write(*item, unnamed)?;
                unnamed.remove(&id);
                Ok(json!({ "type": "array", "items": items }))
            }
            SchemaNode::Map(values) => {
                self.enter(id, unnamed)?;
                let values = self.write(*values, unnamed)?;
                unnamed.remove(&id);
                Ok(json!({ "type": "map", "values": values }))
            }
            SchemaNode::Fixed(_)
            | SchemaNode::Record(_)
            | SchemaNode::Enum(_)
            | SchemaNode::Placeholder(_) => unreachable!("named nodes are handled above"),
        }
    }

    fn enter(&self, id: SchemaId, unnamed: &mut HashSet<SchemaId>) -> Result<(), SchemaError> {
        if unnamed.insert(id) {
            Ok(())
        } else {
            Err(SchemaError::UnnamedCycle { id })
        }
    }

    fn write_named(
        &mut self,
        node: &'a SchemaNode,
        full_name: String,
    ) -> Result<Value, SchemaError> {
        let canonical = self.form == TextForm::Canonical;
        let mut out = Map::new();
        let name = node.named().map(|n| (n.name.clone(), n.namespace.clone()));
        if canonical {
            out.insert("name".into(), Value::String(full_name));
            out.insert("type".into(), Value::String(node.type_name().into()));
        } else {
            out.insert("type".into(), Value::String(node.type_name().into()));
            if let Some((short, namespace)) = name {
                out.insert("name".into(), Value::String(short));
                if let Some(ns) = namespace {
                    out.insert("namespace".into(), Value::String(ns));
                }
            }
        }

        match node {
            SchemaNode::Record(record) => {
                if let (false, Some(doc)) = (canonical, &record.doc) {
                    out.insert("doc".into(), Value::String(doc.clone()));
                }
                let mut fields = Vec::with_capacity(record.fields.len());
                for field in &record.fields {
                    // A named definition starts a fresh unnamed-cycle scope.
                    let schema = self.write(field.schema, &mut HashSet::new())?;
                    let mut entry = Map::new();
                    entry.insert("name".into(), Value::String(field.name.clone()));
                    entry.insert("type".into(), schema);
                    if !canonical {
                        if let Some(doc) = &field.doc {
                            entry.insert("doc".into(), Value::String(doc.clone()));
                        }
                        if let Some(default) = &field.default {
                            entry.insert("default".into(), default.clone());
                        }
                        if !field.aliases.is_empty() {
                            entry.insert("aliases".into(), json!(field.aliases));
                        }
                    }
                    fields.push(Value::Object(entry));
                }
                out.insert("fields".into(), Value::Array(fields));
                if !canonical {
                    for (key, value) in &record.properties {
                        out.insert(key.clone(), value.clone());
                    }
                }
            }
            SchemaNode::Enum(schema) => {
                if let (false, Some(doc)) = (canonical, &schema.doc) {
                    out.insert("doc".into(), Value::String(doc.clone()));
                }
                out.insert("symbols".into(), json!(schema.symbols));
                if let (false, Some(first)) = (canonical, schema.symbols.first()) {
                    out.insert("default".into(), Value::String(first.clone()));
                }
            }
            SchemaNode::Fixed(fixed) => {
                out.insert("size".into(), json!(fixed.size));
                if let (false, Some(logical)) = (canonical, fixed.logical) {
                    out.insert("logicalType".into(), Value::String(logical.as_str().into()));
                }
            }
            other => unreachable!("{other:?} is not a named definition"),
        }

        Ok(Value::Object(out))
    }
}
