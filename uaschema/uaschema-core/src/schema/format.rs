use std::{
    collections::HashSet,
    fmt::{Error, Result, Write as _},
};

use super::{SchemaNode, SchemaView};

/// Format a schema graph in a readable outline style:
/// leaf types are rendered in one line, compound types are pretty-printed.
/// A named type is expanded at its first occurrence and shown as a `ref`
/// afterwards, which also terminates recursive types.
pub fn format_schema(view: SchemaView<'_>) -> std::result::Result<String, Error> {
    let mut out = String::new();
    let mut seen = HashSet::new();
    let (inner, nullable) = split_nullable(view);
    if is_leaf(inner) {
        writeln!(out, "type: {}", leaf_text(inner))?;
        writeln!(out, "nullable: {nullable}")?;
    } else {
        format_data_type(inner, nullable, 0, &mut seen, &mut out)?;
    }
    Ok(out)
}

fn format_data_type(
    view: SchemaView<'_>,
    nullable: bool,
    indent: usize,
    seen: &mut HashSet<String>,
    out: &mut String,
) -> Result {
    let pad = " ".repeat(indent);
    writeln!(out, "{pad}type: {}", view.type_name())?;
    if let Some(name) = view.named() {
        seen.insert(name.full_name());
        writeln!(out, "{pad}name: {name}")?;
    }
    writeln!(out, "{pad}nullable: {nullable}")?;

    match view.node() {
        SchemaNode::Record(_) => {
            writeln!(out, "{pad}fields:")?;
            for field in view.fields() {
                format_labeled_type(field.name(), field.schema, indent + 4, seen, out)?;
            }
        }
        SchemaNode::Union(_) => {
            writeln!(out, "{pad}members:")?;
            for (index, member) in view.members().into_iter().enumerate() {
                format_labeled_type(&index.to_string(), member, indent + 4, seen, out)?;
            }
        }
        SchemaNode::Array(_) => {
            if let Some(item) = view.items() {
                format_labeled_type("item", item, indent, seen, out)?;
            }
        }
        SchemaNode::Map(_) => {
            if let Some(values) = view.values() {
                format_labeled_type("value", values, indent, seen, out)?;
            }
        }
        SchemaNode::Enum(e) => {
            writeln!(out, "{pad}symbols: [{}]", e.symbols.join(", "))?;
        }
        SchemaNode::Fixed(f) => {
            writeln!(out, "{pad}size: {}", f.size)?;
        }
        other => unreachable!("{other:?} is not a compound type"),
    }

    Ok(())
}

fn format_labeled_type(
    label: &str,
    view: SchemaView<'_>,
    indent: usize,
    seen: &mut HashSet<String>,
    out: &mut String,
) -> Result {
    let pad = " ".repeat(indent);
    let (inner, nullable) = split_nullable(view);
    if let Some(name) = inner.named().filter(|n| seen.contains(&n.full_name())) {
        writeln!(out, "{pad}{label}: {{ ref: {name}, nullable: {nullable} }}")?;
    } else if is_leaf(inner) {
        writeln!(
            out,
            "{pad}{label}: {{ type: {}, nullable: {nullable} }}",
            leaf_text(inner)
        )?;
    } else {
        writeln!(out, "{pad}{label}:")?;
        format_data_type(inner, nullable, indent + 4, seen, out)?;
    }
    Ok(())
}

fn split_nullable(view: SchemaView<'_>) -> (SchemaView<'_>, bool) {
    let inner = view.non_null();
    (inner, view.is_nullable())
}

fn is_leaf(view: SchemaView<'_>) -> bool {
    matches!(
        view.node(),
        SchemaNode::Null | SchemaNode::Primitive(_) | SchemaNode::Placeholder(_)
    )
}

fn leaf_text(view: SchemaView<'_>) -> String {
    match view.node() {
        SchemaNode::Primitive(p) => match p.logical {
            Some(logical) => format!("{} ({})", p.kind.as_str(), logical.as_str()),
            None => p.kind.as_str().to_string(),
        },
        SchemaNode::Placeholder(name) => format!("placeholder {name}"),
        other => other.type_name().to_string(),
    }
}
