//! Type-name escaping and per-compile name disambiguation.

use std::collections::HashSet;

use crate::schema::TypeName;

/// Set of names already assigned during one compile.
///
/// Collisions are resolved by appending the smallest positive integer suffix
/// that is not taken yet, so `Foo` is followed by `Foo1`, `Foo2`, ...
#[derive(Debug, Clone, Default)]
pub struct UniqueNameRegistry {
    names: HashSet<String>,
}

impl UniqueNameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Claim `base`, or the first free `base<N>` with `N >= 1`.
    pub fn unique(&mut self, base: &str) -> String {
        if self.names.insert(base.to_string()) {
            return base.to_string();
        }
        let mut suffix = 1usize;
        loop {
            let candidate = format!("{base}{suffix}");
            if self.names.insert(candidate.clone()) {
                return candidate;
            }
            suffix += 1;
        }
    }

    /// Claim the full name of `name`. On a collision the numeric suffix is
    /// appended to the short name and the namespace is kept.
    pub fn unique_type_name(&mut self, name: TypeName) -> TypeName {
        let full_name = name.full_name();
        let unique = self.unique(&full_name);
        match unique.strip_prefix(full_name.as_str()) {
            Some(suffix) if !suffix.is_empty() => {
                TypeName::new(format!("{}{suffix}", name.name), name.namespace.as_deref())
            }
            _ => name,
        }
    }
}

/// Escape `name` into a valid schema identifier (`[A-Za-z_][A-Za-z0-9_]*`).
///
/// Disallowed characters become `_x<HEX>_`; a leading digit gets a `_`
/// prefix and the empty string becomes `_`.
pub fn escape_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else {
            out.push_str(&format!("_x{:X}_", c as u32));
        }
    }
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Derive a dotted schema namespace from a namespace URI.
///
/// `http://opcfoundation.org/UA/DI/` becomes `org.opcfoundation.UA.DI`: the
/// host labels are reversed, path segments appended, each part escaped.
/// URNs keep their colon-separated segments in order.
pub fn namespace_from_uri(uri: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if let Some((_, rest)) = uri.split_once("://") {
        let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
        let host = authority.rsplit('@').next().unwrap_or(authority);
        let host = host.split(':').next().unwrap_or(host);
        parts.extend(host.split('.').rev());
        parts.extend(path.split(['/', ':']));
    } else {
        let rest = uri.strip_prefix("urn:").unwrap_or(uri);
        parts.extend(rest.split(['/', ':']));
    }
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .map(escape_name)
        .collect::<Vec<_>>()
        .join(".")
}
