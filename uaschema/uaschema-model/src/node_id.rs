use std::{fmt, str::FromStr};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ModelError;

/// Identifier part of a [`NodeId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Identifier {
    Numeric(u32),
    String(String),
    Guid(Uuid),
    Opaque(Vec<u8>),
}

/// OPC UA node id, written as `ns=<index>;<i|s|g|b>=<identifier>`.
///
/// The `ns=0;` prefix is omitted for namespace 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId {
    pub namespace: u16,
    pub identifier: Identifier,
}

impl NodeId {
    pub fn numeric(namespace: u16, id: u32) -> Self {
        Self {
            namespace,
            identifier: Identifier::Numeric(id),
        }
    }

    pub fn string(namespace: u16, id: impl Into<String>) -> Self {
        Self {
            namespace,
            identifier: Identifier::String(id.into()),
        }
    }

    pub fn guid(namespace: u16, id: Uuid) -> Self {
        Self {
            namespace,
            identifier: Identifier::Guid(id),
        }
    }

    pub fn opaque(namespace: u16, id: impl Into<Vec<u8>>) -> Self {
        Self {
            namespace,
            identifier: Identifier::Opaque(id.into()),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace != 0 {
            write!(f, "ns={};", self.namespace)?;
        }
        match &self.identifier {
            Identifier::Numeric(id) => write!(f, "i={id}"),
            Identifier::String(id) => write!(f, "s={id}"),
            Identifier::Guid(id) => write!(f, "g={id}"),
            Identifier::Opaque(id) => write!(f, "b={}", STANDARD.encode(id)),
        }
    }
}

impl FromStr for NodeId {
    type Err = ModelError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = |detail: &str| ModelError::InvalidNodeId {
            text: text.to_string(),
            detail: detail.to_string(),
        };

        let (namespace, rest) = match text.strip_prefix("ns=") {
            Some(rest) => {
                let (ns, rest) = rest
                    .split_once(';')
                    .ok_or_else(|| invalid("missing ';' after namespace"))?;
                let ns = ns
                    .parse::<u16>()
                    .map_err(|_| invalid("namespace index is not a u16"))?;
                (ns, rest)
            }
            None => (0, text),
        };

        let (kind, value) = rest
            .split_once('=')
            .ok_or_else(|| invalid("missing identifier type"))?;
        let identifier = match kind {
            "i" => Identifier::Numeric(
                value
                    .parse()
                    .map_err(|_| invalid("numeric identifier is not a u32"))?,
            ),
            "s" => Identifier::String(value.to_string()),
            "g" => Identifier::Guid(
                Uuid::parse_str(value).map_err(|_| invalid("malformed guid identifier"))?,
            ),
            "b" => Identifier::Opaque(
                STANDARD
                    .decode(value)
                    .map_err(|_| invalid("opaque identifier is not base64"))?,
            ),
            other => return Err(invalid(&format!("unknown identifier type '{other}'"))),
        };

        Ok(Self {
            namespace,
            identifier,
        })
    }
}

impl TryFrom<String> for NodeId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NodeId> for String {
    fn from(value: NodeId) -> Self {
        value.to_string()
    }
}

/// Name qualified by a namespace index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualifiedName {
    #[serde(default)]
    pub namespace_index: u16,
    pub name: String,
}

impl QualifiedName {
    pub fn new(namespace_index: u16, name: impl Into<String>) -> Self {
        Self {
            namespace_index,
            name: name.into(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_index != 0 {
            write!(f, "{}:", self.namespace_index)?;
        }
        f.write_str(&self.name)
    }
}
