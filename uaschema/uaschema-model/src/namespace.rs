use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// URI of the OPC UA base namespace (index 0).
pub const OPC_UA_NAMESPACE_URI: &str = "http://opcfoundation.org/UA/";

/// Namespace array mapping compact indices to namespace URIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespaceTable(Vec<String>);

impl Default for NamespaceTable {
    fn default() -> Self {
        Self(vec![OPC_UA_NAMESPACE_URI.to_string()])
    }
}

impl NamespaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `uri` unless present and return its index.
    ///
    /// Fails when every `u16` index is taken.
    pub fn push(&mut self, uri: impl Into<String>) -> Result<u16, ModelError> {
        let uri = uri.into();
        if let Some(index) = self.index_of(&uri) {
            return Ok(index);
        }
        let index = u16::try_from(self.0.len())
            .map_err(|_| ModelError::NamespaceTableFull { uri: uri.clone() })?;
        self.0.push(uri);
        Ok(index)
    }

    pub fn get(&self, index: u16) -> Option<&str> {
        self.0.get(usize::from(index)).map(String::as_str)
    }

    pub fn index_of(&self, uri: &str) -> Option<u16> {
        self.0
            .iter()
            .position(|u| u == uri)
            .and_then(|i| u16::try_from(i).ok())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
