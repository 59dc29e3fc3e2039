//! Installed node client binaries.

use std::collections::BTreeMap;

use oystr_node::NodeType;
use serde::{Deserialize, Serialize};

/// A client binary known to be runnable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientBinary {
    /// Version string reported by the binary manager, shown verbatim.
    pub version: String,
}

impl ClientBinary {
    /// Binary with `version`.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }
}

/// Answers which implementations can be switched to.
pub trait BinaryCatalog {
    /// The binary for `node`, or `None` when it is not installed.
    fn available(&self, node: NodeType) -> Option<ClientBinary>;
}

impl BinaryCatalog for BTreeMap<NodeType, ClientBinary> {
    fn available(&self, node: NodeType) -> Option<ClientBinary> {
        self.get(&node).cloned()
    }
}
