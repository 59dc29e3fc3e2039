//! Node switch requests.

use serde::{Deserialize, Serialize};

use crate::node::{Network, NodeState, NodeType};

/// Request to run `node`, optionally on a different network.
///
/// Issued by the node and network switch menus. A request without a network
/// keeps whatever network is active when the switch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeSwitchRequest {
    node: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    network: Option<Network>,
}

impl NodeSwitchRequest {
    /// Switch implementation, keeping the active network.
    #[must_use]
    pub const fn new(node: NodeType) -> Self {
        Self {
            node,
            network: None,
        }
    }

    /// Switch to `node` on `network`.
    #[must_use]
    pub const fn with_network(node: NodeType, network: Network) -> Self {
        Self {
            node,
            network: Some(network),
        }
    }

    /// Requested implementation.
    #[must_use]
    pub const fn node(&self) -> NodeType {
        self.node
    }

    /// Requested network, if one was given.
    #[must_use]
    pub const fn network(&self) -> Option<Network> {
        self.network
    }

    /// Resolve the target against the currently committed state.
    #[must_use]
    pub fn resolve(&self, current: &NodeState) -> (NodeType, Network) {
        (self.node, self.network.unwrap_or(current.network))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_network_keeps_current() {
        let current = NodeState::owned(NodeType::Geth, Network::Test);
        let request = NodeSwitchRequest::new(NodeType::Eth);
        assert_eq!(request.resolve(&current), (NodeType::Eth, Network::Test));
    }

    #[test]
    fn test_explicit_network_wins() {
        let current = NodeState::owned(NodeType::Geth, Network::Test);
        let request = NodeSwitchRequest::with_network(NodeType::Geth, Network::Main);
        assert_eq!(request.resolve(&current), (NodeType::Geth, Network::Main));
    }
}
