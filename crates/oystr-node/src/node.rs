//! Node implementations, networks and the committed node state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NodeError;

/// Node client implementation the shell knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Go implementation.
    Geth,
    /// C++ implementation.
    Eth,
}

impl NodeType {
    /// All implementations, in menu order.
    pub const ALL: [NodeType; 2] = [Self::Geth, Self::Eth];

    /// Identifier used in settings, manifests and menu ids.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Geth => "geth",
            Self::Eth => "eth",
        }
    }

    /// Display name used in menu labels.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Geth => "Geth",
            Self::Eth => "Eth",
        }
    }

    /// Implementation language shown next to the version.
    #[must_use]
    pub const fn language(&self) -> &'static str {
        match self {
            Self::Geth => "Go",
            Self::Eth => "C++",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for NodeType {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|node| node.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| NodeError::UnknownNode(s.to_string()))
    }
}

/// Network a node connects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Production network.
    #[default]
    Main,
    /// Public test network.
    Test,
}

impl Network {
    /// All supported networks, in menu order.
    pub const ALL: [Network; 2] = [Self::Main, Self::Test];

    /// The primary (production) network.
    pub const PRIMARY: Network = Self::Main;

    /// Identifier used in settings and menu ids.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Test => "test",
        }
    }

    /// Whether this is the primary network.
    #[must_use]
    pub const fn is_primary(&self) -> bool {
        matches!(self, Self::Main)
    }

    /// Command-line flag that selects this network, if any.
    #[must_use]
    pub const fn cli_flag(&self) -> Option<&'static str> {
        match self {
            Self::Main => None,
            Self::Test => Some("--testnet"),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Network {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|network| network.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| NodeError::UnknownNetwork(s.to_string()))
    }
}

/// Whether the shell spawned the node or merely connected to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeOwnership {
    /// Spawned and supervised by the shell.
    #[default]
    Owned,
    /// Started by someone else; the shell only observes it.
    External,
    /// Supervised by the shell, but no process is running.
    Stopped,
}

impl NodeOwnership {
    /// Whether the shell supervises the node, running or not.
    #[must_use]
    pub const fn is_owned(&self) -> bool {
        matches!(self, Self::Owned | Self::Stopped)
    }

    /// Whether a node process is up.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Owned | Self::External)
    }
}

/// Committed state of the backend node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeState {
    /// Active implementation.
    pub node: NodeType,
    /// Active network.
    pub network: Network,
    /// Who manages the process.
    pub ownership: NodeOwnership,
}

impl NodeState {
    /// State of a node spawned by the shell.
    #[must_use]
    pub const fn owned(node: NodeType, network: Network) -> Self {
        Self {
            node,
            network,
            ownership: NodeOwnership::Owned,
        }
    }

    /// State of a node the shell merely connected to.
    #[must_use]
    pub const fn external(node: NodeType, network: Network) -> Self {
        Self {
            node,
            network,
            ownership: NodeOwnership::External,
        }
    }

    /// Supervised node that is not running, e.g. after a failed switch
    /// whose rollback failed too.
    #[must_use]
    pub const fn stopped(node: NodeType, network: Network) -> Self {
        Self {
            node,
            network,
            ownership: NodeOwnership::Stopped,
        }
    }

    /// Whether the shell supervises the process.
    #[must_use]
    pub const fn is_owned(&self) -> bool {
        self.ownership.is_owned()
    }

    /// Whether a node process is up.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.ownership.is_running()
    }

    /// Whether the node runs on the primary network.
    #[must_use]
    pub const fn is_primary_network(&self) -> bool {
        self.network.is_primary()
    }

    /// Whether `node` is the implementation of a running owned process.
    #[must_use]
    pub fn runs_owned(&self, node: NodeType) -> bool {
        self.ownership == NodeOwnership::Owned && self.node == node
    }

    /// Whether `network` is the network of a running owned process.
    #[must_use]
    pub fn runs_owned_on(&self, network: Network) -> bool {
        self.ownership == NodeOwnership::Owned && self.network == network
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_parse() {
        assert_eq!("geth".parse::<NodeType>().unwrap(), NodeType::Geth);
        assert_eq!(" ETH ".parse::<NodeType>().unwrap(), NodeType::Eth);
        assert!(matches!(
            "parity".parse::<NodeType>(),
            Err(NodeError::UnknownNode(name)) if name == "parity"
        ));
    }

    #[test]
    fn test_network_parse_and_primary() {
        assert_eq!("main".parse::<Network>().unwrap(), Network::Main);
        assert_eq!("test".parse::<Network>().unwrap(), Network::Test);
        assert!("rinkeby".parse::<Network>().is_err());
        assert!(Network::PRIMARY.is_primary());
        assert!(!Network::Test.is_primary());
    }

    #[test]
    fn test_runs_owned_requires_ownership() {
        let owned = NodeState::owned(NodeType::Geth, Network::Main);
        assert!(owned.runs_owned(NodeType::Geth));
        assert!(!owned.runs_owned(NodeType::Eth));
        assert!(owned.runs_owned_on(Network::Main));

        let external = NodeState::external(NodeType::Geth, Network::Main);
        assert!(!external.runs_owned(NodeType::Geth));
        assert!(!external.runs_owned_on(Network::Main));
        assert!(external.is_primary_network());
    }

    #[test]
    fn test_stopped_node_is_supervised_but_not_running() {
        let stopped = NodeState::stopped(NodeType::Geth, Network::Main);
        assert!(stopped.is_owned());
        assert!(!stopped.is_running());
        assert!(!stopped.runs_owned(NodeType::Geth));
        assert!(!stopped.runs_owned_on(Network::Main));

        assert!(NodeState::owned(NodeType::Eth, Network::Test).is_running());
        assert!(NodeState::external(NodeType::Eth, Network::Test).is_running());
    }

    #[test]
    fn test_display_matches_id() {
        for node in NodeType::ALL {
            assert_eq!(node.to_string(), node.id());
        }
        assert_eq!(Network::Test.to_string(), "test");
        assert_eq!(Network::Test.cli_flag(), Some("--testnet"));
        assert_eq!(Network::Main.cli_flag(), None);
    }
}
