//! Path templates resolved by the host shell.

use std::fmt;

use oystr_node::NodeType;
use serde::Serialize;

use crate::platform::{PlatformId, SystemSwitch};

/// A path relative to one of the well-known base directories.
///
/// The builder only picks templates; turning them into real paths is I/O and
/// belongs to [`crate::ShellServices::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "base", content = "path", rename_all = "snake_case")]
pub enum PathTemplate {
    /// Relative to the user's home directory.
    Home(&'static str),
    /// Relative to the roaming application-data directory.
    AppData(&'static str),
    /// Relative to this application's user-data directory.
    UserData(&'static str),
}

impl PathTemplate {
    /// Relative part of the template.
    #[must_use]
    pub const fn relative(&self) -> &'static str {
        match self {
            Self::Home(path) | Self::AppData(path) | Self::UserData(path) => path,
        }
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home(path) => write!(f, "~/{path}"),
            Self::AppData(path) => write!(f, "%APPDATA%/{path}"),
            Self::UserData(path) => write!(f, "<userData>/{path}"),
        }
    }
}

const GETH_KEYSTORE: SystemSwitch<PathTemplate> = SystemSwitch::new(
    &[
        (
            PlatformId::MacOs,
            PathTemplate::Home("Library/Pirl/keystore"),
        ),
        (PlatformId::Windows, PathTemplate::AppData("Pirl\\keystore")),
    ],
    Some(PathTemplate::Home(".ethereum/keystore")),
);

const ETH_KEYSTORE: SystemSwitch<PathTemplate> = SystemSwitch::new(
    &[(PlatformId::Windows, PathTemplate::AppData("Web3\\keys"))],
    Some(PathTemplate::Home(".web3/keys")),
);

/// Keystore directory of `node` on `platform`.
#[must_use]
pub fn keystore(platform: PlatformId, node: NodeType) -> PathTemplate {
    let table = match node {
        NodeType::Geth => GETH_KEYSTORE,
        NodeType::Eth => ETH_KEYSTORE,
    };
    // Both tables carry a fallback.
    table
        .resolve(platform)
        .unwrap_or(PathTemplate::Home(".ethereum/keystore"))
}

/// Node log written by the process backend.
pub const NODE_LOG: PathTemplate = PathTemplate::UserData("node.log");

/// Marker recording a node update the user chose to skip.
pub const SKIPPED_NODE_VERSION: PathTemplate = PathTemplate::UserData("skippedNodeVersion.json");

/// The user-data directory itself.
pub const USER_DATA: PathTemplate = PathTemplate::UserData("");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geth_keystore_by_platform() {
        assert_eq!(
            keystore(PlatformId::MacOs, NodeType::Geth),
            PathTemplate::Home("Library/Pirl/keystore")
        );
        assert_eq!(
            keystore(PlatformId::Windows, NodeType::Geth),
            PathTemplate::AppData("Pirl\\keystore")
        );
        assert_eq!(
            keystore(PlatformId::Linux, NodeType::Geth),
            PathTemplate::Home(".ethereum/keystore")
        );
    }

    #[test]
    fn test_eth_keystore_by_platform() {
        assert_eq!(
            keystore(PlatformId::Windows, NodeType::Eth),
            PathTemplate::AppData("Web3\\keys")
        );
        assert_eq!(
            keystore(PlatformId::MacOs, NodeType::Eth),
            PathTemplate::Home(".web3/keys")
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(NODE_LOG.to_string(), "<userData>/node.log");
        assert_eq!(PathTemplate::Home(".web3/keys").to_string(), "~/.web3/keys");
    }
}
