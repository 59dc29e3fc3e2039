//! Error types for node switching.

use thiserror::Error;

use crate::node::NodeType;

/// Errors parsing node identities.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NodeError {
    /// Unknown node implementation identifier.
    #[error("unknown node implementation: {0}")]
    UnknownNode(String),

    /// Unknown network identifier.
    #[error("unknown network: {0}")]
    UnknownNetwork(String),
}

/// Errors reported by the backend process manager.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BackendError {
    /// No binary is installed for the requested implementation.
    #[error("no binary available for {0}")]
    Unavailable(NodeType),

    /// The running process could not be stopped.
    #[error("failed to stop node: {reason}")]
    Stop {
        /// Description of what went wrong.
        reason: String,
    },

    /// The requested process could not be started.
    #[error("failed to start {node}: {reason}")]
    Spawn {
        /// Implementation that failed to start.
        node: NodeType,
        /// Description of what went wrong.
        reason: String,
    },

    /// The process exited right after being started.
    #[error("{node} exited during startup (code {code:?})")]
    Exited {
        /// Implementation that exited.
        node: NodeType,
        /// Exit code, if the platform reported one.
        code: Option<i32>,
    },

    /// The node is not managed by the shell.
    #[error("node is externally managed")]
    External,
}

impl BackendError {
    /// Returns a user-friendly error message suitable for display in the UI.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Unavailable(_) => "The selected node is not installed.",
            Self::Stop { .. } => "The running node could not be stopped.",
            Self::Spawn { .. } | Self::Exited { .. } => "The selected node failed to start.",
            Self::External => "The node is managed outside of this application.",
        }
    }
}

/// Errors starting a node switch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RestartError {
    /// Another switch is still in flight.
    #[error("restart already in progress")]
    AlreadyInProgress,

    /// The backend rejected the switch.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl RestartError {
    /// Returns a user-friendly error message suitable for display in the UI.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::AlreadyInProgress => "A node switch is already in progress.",
            Self::Backend(err) => err.user_message(),
        }
    }
}

/// Result type alias for backend operations.
pub type Result<T> = std::result::Result<T, BackendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = BackendError::Spawn {
            node: NodeType::Eth,
            reason: "not found".to_string(),
        };
        assert!(err.user_message().contains("failed to start"));
        assert_eq!(err.to_string(), "failed to start eth: not found");

        let err = RestartError::from(BackendError::Unavailable(NodeType::Geth));
        assert!(err.user_message().contains("not installed"));
        assert!(
            RestartError::AlreadyInProgress
                .user_message()
                .contains("already in progress")
        );
    }
}
