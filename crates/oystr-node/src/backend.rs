//! Seam to the external backend process manager.

use futures_util::future::LocalBoxFuture;

use crate::error::BackendError;
use crate::node::{Network, NodeState, NodeType};

/// Process manager that owns the single backend node handle.
///
/// Supervision (stopping, spawning, watching the child) is the manager's
/// business. [`crate::RestartCoordinator`] only sequences around
/// [`BackendProcess::restart`].
pub trait BackendProcess {
    /// State of the node as the manager currently sees it.
    fn current(&self) -> NodeState;

    /// Stop the running node and start `node` on `network`.
    ///
    /// On failure the manager restarts the previous node if it was running,
    /// and [`Self::current`] reports whatever is in effect afterwards
    /// (possibly a stopped node).
    fn restart(&self, node: NodeType, network: Network)
    -> LocalBoxFuture<'_, Result<(), BackendError>>;
}
