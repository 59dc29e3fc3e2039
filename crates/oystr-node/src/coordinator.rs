//! Restart coordination.
//!
//! A switch runs through `Idle -> Restarting -> Reloading -> Idle` on success
//! and `Idle -> Restarting -> Idle` on failure. Stopping the old node and
//! starting the new one is a single operation of the process manager, so both
//! show up as [`RestartPhase::Restarting`]. Rolling back to the previous node
//! after a failure is the manager's job too; the coordinator adopts the state
//! the manager reports afterwards.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use crate::backend::BackendProcess;
use crate::error::{BackendError, RestartError};
use crate::node::NodeState;
use crate::request::NodeSwitchRequest;

/// UI follow-ups run by the coordinator once the backend settles.
pub trait RestartHooks {
    /// Reload the primary window to the interface entry point.
    fn reload_interface(&self);

    /// Rebuild the application menu for `state`.
    fn rebuild_menu(&self, state: &NodeState);
}

/// Where the coordinator is in a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestartPhase {
    /// No switch in flight.
    #[default]
    Idle,
    /// Waiting for the process manager.
    Restarting,
    /// Backend switched, interface reloading.
    Reloading,
}

/// Result of one switch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestartOutcome {
    /// The new state was committed.
    Switched(NodeState),
    /// The backend rejected the switch.
    Failed {
        /// Error reported by the process manager.
        error: BackendError,
        /// State the manager reports after rolling back: the previous state,
        /// or a stopped one if the previous node could not be restarted.
        retained: NodeState,
    },
}

impl RestartOutcome {
    /// Whether the switch was committed.
    #[must_use]
    pub fn is_switched(&self) -> bool {
        matches!(self, Self::Switched(_))
    }

    /// State in effect after the attempt.
    #[must_use]
    pub fn state(&self) -> &NodeState {
        match self {
            Self::Switched(state) | Self::Failed { retained: state, .. } => state,
        }
    }
}

/// Sequences node switches around the external process manager.
///
/// The coordinator is the only writer of the committed [`NodeState`]. At most
/// one switch is in flight; the slot is claimed when [`Self::restart`] is
/// called, not when its future is first polled.
pub struct RestartCoordinator {
    backend: Rc<dyn BackendProcess>,
    hooks: Rc<dyn RestartHooks>,
    state: RefCell<NodeState>,
    phase: Cell<RestartPhase>,
}

impl RestartCoordinator {
    /// Create a coordinator seeded with the manager's current state.
    pub fn new(backend: Rc<dyn BackendProcess>, hooks: Rc<dyn RestartHooks>) -> Self {
        let state = backend.current();
        Self {
            backend,
            hooks,
            state: RefCell::new(state),
            phase: Cell::new(RestartPhase::Idle),
        }
    }

    /// Committed node state.
    #[must_use]
    pub fn state(&self) -> NodeState {
        *self.state.borrow()
    }

    /// Adopt the manager's state outside a switch, e.g. once the initial
    /// node has been started. Ignored while a switch is in flight.
    pub fn sync(&self) -> NodeState {
        if !self.is_restarting() {
            *self.state.borrow_mut() = self.backend.current();
        }
        self.state()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> RestartPhase {
        self.phase.get()
    }

    /// Whether a switch is in flight.
    #[must_use]
    pub fn is_restarting(&self) -> bool {
        self.phase.get() != RestartPhase::Idle
    }

    /// Start a switch.
    ///
    /// Returns [`RestartError::AlreadyInProgress`] without touching any state
    /// when another switch has not settled yet. Otherwise the returned future
    /// drives the switch; dropping it before completion frees the slot and
    /// leaves the committed state as it was.
    pub fn restart(
        &self,
        request: NodeSwitchRequest,
    ) -> Result<impl Future<Output = RestartOutcome> + '_, RestartError> {
        if self.is_restarting() {
            tracing::warn!(
                node = %request.node(),
                "Rejecting node switch: restart already in progress"
            );
            return Err(RestartError::AlreadyInProgress);
        }

        let previous = self.state();
        let (node, network) = request.resolve(&previous);
        let guard = PhaseGuard::enter(&self.phase);

        tracing::info!(node = %node, network = %network, "Switching node");

        Ok(async move {
            let result = self.backend.restart(node, network).await;

            let outcome = match result {
                Ok(()) => {
                    let next = NodeState::owned(node, network);
                    *self.state.borrow_mut() = next;
                    guard.advance(RestartPhase::Reloading);
                    self.hooks.reload_interface();
                    tracing::info!(node = %node, network = %network, "Node switched");
                    RestartOutcome::Switched(next)
                }
                Err(error) => {
                    tracing::error!(
                        error = %error,
                        node = %node,
                        network = %network,
                        "Error switching node"
                    );
                    // The manager rolls back on failure; adopt what it ended up with.
                    let retained = self.backend.current();
                    if retained != previous {
                        tracing::warn!(
                            node = %retained.node,
                            network = %retained.network,
                            running = retained.is_running(),
                            "Previous node could not be restored"
                        );
                    }
                    *self.state.borrow_mut() = retained;
                    RestartOutcome::Failed { error, retained }
                }
            };

            drop(guard);
            self.hooks.rebuild_menu(outcome.state());
            outcome
        })
    }
}

/// Holds the in-flight slot; resets the phase to idle when dropped.
struct PhaseGuard<'a> {
    phase: &'a Cell<RestartPhase>,
}

impl<'a> PhaseGuard<'a> {
    fn enter(phase: &'a Cell<RestartPhase>) -> Self {
        phase.set(RestartPhase::Restarting);
        Self { phase }
    }

    fn advance(&self, next: RestartPhase) {
        self.phase.set(next);
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        self.phase.set(RestartPhase::Idle);
    }
}
