//! Integration tests for the restart coordinator.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use futures_util::FutureExt;
use futures_util::future::LocalBoxFuture;
use oystr_node::{
    BackendError, BackendProcess, Network, NodeState, NodeSwitchRequest, NodeType,
    RestartCoordinator, RestartError, RestartHooks, RestartOutcome, RestartPhase,
};
use tokio::sync::oneshot;

/// Backend that replays scripted results, optionally waiting on a gate.
struct ScriptedBackend {
    current: Cell<NodeState>,
    after_failure: Cell<Option<NodeState>>,
    results: RefCell<VecDeque<Result<(), BackendError>>>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
    calls: RefCell<Vec<(NodeType, Network)>>,
}

impl ScriptedBackend {
    fn new(initial: NodeState, results: Vec<Result<(), BackendError>>) -> Self {
        Self {
            current: Cell::new(initial),
            after_failure: Cell::new(None),
            results: RefCell::new(results.into()),
            gate: RefCell::new(None),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn gated(self, gate: oneshot::Receiver<()>) -> Self {
        *self.gate.borrow_mut() = Some(gate);
        self
    }

    /// State to report once a restart fails, as if the rollback failed too.
    fn ending_in(self, state: NodeState) -> Self {
        self.after_failure.set(Some(state));
        self
    }
}

impl BackendProcess for ScriptedBackend {
    fn current(&self) -> NodeState {
        self.current.get()
    }

    fn restart(
        &self,
        node: NodeType,
        network: Network,
    ) -> LocalBoxFuture<'_, Result<(), BackendError>> {
        self.calls.borrow_mut().push((node, network));
        let gate = self.gate.borrow_mut().take();
        let result = self.results.borrow_mut().pop_front().unwrap_or(Ok(()));
        async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            match &result {
                Ok(()) => self.current.set(NodeState::owned(node, network)),
                Err(_) => {
                    if let Some(state) = self.after_failure.get() {
                        self.current.set(state);
                    }
                }
            }
            result
        }
        .boxed_local()
    }
}

#[derive(Default)]
struct RecordingHooks {
    reloads: RefCell<usize>,
    rebuilds: RefCell<Vec<NodeState>>,
}

impl RestartHooks for RecordingHooks {
    fn reload_interface(&self) {
        *self.reloads.borrow_mut() += 1;
    }

    fn rebuild_menu(&self, state: &NodeState) {
        self.rebuilds.borrow_mut().push(*state);
    }
}

fn setup(
    backend: ScriptedBackend,
) -> (
    RestartCoordinator,
    Rc<ScriptedBackend>,
    Rc<RecordingHooks>,
) {
    let backend = Rc::new(backend);
    let hooks = Rc::new(RecordingHooks::default());
    let coordinator = RestartCoordinator::new(backend.clone(), hooks.clone());
    (coordinator, backend, hooks)
}

#[tokio::test]
async fn test_successful_switch_commits_reloads_and_rebuilds() {
    let initial = NodeState::owned(NodeType::Geth, Network::Main);
    let (coordinator, backend, hooks) = setup(ScriptedBackend::new(initial, vec![Ok(())]));

    let outcome = coordinator
        .restart(NodeSwitchRequest::new(NodeType::Eth))
        .unwrap()
        .await;

    let expected = NodeState::owned(NodeType::Eth, Network::Main);
    assert_eq!(outcome, RestartOutcome::Switched(expected));
    assert_eq!(coordinator.state(), expected);
    assert_eq!(coordinator.phase(), RestartPhase::Idle);
    assert_eq!(*backend.calls.borrow(), vec![(NodeType::Eth, Network::Main)]);
    assert_eq!(*hooks.reloads.borrow(), 1);
    assert_eq!(*hooks.rebuilds.borrow(), vec![expected]);
}

#[tokio::test]
async fn test_failed_switch_retains_previous_state() {
    let initial = NodeState::owned(NodeType::Geth, Network::Main);
    let error = BackendError::Spawn {
        node: NodeType::Eth,
        reason: "binary missing".to_string(),
    };
    let (coordinator, _backend, hooks) =
        setup(ScriptedBackend::new(initial, vec![Err(error.clone())]));

    let outcome = coordinator
        .restart(NodeSwitchRequest::new(NodeType::Eth))
        .unwrap()
        .await;

    assert_eq!(
        outcome,
        RestartOutcome::Failed {
            error,
            retained: initial,
        }
    );
    assert!(!outcome.is_switched());
    assert_eq!(coordinator.state().node, NodeType::Geth);
    assert_eq!(*hooks.reloads.borrow(), 0);
    // The rebuild still happens, with the retained state.
    assert_eq!(*hooks.rebuilds.borrow(), vec![initial]);
}

#[tokio::test]
async fn test_network_switch_keeps_implementation() {
    let initial = NodeState::owned(NodeType::Eth, Network::Test);
    let (coordinator, backend, _hooks) = setup(ScriptedBackend::new(initial, vec![Ok(())]));

    let request = NodeSwitchRequest::with_network(initial.node, Network::Main);
    let outcome = coordinator.restart(request).unwrap().await;

    assert_eq!(outcome.state(), &NodeState::owned(NodeType::Eth, Network::Main));
    assert_eq!(*backend.calls.borrow(), vec![(NodeType::Eth, Network::Main)]);
}

#[tokio::test]
async fn test_second_request_rejected_while_pending() {
    let initial = NodeState::owned(NodeType::Geth, Network::Main);
    let (release, gate) = oneshot::channel();
    let (coordinator, backend, hooks) =
        setup(ScriptedBackend::new(initial, vec![Ok(())]).gated(gate));

    let mut pending = Box::pin(
        coordinator
            .restart(NodeSwitchRequest::new(NodeType::Eth))
            .unwrap(),
    );
    // Poll once so the backend call is actually waiting on the gate.
    assert!((&mut pending).now_or_never().is_none());
    assert_eq!(coordinator.phase(), RestartPhase::Restarting);

    let second = coordinator.restart(NodeSwitchRequest::with_network(NodeType::Geth, Network::Test));
    assert!(matches!(second, Err(RestartError::AlreadyInProgress)));
    assert_eq!(coordinator.state(), initial);
    assert_eq!(backend.calls.borrow().len(), 1);

    release.send(()).unwrap();
    let outcome = pending.await;
    assert!(outcome.is_switched());
    assert_eq!(hooks.rebuilds.borrow().len(), 1);

    // Slot is free again.
    assert!(
        coordinator
            .restart(NodeSwitchRequest::new(NodeType::Geth))
            .is_ok()
    );
}

#[tokio::test]
async fn test_rejected_before_first_poll() {
    let initial = NodeState::owned(NodeType::Geth, Network::Main);
    let (coordinator, _backend, _hooks) = setup(ScriptedBackend::new(initial, vec![Ok(())]));

    let first = coordinator
        .restart(NodeSwitchRequest::new(NodeType::Eth))
        .unwrap();
    assert!(matches!(
        coordinator.restart(NodeSwitchRequest::new(NodeType::Eth)),
        Err(RestartError::AlreadyInProgress)
    ));
    first.await;
}

#[test]
fn test_dropping_pending_switch_frees_slot() {
    let initial = NodeState::owned(NodeType::Geth, Network::Main);
    let (coordinator, backend, hooks) = setup(ScriptedBackend::new(initial, vec![Ok(())]));

    let pending = coordinator
        .restart(NodeSwitchRequest::new(NodeType::Eth))
        .unwrap();
    assert!(coordinator.is_restarting());
    drop(pending);

    assert_eq!(coordinator.phase(), RestartPhase::Idle);
    assert_eq!(coordinator.state(), initial);
    assert!(backend.calls.borrow().is_empty());
    assert!(hooks.rebuilds.borrow().is_empty());
}

#[tokio::test]
async fn test_failed_rollback_reports_stopped_node() {
    let initial = NodeState::owned(NodeType::Geth, Network::Main);
    let stopped = NodeState::stopped(NodeType::Geth, Network::Main);
    let error = BackendError::Exited {
        node: NodeType::Eth,
        code: Some(3),
    };
    let (coordinator, _backend, hooks) = setup(
        ScriptedBackend::new(initial, vec![Err(error.clone())]).ending_in(stopped),
    );

    let outcome = coordinator
        .restart(NodeSwitchRequest::new(NodeType::Eth))
        .unwrap()
        .await;

    assert_eq!(
        outcome,
        RestartOutcome::Failed {
            error,
            retained: stopped,
        }
    );
    assert_eq!(coordinator.state(), stopped);
    assert!(!coordinator.state().is_running());
    assert_eq!(*hooks.rebuilds.borrow(), vec![stopped]);
    assert_eq!(*hooks.reloads.borrow(), 0);
}

#[tokio::test]
async fn test_sync_adopts_manager_state_when_idle() {
    let initial = NodeState::owned(NodeType::Geth, Network::Main);
    let (coordinator, backend, _hooks) = setup(ScriptedBackend::new(initial, vec![]));

    let stopped = NodeState::stopped(NodeType::Geth, Network::Main);
    backend.current.set(stopped);
    assert_eq!(coordinator.state(), initial);
    assert_eq!(coordinator.sync(), stopped);
    assert_eq!(coordinator.state(), stopped);
}
