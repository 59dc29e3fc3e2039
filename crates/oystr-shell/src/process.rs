//! Node process supervision.
//!
//! [`ProcessBackend`] owns the single node child process. A switch stops the
//! running child, spawns the requested client with its output appended to
//! the node log, and waits a short grace period so a client that dies right
//! away is reported as a failed switch instead of a committed one. After a
//! failed switch the previous client is started again; if that fails too the
//! node is reported as stopped.

use std::cell::{Cell, RefCell};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::rc::Rc;
use std::time::Duration;

use futures_util::future::LocalBoxFuture;
use oystr_node::{BackendError, BackendProcess, Network, NodeState, NodeType};
use tokio::process::{Child, Command};

use crate::catalog::ManifestCatalog;

/// Spawns and stops node clients listed in the client manifest.
pub struct ProcessBackend {
    catalog: Rc<ManifestCatalog>,
    log_path: PathBuf,
    startup_grace: Duration,
    state: Cell<NodeState>,
    child: RefCell<Option<Child>>,
}

impl ProcessBackend {
    /// Backend reporting `initial` until the first switch.
    ///
    /// Nothing is spawned until [`Self::start`] or a switch.
    #[must_use]
    pub fn new(
        catalog: Rc<ManifestCatalog>,
        log_path: PathBuf,
        initial: NodeState,
        startup_grace: Duration,
    ) -> Self {
        Self {
            catalog,
            log_path,
            startup_grace,
            state: Cell::new(initial),
            child: RefCell::new(None),
        }
    }

    /// File the node's output is appended to.
    #[must_use]
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Whether a child process is held.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.child.borrow().is_some()
    }

    /// Start the initial node when the shell owns it.
    ///
    /// # Errors
    ///
    /// Returns the spawn or startup error; the node is then reported as
    /// stopped.
    pub async fn start(&self) -> Result<(), BackendError> {
        let state = self.state.get();
        if !state.is_owned() {
            tracing::info!(node = %state.node, "Using external node");
            return Ok(());
        }
        self.launch(state.node, state.network).await
    }

    /// Stop the child, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the process could not be killed.
    pub async fn shutdown(&self) -> Result<(), BackendError> {
        // Never hold the RefCell borrow across the await.
        let child = self.child.borrow_mut().take();
        let Some(mut child) = child else {
            return Ok(());
        };
        tracing::debug!(pid = ?child.id(), "Stopping node");
        child.kill().await.map_err(|e| BackendError::Stop {
            reason: e.to_string(),
        })
    }

    /// Wait until the running node exits on its own; it is reported as
    /// stopped afterwards.
    ///
    /// Returns the exit code, or `None` if nothing was running.
    pub async fn wait(&self) -> Option<i32> {
        let child = self.child.borrow_mut().take();
        let mut child = child?;
        let status = child.wait().await;
        self.mark_stopped(self.state.get());
        match status {
            Ok(status) => {
                tracing::info!(code = ?status.code(), "Node exited");
                status.code()
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to wait for node");
                None
            }
        }
    }

    async fn switch(&self, node: NodeType, network: Network) -> Result<(), BackendError> {
        if !self.state.get().is_owned() {
            return Err(BackendError::External);
        }
        self.launch(node, network).await
    }

    /// Replace the running child with `node` on `network`.
    ///
    /// On failure the previous node is started again. If that fails too, or
    /// nothing was running, the previous node is reported as stopped.
    async fn launch(&self, node: NodeType, network: Network) -> Result<(), BackendError> {
        let binary = self
            .catalog
            .binary_path(node)
            .ok_or(BackendError::Unavailable(node))?;

        let previous = self.state.get();
        let was_running = self.is_running();
        if let Err(err) = self.shutdown().await {
            self.mark_stopped(previous);
            return Err(err);
        }

        match self.start_child(node, network, &binary).await {
            Ok(child) => {
                tracing::info!(node = %node, network = %network, pid = ?child.id(), "Node started");
                self.state.set(NodeState::owned(node, network));
                *self.child.borrow_mut() = Some(child);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(node = %node, network = %network, error = %err, "Node failed to start");
                if was_running {
                    self.restore(previous).await;
                } else {
                    self.mark_stopped(previous);
                }
                Err(err)
            }
        }
    }

    async fn restore(&self, previous: NodeState) {
        let Some(binary) = self.catalog.binary_path(previous.node) else {
            tracing::error!(node = %previous.node, "Previous node is no longer installed");
            self.mark_stopped(previous);
            return;
        };
        match self
            .start_child(previous.node, previous.network, &binary)
            .await
        {
            Ok(child) => {
                tracing::info!(node = %previous.node, network = %previous.network, pid = ?child.id(), "Previous node restarted");
                self.state.set(previous);
                *self.child.borrow_mut() = Some(child);
            }
            Err(err) => {
                tracing::error!(node = %previous.node, error = %err, "Previous node failed to restart");
                self.mark_stopped(previous);
            }
        }
    }

    fn mark_stopped(&self, state: NodeState) {
        if state.is_owned() {
            self.state.set(NodeState::stopped(state.node, state.network));
        }
    }

    async fn start_child(
        &self,
        node: NodeType,
        network: Network,
        binary: &Path,
    ) -> Result<Child, BackendError> {
        let child = self.spawn(node, network, binary)?;
        self.await_startup(node, child).await
    }

    fn spawn(&self, node: NodeType, network: Network, binary: &Path) -> Result<Child, BackendError> {
        let spawn_error = |reason: String| BackendError::Spawn { node, reason };

        if let Some(parent) = self.log_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| spawn_error(e.to_string()))?;
        }
        let stdout = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| spawn_error(format!("{}: {e}", self.log_path.display())))?;
        let stderr = stdout.try_clone().map_err(|e| spawn_error(e.to_string()))?;

        let mut command = Command::new(binary);
        if let Some(flag) = network.cli_flag() {
            command.arg(flag);
        }
        command
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .kill_on_drop(true);

        tracing::trace!(binary = %binary.display(), network = %network, "Spawning node");
        command
            .spawn()
            .map_err(|e| spawn_error(format!("{}: {e}", binary.display())))
    }

    async fn await_startup(&self, node: NodeType, mut child: Child) -> Result<Child, BackendError> {
        match tokio::time::timeout(self.startup_grace, child.wait()).await {
            Err(_still_running) => Ok(child),
            Ok(Ok(status)) => Err(BackendError::Exited {
                node,
                code: status.code(),
            }),
            Ok(Err(err)) => Err(BackendError::Spawn {
                node,
                reason: err.to_string(),
            }),
        }
    }
}

impl BackendProcess for ProcessBackend {
    fn current(&self) -> NodeState {
        self.state.get()
    }

    fn restart(
        &self,
        node: NodeType,
        network: Network,
    ) -> LocalBoxFuture<'_, Result<(), BackendError>> {
        Box::pin(self.switch(node, network))
    }
}
