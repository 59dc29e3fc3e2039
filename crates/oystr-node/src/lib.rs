//! Node switching for the Oystr shell.
//!
//! The shell supervises (or observes) one backend node process at a time.
//! This crate provides:
//!
//! - Node identities: [`NodeType`], [`Network`], [`NodeOwnership`] and the
//!   committed [`NodeState`]
//! - [`NodeSwitchRequest`], the immutable request issued by menu clicks
//! - [`BackendProcess`], the seam to the external process manager
//! - [`RestartCoordinator`], which sequences a switch, reloads the interface
//!   and asks for a menu rebuild once the backend settles
//!
//! # Concurrency
//!
//! Everything here is single-threaded and runs on the UI event loop. The
//! coordinator claims its in-flight slot synchronously, so a second request
//! issued while a switch is pending is rejected with
//! [`RestartError::AlreadyInProgress`] before anything is awaited.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod coordinator;
pub mod error;
pub mod node;
pub mod request;

pub use backend::BackendProcess;
pub use coordinator::{RestartCoordinator, RestartHooks, RestartOutcome, RestartPhase};
pub use error::{BackendError, NodeError, RestartError, Result};
pub use node::{Network, NodeOwnership, NodeState, NodeType};
pub use request::NodeSwitchRequest;
