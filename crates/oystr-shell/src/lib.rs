//! Desktop host for the Oystr shell.
//!
//! Supplies the real collaborators behind the menu: persisted settings, the
//! client manifest, the node process, the Swarm gateway, update checks and
//! the installed menu itself.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod catalog;
pub mod desktop;
pub mod error;
pub mod host;
pub mod labels;
pub mod logging;
#[cfg(target_os = "macos")]
pub mod native;
pub mod process;
pub mod render;
pub mod settings;
pub mod swarm;
pub mod updates;

pub use app::{Shell, ShellOptions};
pub use error::{Result, ShellError};
pub use host::{MenuHost, MenuInstaller, OutlineMenu, platform_installer};
