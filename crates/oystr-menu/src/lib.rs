//! Application menu for the Oystr shell.
//!
//! The menu is plain data. [`MenuTreeBuilder::build`] turns a [`RuntimeState`]
//! snapshot into an ordered list of [`MenuNode`]s without touching any
//! collaborator; clicks carry a [`MenuAction`] value that the host hands to
//! [`MenuHandler::handle`] later.
//!
//! # Flow
//!
//! ```text
//! RuntimeState --build--> Vec<MenuNode> --host installs--> native/in-app menu
//!                                                 |
//!                           click -> MenuAction -> MenuHandler -> collaborators
//!                                                 |
//!                            SwitchNode -> RestartCoordinator -> rebuild
//! ```
//!
//! Installing the tree as the process-wide menu is the host's job; nothing
//! in this crate replaces a global menu.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod action;
pub mod builder;
pub mod catalog;
pub mod error;
pub mod handler;
pub mod i18n;
pub mod ids;
pub mod model;
pub mod paths;
pub mod platform;
pub mod services;
pub mod state;
pub mod upload;

pub use action::{ExternalLink, MenuAction};
pub use builder::{MenuConfig, MenuTreeBuilder};
pub use catalog::{BinaryCatalog, ClientBinary};
pub use error::{MenuError, UploadError, WindowError};
pub use handler::{MenuHandler, MenuServices};
pub use i18n::{KeyTranslator, Translator, best_match_language};
pub use model::{Accelerator, MenuItem, MenuNode, MenuRole, Submenu, Trigger};
pub use paths::PathTemplate;
pub use platform::{PlatformId, SystemSwitch};
pub use services::{
    AppWindow, Notifier, OverlayKind, OverlayOptions, Preferences, ShellEvent, ShellServices,
    UpdateChecker, WindowManager, WindowRole,
};
pub use state::{ContentView, LanguageCode, RuntimeState, UiMode, ViewId};
pub use upload::{UploadKind, UploadRequest, Uploader, swarm_locator};
