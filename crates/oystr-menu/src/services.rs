//! Collaborators the menu actions call into.
//!
//! All of these are implemented by the host shell. The traits are object-safe
//! and used through `Rc<dyn ...>` on the UI thread.

use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Serialize;

use crate::error::WindowError;
use crate::paths::PathTemplate;
use crate::state::LanguageCode;

/// Long-lived windows addressable by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowRole {
    /// Primary interface window.
    Main,
}

/// A live application window.
pub trait AppWindow {
    /// Load the interface entry point at `url` again.
    fn reload(&self, url: &str) -> Result<(), WindowError>;

    /// Post a message to the interface running in the window.
    fn send_message(&self, channel: &str, payload: serde_json::Value) -> Result<(), WindowError>;

    /// Toggle the developer tools of the window itself.
    fn toggle_dev_tools(&self) -> Result<(), WindowError>;

    /// Whether the window is fullscreen.
    fn is_full_screen(&self) -> bool;

    /// Enter or leave fullscreen.
    fn set_full_screen(&self, full_screen: bool) -> Result<(), WindowError>;

    /// Switch the interface language without reloading.
    fn set_language(&self, code: &LanguageCode) -> Result<(), WindowError>;
}

/// Short-lived popup windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OverlayKind {
    /// About box.
    About,
    /// New account form.
    RequestAccount,
    /// Presale wallet import.
    ImportAccount,
    /// Remix IDE.
    Remix,
}

impl OverlayKind {
    /// Interface route name.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::About => "about",
            Self::RequestAccount => "requestAccount",
            Self::ImportAccount => "importAccount",
            Self::Remix => "remix",
        }
    }

    /// Window geometry the overlay opens with.
    #[must_use]
    pub fn options(&self) -> OverlayOptions {
        match self {
            Self::About | Self::RequestAccount => OverlayOptions::new(420, 230).always_on_top(),
            Self::ImportAccount => OverlayOptions::new(600, 370).always_on_top(),
            Self::Remix => OverlayOptions::new(1024, 720)
                .url("https://remix.ethereum.org")
                .resizable()
                .centered(),
        }
    }
}

/// Geometry and behaviour of an overlay window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayOptions {
    /// Remote URL to load instead of an interface route.
    pub url: Option<String>,
    /// Width in logical pixels.
    pub width: u32,
    /// Height in logical pixels.
    pub height: u32,
    /// Keep above other windows.
    pub always_on_top: bool,
    /// Allow resizing.
    pub resizable: bool,
    /// Center on screen.
    pub center: bool,
}

impl OverlayOptions {
    /// Fixed-size overlay.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            url: None,
            width,
            height,
            always_on_top: false,
            resizable: false,
            center: false,
        }
    }

    /// Load a remote URL.
    #[must_use]
    pub fn url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    /// Keep above other windows.
    #[must_use]
    pub fn always_on_top(mut self) -> Self {
        self.always_on_top = true;
        self
    }

    /// Allow resizing.
    #[must_use]
    pub fn resizable(mut self) -> Self {
        self.resizable = true;
        self
    }

    /// Center on screen.
    #[must_use]
    pub fn centered(mut self) -> Self {
        self.center = true;
        self
    }
}

/// Window lookup and creation.
pub trait WindowManager {
    /// The window with `role`, if it is open.
    fn window(&self, role: WindowRole) -> Option<Rc<dyn AppWindow>>;

    /// The window that currently has focus.
    fn focused(&self) -> Option<Rc<dyn AppWindow>>;

    /// Open an overlay.
    fn create_overlay(&self, kind: OverlayKind, options: OverlayOptions)
    -> Result<(), WindowError>;
}

/// Desktop integration: paths, file manager, browser, dialogs.
pub trait ShellServices {
    /// Turn a template into an absolute path.
    fn resolve(&self, template: PathTemplate) -> PathBuf;

    /// Show `path` selected in the system file manager.
    fn reveal_in_folder(&self, path: &Path) -> io::Result<()>;

    /// Open `path` with its default handler.
    fn open_path(&self, path: &Path) -> io::Result<()>;

    /// Open `url` in the system browser.
    fn open_external(&self, url: &str) -> io::Result<()>;

    /// Overwrite `path` with `contents`.
    fn write_marker(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Whether `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Whether `path` exists.
    fn exists(&self, path: &Path) -> bool;

    /// Ask the user for one file or directory.
    fn pick_upload_source(&self) -> Option<PathBuf>;

    /// Terminate the application.
    fn quit(&self);
}

/// Update checks.
pub trait UpdateChecker {
    /// Check for a new application release and always report the result.
    fn check_app_visibly(&self);

    /// Check for new node binaries. With `restart_after_update` the running
    /// node is restarted when its binary changed.
    fn check_node(&self, restart_after_update: bool);
}

/// Persistent user preferences.
pub trait Preferences {
    /// Store the interface language.
    fn set_language(&self, code: &LanguageCode) -> Result<(), String>;
}

/// Events broadcast to the rest of the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    /// The interface language preference changed.
    LanguageChanged(LanguageCode),
}

/// Shell-wide event sink.
pub trait Notifier {
    /// Broadcast `event`.
    fn emit(&self, event: ShellEvent);
}
