//! Executes menu actions against the shell's collaborators.

use std::rc::Rc;

use oystr_node::{RestartCoordinator, RestartError, RestartOutcome};
use serde_json::json;

use crate::action::MenuAction;
use crate::error::{MenuError, UploadError};
use crate::paths;
use crate::services::{
    AppWindow, Notifier, OverlayKind, Preferences, ShellEvent, ShellServices, UpdateChecker,
    WindowManager, WindowRole,
};
use crate::state::LanguageCode;
use crate::upload::{UploadRequest, Uploader, swarm_locator};

/// Interface message channels understood by the main window.
mod channel {
    pub const TOGGLE_VIEW_DEVTOOLS: &str = "uiAction_toggleWebviewDevTool";
    pub const RUN_TESTS: &str = "uiAction_runTests";
    pub const NAVIGATE_TAB: &str = "uiAction_navigateTab";
    pub const SELECT_TAB: &str = "uiAction_selectTab";
}

/// Tab that shows uploaded content.
const BROWSER_TAB: &str = "browser";

/// Collaborators used by [`MenuHandler`].
#[derive(Clone)]
pub struct MenuServices {
    /// Window lookup and overlays.
    pub windows: Rc<dyn WindowManager>,
    /// Desktop integration.
    pub shell: Rc<dyn ShellServices>,
    /// Swarm client.
    pub uploader: Rc<dyn Uploader>,
    /// Update checks.
    pub updates: Rc<dyn UpdateChecker>,
    /// Preference store.
    pub preferences: Rc<dyn Preferences>,
    /// Shell event sink.
    pub notifier: Rc<dyn Notifier>,
}

/// Runs the action attached to a clicked menu item.
pub struct MenuHandler {
    services: MenuServices,
    coordinator: Rc<RestartCoordinator>,
}

impl MenuHandler {
    /// Create a handler.
    pub fn new(services: MenuServices, coordinator: Rc<RestartCoordinator>) -> Self {
        Self {
            services,
            coordinator,
        }
    }

    /// The coordinator node switches go through.
    #[must_use]
    pub fn coordinator(&self) -> &Rc<RestartCoordinator> {
        &self.coordinator
    }

    /// Execute `action`.
    ///
    /// Errors are reported to the caller for display; none of them leave the
    /// shell in a different state than before the click, except for the
    /// language switch which persists even when the live update fails.
    pub async fn handle(&self, action: MenuAction) -> Result<(), MenuError> {
        tracing::debug!(?action, "Menu action");
        let shell = &self.services.shell;

        match action {
            MenuAction::About => self.open_overlay(OverlayKind::About),
            MenuAction::NewAccount => self.open_overlay(OverlayKind::RequestAccount),
            MenuAction::ImportPresale => self.open_overlay(OverlayKind::ImportAccount),
            MenuAction::OpenRemix => self.open_overlay(OverlayKind::Remix),
            MenuAction::CheckForUpdates => {
                self.services.updates.check_app_visibly();
                Ok(())
            }
            MenuAction::CheckForNodeUpdates => {
                let marker = shell.resolve(paths::SKIPPED_NODE_VERSION);
                shell.write_marker(&marker, "")?;
                self.services.updates.check_node(true);
                Ok(())
            }
            MenuAction::Quit => {
                tracing::info!("Quit requested from menu");
                shell.quit();
                Ok(())
            }
            MenuAction::BackupKeystore(template) => {
                Ok(shell.reveal_in_folder(&shell.resolve(template))?)
            }
            MenuAction::BackupUserData => Ok(shell.open_path(&shell.resolve(paths::USER_DATA))?),
            MenuAction::UploadToSwarm => self.upload_to_swarm().await,
            MenuAction::ToggleFullScreen => {
                let window = self.main_window()?;
                Ok(window.set_full_screen(!window.is_full_screen())?)
            }
            MenuAction::SetLanguage(code) => self.set_language(code),
            MenuAction::ToggleShellDevTools => match self.services.windows.focused() {
                Some(window) => Ok(window.toggle_dev_tools()?),
                None => {
                    tracing::debug!("No focused window for devtools toggle");
                    Ok(())
                }
            },
            MenuAction::ToggleViewDevTools(view) => Ok(self
                .main_window()?
                .send_message(channel::TOGGLE_VIEW_DEVTOOLS, json!(view))?),
            MenuAction::RunTests => Ok(self
                .main_window()?
                .send_message(channel::RUN_TESTS, json!("webview"))?),
            MenuAction::ShowNodeLog => {
                let log = shell.resolve(paths::NODE_LOG);
                if let Err(err) = shell.reveal_in_folder(&log) {
                    tracing::warn!(path = %log.display(), error = %err, "Couldn't show node log file");
                }
                Ok(())
            }
            MenuAction::SwitchNode(request) => {
                match self.coordinator.restart(request)?.await {
                    RestartOutcome::Switched(_) => Ok(()),
                    RestartOutcome::Failed { error, .. } => {
                        Err(MenuError::Restart(RestartError::Backend(error)))
                    }
                }
            }
            MenuAction::OpenExternal(link) => Ok(shell.open_external(link.url())?),
        }
    }

    fn main_window(&self) -> Result<Rc<dyn AppWindow>, MenuError> {
        self.services
            .windows
            .window(WindowRole::Main)
            .ok_or(MenuError::WindowUnavailable("main"))
    }

    fn open_overlay(&self, kind: OverlayKind) -> Result<(), MenuError> {
        tracing::debug!(overlay = kind.id(), "Opening overlay");
        Ok(self.services.windows.create_overlay(kind, kind.options())?)
    }

    /// Live update first (best effort), then persist and notify regardless.
    fn set_language(&self, code: LanguageCode) -> Result<(), MenuError> {
        match self.services.windows.focused() {
            Some(window) => {
                if let Err(err) = window.set_language(&code) {
                    tracing::warn!(language = %code, error = %err, "Live language update failed");
                }
            }
            None => tracing::debug!(language = %code, "No focused window for live language update"),
        }

        let saved = self
            .services
            .preferences
            .set_language(&code)
            .map_err(MenuError::Preferences);
        if let Err(err) = &saved {
            tracing::error!(language = %code, error = %err, "Failed to save language");
        }

        tracing::info!(language = %code, "Language changed");
        self.services
            .notifier
            .emit(ShellEvent::LanguageChanged(code));
        saved
    }

    async fn upload_to_swarm(&self) -> Result<(), MenuError> {
        let shell = &self.services.shell;
        let source = shell
            .pick_upload_source()
            .ok_or(UploadError::Cancelled)?;

        let request = UploadRequest::classify(&source, &**shell);
        tracing::info!(
            path = %request.path.display(),
            kind = ?request.kind,
            default_file = ?request.default_file,
            "Uploading to Swarm"
        );

        let hash = self.services.uploader.upload(request).await?;
        tracing::info!(hash = %hash, "Hash uploaded");

        let url = swarm_locator(&hash);
        let window = self.main_window()?;
        window.send_message(
            channel::NAVIGATE_TAB,
            json!({ "tab": BROWSER_TAB, "url": url, "redirect": url }),
        )?;
        window.send_message(channel::SELECT_TAB, json!(BROWSER_TAB))?;
        Ok(())
    }
}
