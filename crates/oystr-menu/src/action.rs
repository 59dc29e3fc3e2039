//! Everything a menu click can do.

use oystr_node::NodeSwitchRequest;
use serde::Serialize;

use crate::paths::PathTemplate;
use crate::state::{LanguageCode, ViewId};

/// Action bound to a menu item.
///
/// Values are captured when the tree is built, so a click always acts on the
/// view, language or node that was listed at that moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum MenuAction {
    /// Show the about overlay.
    About,
    /// Run the application update check with visible feedback.
    CheckForUpdates,
    /// Forget the skipped node version and re-check node updates.
    CheckForNodeUpdates,
    /// Terminate the process.
    Quit,
    /// Show the account request overlay.
    NewAccount,
    /// Show the presale wallet import overlay.
    ImportPresale,
    /// Reveal the keystore directory of the active implementation.
    BackupKeystore(PathTemplate),
    /// Open the user-data directory.
    BackupUserData,
    /// Pick a file or directory and upload it to Swarm.
    UploadToSwarm,
    /// Toggle fullscreen on the main window.
    ToggleFullScreen,
    /// Switch the interface language.
    SetLanguage(LanguageCode),
    /// Toggle devtools on the focused shell window.
    ToggleShellDevTools,
    /// Toggle devtools of one content view.
    ToggleViewDevTools(ViewId),
    /// Open Remix in its own window.
    OpenRemix,
    /// Ask the main window to run the interface tests.
    RunTests,
    /// Reveal the node log file.
    ShowNodeLog,
    /// Restart the backend with another implementation or network.
    SwitchNode(NodeSwitchRequest),
    /// Open a project link in the system browser.
    OpenExternal(ExternalLink),
}

/// Project links shown in the help menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExternalLink {
    /// Project wiki.
    Wiki,
    /// Community chat.
    Chat,
    /// Issue tracker.
    IssueTracker,
}

impl ExternalLink {
    /// Target URL.
    #[must_use]
    pub const fn url(&self) -> &'static str {
        match self {
            Self::Wiki => "https://github.com/pirl/oystr/wiki",
            Self::Chat => "https://gitter.im/pirl/oystr",
            Self::IssueTracker => "https://github.com/pirl/oystr/issues",
        }
    }
}
