//! Application settings - persisted user preferences.
//!
//! Settings are stored in the platform-specific configuration folder:
//! - macOS: ~/Library/Application Support/org.Pirl.Oystr/
//! - Windows: %APPDATA%/Pirl/Oystr/config/
//! - Linux: ~/.config/oystr/

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use oystr_menu::{LanguageCode, Preferences, UiMode};
use oystr_node::{Network, NodeState, NodeType};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShellError};

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "Pirl";
const APP_NAME: &str = "Oystr";
const CONFIG_FILENAME: &str = "settings.toml";

/// Platform directories of the application, if the platform has any.
#[must_use]
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

/// Application settings.
///
/// Serialized to TOML and stored in the user's config directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// General application settings.
    pub general: GeneralSettings,

    /// Backend node settings.
    pub node: NodeSettings,

    /// Update settings.
    pub updates: UpdateSettings,
}

/// General application settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Interface language; follows the system locale when unset.
    pub language: Option<LanguageCode>,

    /// Interface mode.
    pub ui_mode: UiMode,
}

/// Backend node settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSettings {
    /// Implementation started at launch.
    pub implementation: NodeType,

    /// Network started at launch.
    pub network: Network,

    /// Connect to a node started elsewhere instead of spawning one.
    pub external: bool,

    /// Client binaries manifest; defaults to `clientBinaries.json` in the
    /// user-data directory.
    pub manifest: Option<PathBuf>,

    /// Entry point the main window loads.
    pub interface_url: String,

    /// How long a freshly spawned node must stay up to count as started.
    pub startup_grace_ms: u64,

    /// HTTP gateway of the local Swarm node.
    pub swarm_gateway: String,
}

impl Default for NodeSettings {
    fn default() -> Self {
        Self {
            implementation: NodeType::Geth,
            network: Network::PRIMARY,
            external: false,
            manifest: None,
            interface_url: "file://interface/index.html".to_string(),
            startup_grace_ms: 1500,
            swarm_gateway: "http://localhost:8500".to_string(),
        }
    }
}

impl NodeSettings {
    /// Node state the shell starts with.
    #[must_use]
    pub fn initial_state(&self) -> NodeState {
        if self.external {
            NodeState::external(self.implementation, self.network)
        } else {
            NodeState::owned(self.implementation, self.network)
        }
    }
}

/// Update settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateSettings {
    /// GitHub `owner/repo` publishing application releases.
    pub repository: String,
}

impl Default for UpdateSettings {
    fn default() -> Self {
        Self {
            repository: "pirl/oystr".to_string(),
        }
    }
}

impl Settings {
    /// Default config file path.
    #[must_use]
    pub fn config_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
    }

    /// Load settings from the default path.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from `path`.
    ///
    /// Returns default settings if the file is missing or cannot be parsed.
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    tracing::debug!(path = %path.display(), "Loaded settings");
                    settings
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to parse settings file, using defaults");
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No settings file found, using defaults");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read settings file, using defaults");
                Self::default()
            }
        }
    }

    /// Save settings to `path`, creating its directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ShellError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ShellError::Serialize(e.to_string()))?;

        fs::write(path, content).map_err(|source| ShellError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Settings bound to the file they were loaded from.
///
/// Backs the menu's [`Preferences`]; every change is written through.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: RefCell<Settings>,
}

impl SettingsStore {
    /// Load the store at `path`.
    #[must_use]
    pub fn open(path: PathBuf) -> Self {
        let settings = Settings::load_from(&path);
        Self {
            path,
            settings: RefCell::new(settings),
        }
    }

    /// Path the store writes to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of the current settings.
    #[must_use]
    pub fn get(&self) -> Settings {
        self.settings.borrow().clone()
    }

    /// Apply `change` and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be saved; the in-memory change
    /// is kept either way.
    pub fn update(&self, change: impl FnOnce(&mut Settings)) -> Result<()> {
        let mut settings = self.settings.borrow_mut();
        change(&mut settings);
        settings.save_to(&self.path)
    }
}

impl Preferences for SettingsStore {
    fn set_language(&self, code: &LanguageCode) -> std::result::Result<(), String> {
        self.update(|settings| settings.general.language = Some(code.clone()))
            .map_err(|e| e.to_string())
    }
}
