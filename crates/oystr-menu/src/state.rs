//! Runtime state snapshot consumed by the menu builder.

use std::fmt;

use oystr_node::NodeState;
use serde::{Deserialize, Serialize};

/// Which interface the shell is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiMode {
    /// Full browser shell with tabs and content views.
    #[default]
    Mist,
    /// Single-purpose wallet shell.
    Wallet,
}

impl UiMode {
    /// Whether this is the full browser shell.
    #[must_use]
    pub const fn is_full_shell(&self) -> bool {
        matches!(self, Self::Mist)
    }

    /// Identifier used in settings.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Mist => "mist",
            Self::Wallet => "wallet",
        }
    }
}

impl fmt::Display for UiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Interface language code, e.g. `en` or `zh-TW`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Reserved code of the translation-development catalog.
    pub const DEV: &'static str = "dev";

    /// Wrap a language code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the reserved development code.
    #[must_use]
    pub fn is_dev(&self) -> bool {
        self.0 == Self::DEV
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::new("en")
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// Opaque identifier of a content view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(String);

impl ViewId {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An open content view (browser tab / dapp view).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentView {
    /// Opaque identifier used to address the view.
    pub id: ViewId,
    /// Display name.
    pub name: String,
}

impl ContentView {
    /// Create a content view entry.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ViewId::new(id),
            name: name.into(),
        }
    }
}

/// Everything the menu depends on, captured at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeState {
    /// Committed backend node state.
    pub node: NodeState,
    /// Interface mode.
    pub ui_mode: UiMode,
    /// Current interface language.
    pub language: LanguageCode,
    /// Open content views, in tab order.
    #[serde(default)]
    pub views: Vec<ContentView>,
}

impl RuntimeState {
    /// Snapshot without any open content views.
    #[must_use]
    pub fn new(node: NodeState, ui_mode: UiMode, language: LanguageCode) -> Self {
        Self {
            node,
            ui_mode,
            language,
            views: Vec::new(),
        }
    }

    /// Replace the open content views.
    #[must_use]
    pub fn with_views(mut self, views: Vec<ContentView>) -> Self {
        self.views = views;
        self
    }
}
