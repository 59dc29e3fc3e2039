//! Shell-level error type.

use std::io;
use std::path::PathBuf;

use oystr_menu::MenuError;
use oystr_node::{BackendError, NodeError};
use thiserror::Error;

/// Errors raised by the shell host.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ShellError {
    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// File that was written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A file had invalid contents.
    #[error("invalid {}: {reason}", path.display())]
    Parse {
        /// File that was parsed.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// Settings could not be serialized.
    #[error("failed to serialize settings: {0}")]
    Serialize(String),

    /// The platform reported no home directory.
    #[error("no home directory available")]
    NoHomeDir,

    /// The native menu rejected the tree.
    #[error("failed to install menu: {0}")]
    MenuInstall(String),

    /// No menu item has the requested id.
    #[error("no menu item with id '{0}'")]
    UnknownItem(String),

    /// The menu item is currently disabled.
    #[error("menu item '{0}' is disabled")]
    DisabledItem(String),

    /// The menu item is handled natively and has no action.
    #[error("menu item '{0}' is handled by the platform")]
    NativeItem(String),

    /// An HTTP request failed.
    #[error("network error: {0}")]
    Network(String),

    /// A release tag is not a version.
    #[error("invalid version format: {0}")]
    InvalidVersion(String),

    /// Invalid node or network name.
    #[error(transparent)]
    Node(#[from] NodeError),

    /// The node process could not be started.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A menu action failed.
    #[error(transparent)]
    Action(#[from] MenuError),
}

impl ShellError {
    /// Returns a user-friendly error message suitable for display in the UI.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Read { .. } | Self::Parse { .. } => "A configuration file could not be loaded.",
            Self::Write { .. } | Self::Serialize(_) => "Your settings could not be saved.",
            Self::NoHomeDir => "Your home directory could not be determined.",
            Self::MenuInstall(_) => "The application menu could not be installed.",
            Self::UnknownItem(_) | Self::NativeItem(_) => "That menu item does not exist.",
            Self::DisabledItem(_) => "That menu item is not available right now.",
            Self::Network(_) => "Could not connect. Please check your internet connection.",
            Self::InvalidVersion(_) => "An unexpected error occurred.",
            Self::Node(_) => "Unknown node or network.",
            Self::Backend(err) => err.user_message(),
            Self::Action(err) => err.user_message(),
        }
    }
}

/// Result type alias for shell operations.
pub type Result<T> = std::result::Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    use oystr_menu::UploadError;

    #[test]
    fn test_user_messages() {
        let err = ShellError::UnknownItem("app.nope".to_string());
        assert_eq!(err.to_string(), "no menu item with id 'app.nope'");
        assert!(err.user_message().contains("does not exist"));

        let err = ShellError::from(MenuError::from(UploadError::Cancelled));
        assert_eq!(err.user_message(), "Upload cancelled.");
    }
}
