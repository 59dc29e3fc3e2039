//! Error types for menu actions.

use oystr_node::RestartError;
use thiserror::Error;

/// Errors raised by window operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WindowError {
    /// The window was closed before the call reached it.
    #[error("window is closed")]
    Closed,

    /// The window rejected the operation.
    #[error("window operation failed: {0}")]
    Failed(String),
}

/// Errors raised by Swarm uploads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UploadError {
    /// The user dismissed the picker.
    #[error("no upload source selected")]
    Cancelled,

    /// The source could not be read.
    #[error("cannot read upload source: {0}")]
    Source(String),

    /// The Swarm node rejected the upload.
    #[error("swarm upload failed: {0}")]
    Swarm(String),
}

/// Errors executing a menu action.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MenuError {
    /// The window the action targets does not exist.
    #[error("no {0} window available")]
    WindowUnavailable(&'static str),

    /// A window call failed.
    #[error(transparent)]
    Window(#[from] WindowError),

    /// A shell service call (file manager, browser, file system) failed.
    #[error("shell operation failed: {0}")]
    Shell(#[from] std::io::Error),

    /// A node switch could not be started.
    #[error(transparent)]
    Restart(#[from] RestartError),

    /// The Swarm upload failed.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// The preference store rejected a write.
    #[error("failed to save preferences: {0}")]
    Preferences(String),
}

impl MenuError {
    /// Returns a user-friendly error message suitable for display in the UI.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::WindowUnavailable(_) | Self::Window(_) => "The window is not available.",
            Self::Shell(_) => "The file or link could not be opened.",
            Self::Restart(err) => err.user_message(),
            Self::Upload(UploadError::Cancelled) => "Upload cancelled.",
            Self::Upload(_) => "The upload to Swarm failed.",
            Self::Preferences(_) => "Your preferences could not be saved.",
        }
    }

    /// Whether this error only reflects the user backing out.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Upload(UploadError::Cancelled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = MenuError::from(RestartError::AlreadyInProgress);
        assert!(err.user_message().contains("already in progress"));

        let err = MenuError::from(UploadError::Cancelled);
        assert!(err.is_cancelled());
        assert_eq!(err.user_message(), "Upload cancelled.");

        let err = MenuError::from(std::io::Error::other("denied"));
        assert_eq!(err.to_string(), "shell operation failed: denied");
    }
}
