//! Swarm uploads started from the file menu.

use std::path::{Path, PathBuf};

use futures_util::future::LocalBoxFuture;
use serde::Serialize;

use crate::error::UploadError;
use crate::services::ShellServices;

/// Entry point served when a directory contains it.
const DEFAULT_ENTRY: &str = "index.html";

/// What is being uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    /// A single file.
    File,
    /// A directory tree.
    Directory,
}

/// A classified upload source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Picked file or directory.
    pub path: PathBuf,
    /// File or directory.
    pub kind: UploadKind,
    /// Entry served at the manifest root, e.g. `/index.html`.
    pub default_file: Option<String>,
}

impl UploadRequest {
    /// Classify `path` using the shell's view of the file system.
    #[must_use]
    pub fn classify(path: &Path, shell: &dyn ShellServices) -> Self {
        let kind = if shell.is_dir(path) {
            UploadKind::Directory
        } else {
            UploadKind::File
        };
        let default_file = (kind == UploadKind::Directory
            && shell.exists(&path.join(DEFAULT_ENTRY)))
        .then(|| format!("/{DEFAULT_ENTRY}"));

        Self {
            path: path.to_path_buf(),
            kind,
            default_file,
        }
    }
}

/// Swarm client.
pub trait Uploader {
    /// Upload `request`, resolving to the content hash.
    fn upload(&self, request: UploadRequest) -> LocalBoxFuture<'_, Result<String, UploadError>>;
}

/// Browser URL of uploaded content.
#[must_use]
pub fn swarm_locator(hash: &str) -> String {
    format!("bzz://{hash}")
}
