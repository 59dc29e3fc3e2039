//! Client binaries manifest.
//!
//! The binary manager drops a `clientBinaries.json` next to the downloaded
//! node clients:
//!
//! ```json
//! { "clients": { "geth": { "version": "1.8.2", "path": "/opt/geth/geth" } } }
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use oystr_menu::{BinaryCatalog, ClientBinary};
use oystr_node::NodeType;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShellError};

/// Manifest file name inside the user-data directory.
pub const MANIFEST_FILENAME: &str = "clientBinaries.json";

/// One installed client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Version shown in the node menu.
    pub version: String,
    /// Executable to spawn.
    pub path: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ManifestFile {
    #[serde(default)]
    clients: BTreeMap<String, ManifestEntry>,
}

/// Installed node clients, keyed by implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientManifest {
    clients: BTreeMap<NodeType, ManifestEntry>,
}

impl ClientManifest {
    /// Manifest listing `clients`.
    #[must_use]
    pub fn new(clients: BTreeMap<NodeType, ManifestEntry>) -> Self {
        Self { clients }
    }

    /// Parse manifest JSON. Unknown client names are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid manifest.
    pub fn parse(json: &str, path: &Path) -> Result<Self> {
        let file: ManifestFile = serde_json::from_str(json).map_err(|e| ShellError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let clients = file
            .clients
            .into_iter()
            .filter_map(|(name, entry)| match name.parse::<NodeType>() {
                Ok(node) => Some((node, entry)),
                Err(err) => {
                    tracing::debug!(client = %name, error = %err, "Skipping unknown client");
                    None
                }
            })
            .collect();
        Ok(Self { clients })
    }

    /// Read the manifest at `path`.
    ///
    /// A missing file is an empty manifest: nothing is installed yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(json) => {
                let manifest = Self::parse(&json, path)?;
                tracing::debug!(
                    path = %path.display(),
                    clients = manifest.clients.len(),
                    "Loaded client manifest"
                );
                Ok(manifest)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "No client manifest, no node binaries available");
                Ok(Self::default())
            }
            Err(source) => Err(ShellError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Executable of `node`, if installed.
    #[must_use]
    pub fn binary_path(&self, node: NodeType) -> Option<&Path> {
        self.clients.get(&node).map(|entry| entry.path.as_path())
    }

    /// Whether no client is installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl BinaryCatalog for ClientManifest {
    fn available(&self, node: NodeType) -> Option<ClientBinary> {
        self.clients
            .get(&node)
            .map(|entry| ClientBinary::new(entry.version.clone()))
    }
}

/// Manifest on disk, re-read when the binary manager reports changes.
#[derive(Debug)]
pub struct ManifestCatalog {
    path: PathBuf,
    manifest: RefCell<ClientManifest>,
}

impl ManifestCatalog {
    /// Load the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: PathBuf) -> Result<Self> {
        let manifest = ClientManifest::load(&path)?;
        Ok(Self {
            path,
            manifest: RefCell::new(manifest),
        })
    }

    /// Catalog serving a fixed manifest, never backed by a file.
    #[must_use]
    pub fn fixed(manifest: ClientManifest) -> Self {
        Self {
            path: PathBuf::new(),
            manifest: RefCell::new(manifest),
        }
    }

    /// Re-read the manifest; the previous one stays on error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn reload(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Ok(());
        }
        let manifest = ClientManifest::load(&self.path)?;
        *self.manifest.borrow_mut() = manifest;
        Ok(())
    }

    /// Executable of `node`, if installed.
    #[must_use]
    pub fn binary_path(&self, node: NodeType) -> Option<PathBuf> {
        self.manifest
            .borrow()
            .binary_path(node)
            .map(Path::to_path_buf)
    }
}

impl BinaryCatalog for ManifestCatalog {
    fn available(&self, node: NodeType) -> Option<ClientBinary> {
        self.manifest.borrow().available(node)
    }
}
