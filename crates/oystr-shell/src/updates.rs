//! Update checks behind the "Check for updates" menu items.
//!
//! The application check asks the GitHub Releases API for the latest tag and
//! compares it with the running version. The node check re-reads the client
//! manifest the binary manager maintains and remembers which binaries changed
//! so the shell can restart the running node into them.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use oystr_menu::{BinaryCatalog, UpdateChecker};
use oystr_node::NodeType;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tokio::task::JoinHandle;

use crate::catalog::ManifestCatalog;
use crate::error::{Result, ShellError};

/// GitHub API base URL.
const GITHUB_API_URL: &str = "https://api.github.com";

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("oystr/", env!("CARGO_PKG_VERSION"));

/// A `major.minor.patch` release version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Version {
    /// Major version number.
    pub major: u32,
    /// Minor version number.
    pub minor: u32,
    /// Patch version number.
    pub patch: u32,
}

impl Version {
    /// Create a version.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Version of the running application.
    #[must_use]
    pub fn current() -> Self {
        Self::from_str(env!("CARGO_PKG_VERSION")).unwrap_or_default()
    }
}

impl FromStr for Version {
    type Err = ShellError;

    /// Parses `1.2.3`, `v1.2.3` and ignores any `-pre` suffix.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let s = s.strip_prefix('v').unwrap_or(s);
        let core = s.split('-').next().unwrap_or(s);
        let invalid = || ShellError::InvalidVersion(s.to_string());

        let mut parts = core.split('.');
        let mut next = || -> Result<u32> {
            parts
                .next()
                .and_then(|part| part.parse().ok())
                .ok_or_else(invalid)
        };
        let version = Self::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }
}

/// Subset of a GitHub release the check needs.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Release tag, e.g. `v0.9.0`.
    pub tag_name: String,
    /// Release page.
    pub html_url: String,
}

/// GitHub API client for the latest release of one repository.
#[derive(Debug, Clone)]
pub struct ReleaseClient {
    client: reqwest::Client,
    repository: String,
}

impl ReleaseClient {
    /// Client for `owner/repo`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(repository: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ShellError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            repository: repository.into(),
        })
    }

    /// Fetch the latest published release.
    ///
    /// # Errors
    ///
    /// Returns an error on network failures or unexpected responses.
    pub async fn latest(&self) -> Result<Release> {
        let url = format!("{GITHUB_API_URL}/repos/{}/releases/latest", self.repository);
        tracing::debug!(url = %url, "Fetching latest release");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ShellError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShellError::Network(format!(
                "GitHub API error ({status}) for {url}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ShellError::Network(format!("invalid release response: {e}")))
    }
}

/// Result of an application update check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    /// Running the latest release.
    UpToDate(Version),
    /// A newer release exists.
    Available {
        /// Newer version.
        version: Version,
        /// Release page.
        url: String,
    },
}

impl UpdateStatus {
    /// Compare `release` against `current`.
    ///
    /// # Errors
    ///
    /// Returns an error if the release tag is not a version.
    pub fn compare(current: Version, release: &Release) -> Result<Self> {
        let latest = Version::from_str(&release.tag_name)?;
        Ok(if latest > current {
            Self::Available {
                version: latest,
                url: release.html_url.clone(),
            }
        } else {
            Self::UpToDate(current)
        })
    }
}

/// [`UpdateChecker`] backed by GitHub releases and the client manifest.
///
/// Checks run as local tasks; [`Self::settle`] waits for them.
pub struct ReleaseUpdates {
    releases: ReleaseClient,
    catalog: Rc<ManifestCatalog>,
    pending: RefCell<Vec<JoinHandle<()>>>,
    updated: RefCell<Vec<NodeType>>,
}

impl ReleaseUpdates {
    /// Checker using `releases` and `catalog`.
    pub fn new(releases: ReleaseClient, catalog: Rc<ManifestCatalog>) -> Self {
        Self {
            releases,
            catalog,
            pending: RefCell::new(Vec::new()),
            updated: RefCell::new(Vec::new()),
        }
    }

    /// Implementations whose binary changed in a node check that asked for
    /// a restart. Cleared by the call.
    pub fn take_updated(&self) -> Vec<NodeType> {
        std::mem::take(&mut *self.updated.borrow_mut())
    }

    /// Wait for every check started so far.
    pub async fn settle(&self) {
        let pending: Vec<_> = self.pending.borrow_mut().drain(..).collect();
        for task in pending {
            if let Err(err) = task.await {
                tracing::error!(error = %err, "Update check task failed");
            }
        }
    }
}

impl UpdateChecker for ReleaseUpdates {
    /// Must be called from inside a `tokio::task::LocalSet`.
    fn check_app_visibly(&self) {
        let releases = self.releases.clone();
        let task = tokio::task::spawn_local(async move {
            let status = match releases.latest().await {
                Ok(release) => UpdateStatus::compare(Version::current(), &release),
                Err(err) => Err(err),
            };
            match status {
                Ok(UpdateStatus::UpToDate(version)) => {
                    tracing::info!(version = %version, "Application is up to date");
                    println!("Oystr {version} is up to date.");
                }
                Ok(UpdateStatus::Available { version, url }) => {
                    tracing::info!(version = %version, url = %url, "Application update available");
                    println!("Oystr {version} is available: {url}");
                    if let Err(err) = open::that(&url) {
                        tracing::warn!(error = %err, "Failed to open release page");
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Application update check failed");
                    println!("Could not check for updates: {}", err.user_message());
                }
            }
        });
        self.pending.borrow_mut().push(task);
    }

    fn check_node(&self, restart_after_update: bool) {
        let before: Vec<_> = NodeType::ALL
            .into_iter()
            .map(|node| self.catalog.available(node))
            .collect();

        if let Err(err) = self.catalog.reload() {
            tracing::warn!(error = %err, "Node update check failed");
            return;
        }

        for (node, previous) in NodeType::ALL.into_iter().zip(before) {
            let current = self.catalog.available(node);
            if current != previous {
                tracing::info!(
                    node = %node,
                    previous = ?previous.map(|b| b.version),
                    current = ?current.map(|b| b.version),
                    restart_after_update,
                    "Node binary changed"
                );
                if restart_after_update {
                    self.updated.borrow_mut().push(node);
                }
            }
        }
    }
}
