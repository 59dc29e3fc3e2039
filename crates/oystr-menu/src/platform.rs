//! Host platform identification and per-platform lookup tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operating system family the shell runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformId {
    /// macOS (the "apple-style" menu family).
    MacOs,
    /// Windows.
    Windows,
    /// Linux.
    Linux,
    /// FreeBSD.
    FreeBsd,
    /// Solaris / illumos.
    SunOs,
}

impl PlatformId {
    /// All platforms.
    pub const ALL: [PlatformId; 5] = [
        Self::MacOs,
        Self::Windows,
        Self::Linux,
        Self::FreeBsd,
        Self::SunOs,
    ];

    /// Platform of the running binary.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "freebsd") {
            Self::FreeBsd
        } else if cfg!(any(target_os = "solaris", target_os = "illumos")) {
            Self::SunOs
        } else {
            Self::Linux
        }
    }

    /// Identifier used on the command line.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::MacOs => "macos",
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::FreeBsd => "freebsd",
            Self::SunOs => "sunos",
        }
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PlatformId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|platform| platform.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown platform: {s}"))
    }
}

/// Lookup table from platform to value, with an optional fallback.
///
/// Used for everything in the menu that differs by platform so that the
/// builder never grows `if platform == ...` chains.
#[derive(Debug, Clone, Copy)]
pub struct SystemSwitch<T: 'static> {
    entries: &'static [(PlatformId, T)],
    default: Option<T>,
}

impl<T: Copy> SystemSwitch<T> {
    /// Create a table with explicit entries and a fallback.
    #[must_use]
    pub const fn new(entries: &'static [(PlatformId, T)], default: Option<T>) -> Self {
        Self { entries, default }
    }

    /// Value for `platform`, or the fallback.
    #[must_use]
    pub fn resolve(&self, platform: PlatformId) -> Option<T> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == platform)
            .map(|(_, value)| *value)
            .or(self.default)
    }
}

impl SystemSwitch<bool> {
    /// Table lookup for feature flags; missing entries without a fallback are off.
    #[must_use]
    pub fn enabled(&self, platform: PlatformId) -> bool {
        self.resolve(platform).unwrap_or(false)
    }
}
