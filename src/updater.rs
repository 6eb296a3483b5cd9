/// Update check and apply.
///
/// Only the interface exists: there is no version source, download or
/// replace step yet, so `StubUpdater` always reports "up to date" and
/// refuses to update.
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UpdateError {
    #[error("Updating is not supported by this build")]
    Unsupported,
    #[error("Invalid version string: {0:?}")]
    InvalidVersion(String),
}

/// Semantic version, ordered by major, then minor, then patch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Version of the running build
    pub fn current() -> Self {
        Version::new(
            env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0),
            env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0),
            env!("CARGO_PKG_VERSION_PATCH").parse().unwrap_or(0),
        )
    }

    pub fn newer_than(&self, other: &Version) -> bool {
        self > other
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = UpdateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || UpdateError::InvalidVersion(s.to_string());
        let trimmed = s.trim().trim_start_matches('v');

        let mut parts = trimmed.split('.').map(|part| part.parse::<u32>().map_err(|_| invalid()));
        let major = parts.next().ok_or_else(invalid)??;
        let minor = parts.next().ok_or_else(invalid)??;
        let patch = parts.next().ok_or_else(invalid)??;
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Version::new(major, minor, patch))
    }
}

pub trait Updater {
    /// Latest available version, or `None` if up to date or unreachable
    fn check_for_update(&self) -> Option<Version>;

    /// Fetch and apply `version`
    fn update(&self, version: &Version) -> Result<(), UpdateError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StubUpdater;

impl Updater for StubUpdater {
    fn check_for_update(&self) -> Option<Version> {
        tracing::debug!("No update source configured");
        None
    }

    fn update(&self, version: &Version) -> Result<(), UpdateError> {
        tracing::warn!("Cannot apply update to {}", version);
        Err(UpdateError::Unsupported)
    }
}
