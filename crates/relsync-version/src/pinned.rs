use std::fmt;
use std::str::FromStr;

use semver::Version;

use crate::error::VersionError;

/// The bare `MAJOR.MINOR.PATCH` version of the upstream dependency the
/// workspace tracks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PinnedVersion(Version);

impl PinnedVersion {
    /// Parses a pinned requirement such as `0.5.0` or `=0.5.0`.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::MalformedUpstream`] if the value is not valid
    /// semver or carries pre-release or build metadata.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let trimmed = input.trim();
        let bare = trimmed.strip_prefix('=').unwrap_or(trimmed).trim_start();

        let version = Version::parse(bare).map_err(|_| VersionError::MalformedUpstream {
            input: input.to_string(),
            reason: "not a MAJOR.MINOR.PATCH version",
        })?;

        if !version.pre.is_empty() || !version.build.is_empty() {
            return Err(VersionError::MalformedUpstream {
                input: input.to_string(),
                reason: "pre-release and build metadata are not allowed",
            });
        }

        Ok(Self(version))
    }

    #[must_use]
    pub fn version(&self) -> &Version {
        &self.0
    }
}

impl FromStr for PinnedVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PinnedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
