use std::fmt;

use relsync_core::{DistTag, ReleaseClass};

use crate::error::VersionError;
use crate::workspace_version::WorkspaceVersion;

/// A computed next version, labelled with the class that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateVersion {
    pub class: ReleaseClass,
    pub version: WorkspaceVersion,
    pub tag: DistTag,
    /// Set when the candidate equals the current version. Only `latest` can
    /// produce this, when the current version has no canary suffix.
    pub is_noop: bool,
}

impl CandidateVersion {
    /// # Errors
    ///
    /// Returns [`VersionError::CounterOverflow`] if a counter cannot be
    /// advanced.
    pub fn compute(current: &WorkspaceVersion, class: ReleaseClass) -> Result<Self, VersionError> {
        let version = next_version(current, class)?;
        let tag = version.dist_tag();
        let is_noop = version == *current;
        Ok(Self {
            class,
            version,
            tag,
            is_noop,
        })
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.class.as_str()
    }

    /// Version-control tag name, `{tag}/v{version}`.
    #[must_use]
    pub fn tag_name(&self) -> String {
        format!("{}/v{}", self.tag, self.version)
    }
}

impl fmt::Display for CandidateVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.label(), self.version, self.tag)
    }
}

/// Applies the increment rule of `class` to `current`.
///
/// - `latest`: `PREFIX-N`, the canary suffix stripped and `N` unchanged.
/// - `canary`: `PREFIX-(N+1)-canary.0`.
/// - `prerelease`: `PREFIX-N-canary.(C+1)` when a canary suffix is present,
///   otherwise `PREFIX-N-canary.(N+1)`.
///
/// # Errors
///
/// Returns [`VersionError::CounterOverflow`] if a counter is already at
/// `u64::MAX`.
pub fn next_version(
    current: &WorkspaceVersion,
    class: ReleaseClass,
) -> Result<WorkspaceVersion, VersionError> {
    let base = current.base();
    let release = current.release();

    let next = match class {
        ReleaseClass::Latest => WorkspaceVersion::new(base, release, None),
        ReleaseClass::Canary => {
            WorkspaceVersion::new(base, increment(current, release, "release")?, Some(0))
        }
        ReleaseClass::Prerelease => {
            // The seed for a fresh canary line is N+1, not 0 as in the canary rule.
            let canary = match current.canary() {
                Some(canary) => increment(current, canary, "canary")?,
                None => increment(current, release, "release")?,
            };
            WorkspaceVersion::new(base, release, Some(canary))
        }
    };

    Ok(next)
}

/// Parses `current` and computes the candidate for `class`.
///
/// # Errors
///
/// Returns [`VersionError::Malformed`] if `current` does not follow the
/// workspace version grammar, or [`VersionError::CounterOverflow`].
pub fn next_candidate(
    current: &str,
    class: ReleaseClass,
) -> Result<CandidateVersion, VersionError> {
    let current = WorkspaceVersion::parse(current)?;
    CandidateVersion::compute(&current, class)
}

/// One candidate per release class, in [`ReleaseClass::ALL`] order.
///
/// # Errors
///
/// Returns [`VersionError::CounterOverflow`] if any rule cannot advance a
/// counter.
pub fn candidates(current: &WorkspaceVersion) -> Result<Vec<CandidateVersion>, VersionError> {
    ReleaseClass::ALL
        .iter()
        .map(|class| CandidateVersion::compute(current, *class))
        .collect()
}

fn increment(
    current: &WorkspaceVersion,
    value: u64,
    counter: &'static str,
) -> Result<u64, VersionError> {
    value
        .checked_add(1)
        .ok_or_else(|| VersionError::CounterOverflow {
            input: current.to_string(),
            counter,
        })
}
