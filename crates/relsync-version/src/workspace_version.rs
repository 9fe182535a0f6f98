use std::fmt;
use std::str::FromStr;

use relsync_core::DistTag;
use semver::Version;

use crate::error::VersionError;

const CANARY_MARKER: &str = "canary.";

/// A parsed workspace version: `MAJOR.MINOR.PATCH-N[-canary.C]`.
///
/// `N` is the release counter and `C` the canary counter. Counters are
/// rendered without padding, so leading zeros in the input do not survive a
/// parse/display cycle.
///
/// Both counters are `u64`. The grammar itself has no upper bound, but a
/// counter above `u64::MAX` is rejected with [`VersionError::CounterOverflow`]
/// when parsing, and advancing a counter that is already at `u64::MAX` fails
/// the same way instead of wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkspaceVersion {
    base: Version,
    release: u64,
    canary: Option<u64>,
}

impl WorkspaceVersion {
    /// Builds a version from its parts. Pre-release and build metadata of
    /// `base` are dropped; only `MAJOR.MINOR.PATCH` is kept.
    #[must_use]
    pub fn new(base: &Version, release: u64, canary: Option<u64>) -> Self {
        Self {
            base: Version::new(base.major, base.minor, base.patch),
            release,
            canary,
        }
    }

    /// # Errors
    ///
    /// Returns [`VersionError::Malformed`] if `input` does not match
    /// `MAJOR.MINOR.PATCH-N` optionally followed by `-canary.C`, or
    /// [`VersionError::CounterOverflow`] if a counter does not fit in 64 bits.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let malformed = |reason| VersionError::Malformed {
            input: input.to_string(),
            reason,
        };

        let (base, rest) = input
            .split_once('-')
            .ok_or_else(|| malformed("missing release counter"))?;
        let base = parse_base(base).ok_or_else(|| malformed("prefix is not MAJOR.MINOR.PATCH"))?;

        let (release, suffix) = match rest.split_once('-') {
            Some((release, suffix)) => (release, Some(suffix)),
            None => (rest, None),
        };

        let release = parse_counter(input, release, "release")?;

        let canary = match suffix {
            None => None,
            Some(suffix) => {
                let counter = suffix
                    .strip_prefix(CANARY_MARKER)
                    .ok_or_else(|| malformed("suffix is not '-canary.C'"))?;
                Some(parse_counter(input, counter, "canary")?)
            }
        };

        Ok(Self {
            base,
            release,
            canary,
        })
    }

    #[must_use]
    pub fn base(&self) -> &Version {
        &self.base
    }

    #[must_use]
    pub fn release(&self) -> u64 {
        self.release
    }

    #[must_use]
    pub fn canary(&self) -> Option<u64> {
        self.canary
    }

    #[must_use]
    pub fn is_canary(&self) -> bool {
        self.canary.is_some()
    }

    /// `latest` for `PREFIX-N`, `canary` for anything carrying a canary suffix.
    #[must_use]
    pub fn dist_tag(&self) -> DistTag {
        if self.is_canary() {
            DistTag::Canary
        } else {
            DistTag::Latest
        }
    }
}

impl FromStr for WorkspaceVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for WorkspaceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.base, self.release)?;
        if let Some(canary) = self.canary {
            write!(f, "-{CANARY_MARKER}{canary}")?;
        }
        Ok(())
    }
}

fn parse_base(s: &str) -> Option<Version> {
    let mut parts = s.split('.');
    let major = parse_digits(parts.next()?)?;
    let minor = parse_digits(parts.next()?)?;
    let patch = parse_digits(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some(Version::new(major, minor, patch))
}

fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_counter(input: &str, s: &str, counter: &'static str) -> Result<u64, VersionError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VersionError::Malformed {
            input: input.to_string(),
            reason: if counter == "release" {
                "release counter is not a non-negative integer"
            } else {
                "canary counter is not a non-negative integer"
            },
        });
    }
    s.parse().map_err(|_| VersionError::CounterOverflow {
        input: input.to_string(),
        counter,
    })
}
