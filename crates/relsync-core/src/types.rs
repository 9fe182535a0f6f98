use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The kind of release an operator asks for.
///
/// Each class selects one increment rule of the version state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseClass {
    /// Promote the current release counter to a stable version.
    Latest,
    /// Start a new release line at canary build zero.
    Canary,
    /// Advance the canary counter within the current release line.
    Prerelease,
}

impl ReleaseClass {
    /// All classes in the order they are offered to the operator.
    pub const ALL: [Self; 3] = [Self::Latest, Self::Canary, Self::Prerelease];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Canary => "canary",
            Self::Prerelease => "prerelease",
        }
    }
}

impl fmt::Display for ReleaseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publish channel derived from the shape of a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistTag {
    Latest,
    Canary,
}

impl DistTag {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Canary => "canary",
        }
    }
}

impl fmt::Display for DistTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
