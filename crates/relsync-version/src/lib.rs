//! Version handling for workspaces pinned to an upstream release.
//!
//! A workspace version has the shape `MAJOR.MINOR.PATCH-N[-canary.C]`, where
//! the `MAJOR.MINOR.PATCH` prefix is the pinned upstream version. This crate
//! parses that shape, checks it against the pin, and computes the next
//! version for each [`ReleaseClass`](relsync_core::ReleaseClass).

mod candidate;
mod consistency;
mod error;
mod pinned;
mod workspace_version;

pub use candidate::{CandidateVersion, candidates, next_candidate, next_version};
pub use consistency::validate_consistency;
pub use error::VersionError;
pub use pinned::PinnedVersion;
pub use workspace_version::WorkspaceVersion;
