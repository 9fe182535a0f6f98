use std::path::Path;

use relsync_version::{CandidateVersion, candidates};
use tracing::warn;

use super::check::{CheckOutput, validate_workspace};
use crate::Result;
use crate::traits::{VersionSource, WorkspaceIndex};

#[derive(Debug, Clone)]
pub struct CandidatesOutput {
    pub check: CheckOutput,
    pub candidates: Vec<CandidateVersion>,
}

/// Validates the workspace and computes one candidate per release class
/// without changing anything.
pub struct CandidatesOperation<V, W> {
    version_source: V,
    workspace_index: W,
}

impl<V, W> CandidatesOperation<V, W>
where
    V: VersionSource,
    W: WorkspaceIndex,
{
    pub fn new(version_source: V, workspace_index: W) -> Self {
        Self {
            version_source,
            workspace_index,
        }
    }

    /// # Errors
    ///
    /// Returns an error if validation fails or a counter cannot be advanced.
    pub fn execute(&self, root: &Path) -> Result<CandidatesOutput> {
        let check = validate_workspace(&self.version_source, &self.workspace_index, root)?;
        let candidates = candidates(&check.current)?;
        warn_noop_candidates(&candidates);

        Ok(CandidatesOutput { check, candidates })
    }
}

pub(crate) fn warn_noop_candidates(candidates: &[CandidateVersion]) {
    for candidate in candidates.iter().filter(|c| c.is_noop) {
        warn!(
            class = %candidate.class,
            version = %candidate.version,
            "candidate equals the current version; releasing it publishes nothing new"
        );
    }
}
