use std::fmt;
use std::path::{Path, PathBuf};

use relsync_core::ReleaseClass;
use relsync_git::{CommitInfo, TagInfo};
use relsync_version::{CandidateVersion, PinnedVersion, WorkspaceVersion, candidates};
use tracing::{debug, info};

use super::sync::{ManifestSynchronizer, SyncAuditLog};
use crate::Result;
use crate::error::OperationError;
use crate::operations::candidates::warn_noop_candidates;
use crate::operations::check::validate_workspace;
use crate::traits::{
    CandidateSelection, ChoicePrompter, ConfirmPrompter, Confirmation, GitProvider, ManifestStore,
    VersionSource, WorkspaceIndex,
};

#[derive(Debug, Clone)]
pub struct ReleaseInput {
    /// Skips the choice prompt when set.
    pub class: Option<ReleaseClass>,
    /// Skips the confirmation prompt.
    pub assume_yes: bool,
    pub dry_run: bool,
    /// Commit and tag after the manifests are written.
    pub git: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    NoSelection,
    Declined,
}

/// What a confirmed release will do.
#[derive(Debug, Clone)]
pub struct ReleasePlan {
    pub pinned: PinnedVersion,
    pub current: WorkspaceVersion,
    pub candidate: CandidateVersion,
    pub tag_name: String,
    /// Manifests whose content changes, root first.
    pub manifests: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ReleaseGitResult {
    pub commit: CommitInfo,
    pub tag: TagInfo,
}

#[derive(Debug, Clone)]
pub struct ReleaseOutput {
    pub plan: ReleasePlan,
    pub audit: SyncAuditLog,
    pub git: Option<ReleaseGitResult>,
}

#[derive(Debug)]
pub enum ReleaseOutcome {
    Aborted(AbortReason),
    DryRun(ReleasePlan),
    Released(ReleaseOutput),
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Validated,
    CandidatesOffered,
    Selected,
    Confirmed,
    Applied,
    Tagged,
    Aborted,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validated => "validated",
            Self::CandidatesOffered => "candidates-offered",
            Self::Selected => "selected",
            Self::Confirmed => "confirmed",
            Self::Applied => "applied",
            Self::Tagged => "tagged",
            Self::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

fn enter(phase: Phase) {
    info!(phase = %phase, "release");
}

/// Validates the workspace, offers the candidates, synchronizes every
/// manifest to the chosen version and tags the result.
///
/// No manifest is touched before the operator confirms.
pub struct ReleaseOperation<V, W, M, G, C, K> {
    version_source: V,
    workspace_index: W,
    manifest_store: M,
    git_provider: G,
    chooser: C,
    confirmer: K,
}

#[cfg(test)]
impl<V, W, M, G, C, K> ReleaseOperation<V, W, M, G, C, K> {
    pub(crate) fn manifest_store(&self) -> &M {
        &self.manifest_store
    }

    pub(crate) fn git_provider(&self) -> &G {
        &self.git_provider
    }

    pub(crate) fn chooser(&self) -> &C {
        &self.chooser
    }

    pub(crate) fn confirmer(&self) -> &K {
        &self.confirmer
    }
}

impl<V, W, M, G, C, K> ReleaseOperation<V, W, M, G, C, K>
where
    V: VersionSource,
    W: WorkspaceIndex,
    M: ManifestStore,
    G: GitProvider,
    C: ChoicePrompter,
    K: ConfirmPrompter,
{
    pub fn new(
        version_source: V,
        workspace_index: W,
        manifest_store: M,
        git_provider: G,
        chooser: C,
        confirmer: K,
    ) -> Self {
        Self {
            version_source,
            workspace_index,
            manifest_store,
            git_provider,
            chooser,
            confirmer,
        }
    }

    /// # Errors
    ///
    /// Returns an error if validation fails, the tag already exists, a
    /// prompt cannot be shown, the manifests cannot be synchronized, or the
    /// commit and tag cannot be created. Only the last leaves the manifests
    /// changed.
    pub fn execute(&self, root: &Path, input: &ReleaseInput) -> Result<ReleaseOutcome> {
        let check = validate_workspace(&self.version_source, &self.workspace_index, root)?;
        enter(Phase::Validated);

        let offered = candidates(&check.current)?;
        warn_noop_candidates(&offered);
        enter(Phase::CandidatesOffered);

        let Some(candidate) = self.select(&offered, input.class)? else {
            enter(Phase::Aborted);
            return Ok(ReleaseOutcome::Aborted(AbortReason::NoSelection));
        };
        let tag_name = candidate.tag_name();
        info!(version = %candidate.version, tag = %tag_name, "selected candidate");
        enter(Phase::Selected);

        if input.git && self.git_provider.tag_exists(root, &tag_name)? {
            return Err(OperationError::TagExists { tag: tag_name });
        }

        let synchronizer = ManifestSynchronizer::new(&self.manifest_store);
        let version = candidate.version.to_string();
        let staged = synchronizer.stage(&check.workspace, &version)?;

        let plan = ReleasePlan {
            pinned: check.pinned,
            current: check.current,
            manifests: staged
                .iter()
                .filter(|m| m.is_changed())
                .map(|m| m.path.clone())
                .collect(),
            candidate,
            tag_name,
        };

        if input.dry_run {
            debug!(manifests = plan.manifests.len(), "dry run; nothing written");
            return Ok(ReleaseOutcome::DryRun(plan));
        }

        if !input.assume_yes
            && self.confirmer.confirm(&plan.candidate)? == Confirmation::Declined
        {
            enter(Phase::Aborted);
            return Ok(ReleaseOutcome::Aborted(AbortReason::Declined));
        }
        enter(Phase::Confirmed);

        let audit = synchronizer.apply(&staged)?;
        enter(Phase::Applied);

        let git = if input.git {
            let result = self
                .tag(root, &plan.tag_name)
                .map_err(|source| OperationError::TagFailure {
                    tag: plan.tag_name.clone(),
                    source: Box::new(source),
                })?;
            enter(Phase::Tagged);
            Some(result)
        } else {
            None
        };

        Ok(ReleaseOutcome::Released(ReleaseOutput { plan, audit, git }))
    }

    fn select(
        &self,
        offered: &[CandidateVersion],
        preset: Option<ReleaseClass>,
    ) -> Result<Option<CandidateVersion>> {
        if let Some(class) = preset {
            return Ok(offered.iter().find(|c| c.class == class).cloned());
        }

        match self.chooser.choose(offered)? {
            CandidateSelection::Selected(candidate) => Ok(Some(candidate)),
            CandidateSelection::Cancelled => Ok(None),
        }
    }

    fn tag(&self, root: &Path, tag_name: &str) -> Result<ReleaseGitResult> {
        self.git_provider.stage_all(root)?;
        let commit = self.git_provider.commit(root, tag_name)?;
        let tag = self.git_provider.create_tag(root, tag_name, tag_name)?;
        info!(tag = %tag.name, commit = %commit.sha, "created release tag");
        Ok(ReleaseGitResult { commit, tag })
    }
}
