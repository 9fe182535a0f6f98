mod candidates;
mod check;
mod release;

pub use candidates::{CandidatesOperation, CandidatesOutput};
pub use check::{CheckOperation, CheckOutput, VersionDrift};
pub use release::{
    AbortReason, ManifestSynchronizer, ReleaseGitResult, ReleaseInput, ReleaseOperation,
    ReleaseOutcome, ReleaseOutput, ReleasePlan, StagedManifest, SyncAuditLog, SyncRecord,
    SyncStatus,
};
