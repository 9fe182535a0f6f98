mod operation;
mod sync;

pub use operation::{
    AbortReason, ReleaseGitResult, ReleaseInput, ReleaseOperation, ReleaseOutcome, ReleaseOutput,
    ReleasePlan,
};
pub use sync::{ManifestSynchronizer, StagedManifest, SyncAuditLog, SyncRecord, SyncStatus};
