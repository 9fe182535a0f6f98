use std::path::{Path, PathBuf};

use relsync_core::Workspace;
use relsync_manifest::PackageJson;
use tracing::{debug, info, warn};

use crate::Result;
use crate::error::OperationError;
use crate::traits::ManifestStore;

/// A manifest whose new content has been rendered and verified but not yet
/// written.
#[derive(Debug, Clone)]
pub struct StagedManifest {
    pub path: PathBuf,
    pub is_root: bool,
    original: String,
    rendered: String,
}

impl StagedManifest {
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.original != self.rendered
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// New content written.
    Written,
    /// Staged content equals the file on disk; nothing written.
    Unchanged,
    /// The write failed.
    Failed,
    /// Written, then put back to its original content after a later failure.
    Restored,
    /// Written, and could not be put back after a later failure.
    RestoreFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRecord {
    pub path: PathBuf,
    pub status: SyncStatus,
}

/// Per-manifest outcome of one apply.
#[derive(Debug, Clone, Default)]
pub struct SyncAuditLog {
    records: Vec<SyncRecord>,
}

impl SyncAuditLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, path: &Path, status: SyncStatus) {
        self.records.push(SyncRecord {
            path: path.to_path_buf(),
            status,
        });
    }

    fn update(&mut self, path: &Path, status: SyncStatus) {
        if let Some(record) = self.records.iter_mut().find(|r| r.path == path) {
            record.status = status;
        }
    }

    #[must_use]
    pub fn records(&self) -> &[SyncRecord] {
        &self.records
    }

    #[must_use]
    pub fn written(&self) -> Vec<&Path> {
        self.records
            .iter()
            .filter(|r| r.status == SyncStatus::Written)
            .map(|r| r.path.as_path())
            .collect()
    }

    #[must_use]
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        for record in &self.records {
            let status = match record.status {
                SyncStatus::Written => "✓",
                SyncStatus::Unchanged => "=",
                SyncStatus::Failed => "✗",
                SyncStatus::Restored => "↩",
                SyncStatus::RestoreFailed => "⚠",
            };
            lines.push(format!("{status} {}", record.path.display()));
        }
        lines.join("\n")
    }
}

/// Applies one version to every manifest of a workspace as a single batch.
///
/// All new contents are rendered and verified before any file is written.
/// If a write fails, manifests already written are restored newest first.
pub struct ManifestSynchronizer<'a, M> {
    store: &'a M,
}

impl<'a, M: ManifestStore> ManifestSynchronizer<'a, M> {
    pub fn new(store: &'a M) -> Self {
        Self { store }
    }

    /// Renders the new content of every manifest, root first.
    ///
    /// The root is additionally marked private. Nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::ManifestWriteFailure`] naming the first
    /// manifest that cannot be read, rendered or verified.
    pub fn stage(&self, workspace: &Workspace, version: &str) -> Result<Vec<StagedManifest>> {
        let mut ordered: Vec<_> = workspace.packages.iter().collect();
        ordered.sort_by_key(|p| (!p.is_root, p.directory.clone()));

        ordered
            .into_iter()
            .map(|package| {
                self.stage_one(&package.manifest_path, package.is_root, version)
                    .map_err(|source| OperationError::ManifestWriteFailure {
                        path: package.manifest_path.clone(),
                        source: Box::new(source),
                    })
            })
            .collect()
    }

    fn stage_one(&self, path: &Path, is_root: bool, version: &str) -> Result<StagedManifest> {
        let original = self.store.read(path)?;

        let mut document = PackageJson::parse(path, &original)?;
        document.set_version(version)?;
        if is_root {
            document.set_private(true)?;
        }
        let rendered = document.render();

        let reparsed = PackageJson::parse(path, &rendered)?;
        reparsed.verify_version(version)?;
        if is_root {
            reparsed.verify_private()?;
        }

        debug!(path = %path.display(), is_root, "staged manifest");

        Ok(StagedManifest {
            path: path.to_path_buf(),
            is_root,
            original,
            rendered,
        })
    }

    /// Writes every staged manifest in order.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::ManifestWriteFailure`] if a write fails and
    /// every earlier write was restored, or
    /// [`OperationError::ManifestRollbackFailed`] if some could not be.
    pub fn apply(&self, staged: &[StagedManifest]) -> Result<SyncAuditLog> {
        let mut audit = SyncAuditLog::new();

        for (index, manifest) in staged.iter().enumerate() {
            if !manifest.is_changed() {
                audit.record(&manifest.path, SyncStatus::Unchanged);
                continue;
            }

            if let Err(source) = self.store.write(&manifest.path, &manifest.rendered) {
                audit.record(&manifest.path, SyncStatus::Failed);
                warn!(
                    path = %manifest.path.display(),
                    "manifest write failed; restoring earlier writes"
                );
                let unrestored = self.restore(&staged[..index], &mut audit);
                debug!("manifest sync audit:\n{}", audit.summary());

                let path = manifest.path.clone();
                let source = Box::new(source);
                return Err(if unrestored.is_empty() {
                    OperationError::ManifestWriteFailure { path, source }
                } else {
                    OperationError::ManifestRollbackFailed {
                        path,
                        unrestored,
                        source,
                    }
                });
            }

            audit.record(&manifest.path, SyncStatus::Written);
            debug!(path = %manifest.path.display(), "wrote manifest");
        }

        info!(
            written = audit.written().len(),
            total = staged.len(),
            "synchronized manifests"
        );
        debug!("manifest sync audit:\n{}", audit.summary());
        Ok(audit)
    }

    /// Stages and applies in one call.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::stage`] and [`Self::apply`].
    pub fn synchronize(&self, workspace: &Workspace, version: &str) -> Result<SyncAuditLog> {
        let staged = self.stage(workspace, version)?;
        self.apply(&staged)
    }

    fn restore(&self, written: &[StagedManifest], audit: &mut SyncAuditLog) -> Vec<PathBuf> {
        let mut unrestored = Vec::new();

        for manifest in written.iter().rev().filter(|m| m.is_changed()) {
            match self.store.write(&manifest.path, &manifest.original) {
                Ok(()) => {
                    audit.update(&manifest.path, SyncStatus::Restored);
                    debug!(path = %manifest.path.display(), "restored manifest");
                }
                Err(err) => {
                    audit.update(&manifest.path, SyncStatus::RestoreFailed);
                    warn!(
                        path = %manifest.path.display(),
                        error = %err,
                        "failed to restore manifest"
                    );
                    unrestored.push(manifest.path.clone());
                }
            }
        }

        unrestored
    }
}
