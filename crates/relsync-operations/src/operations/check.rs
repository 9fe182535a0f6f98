use std::path::{Path, PathBuf};

use relsync_core::Workspace;
use relsync_version::{PinnedVersion, WorkspaceVersion, validate_consistency};
use tracing::{info, warn};

use crate::Result;
use crate::error::OperationError;
use crate::traits::{VersionSource, WorkspaceIndex};

/// A member whose own version differs from the root version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDrift {
    pub package: String,
    pub manifest_path: PathBuf,
    pub version: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CheckOutput {
    pub pinned: PinnedVersion,
    pub current: WorkspaceVersion,
    pub workspace: Workspace,
    pub drift: Vec<VersionDrift>,
}

/// Validates that the workspace version tracks the pinned upstream version.
pub struct CheckOperation<V, W> {
    version_source: V,
    workspace_index: W,
}

impl<V, W> CheckOperation<V, W>
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
    /// Returns an error if the pin or the workspace cannot be read, or if the
    /// root version does not follow the pinned upstream version.
    pub fn execute(&self, root: &Path) -> Result<CheckOutput> {
        validate_workspace(&self.version_source, &self.workspace_index, root)
    }
}

pub(crate) fn validate_workspace(
    version_source: &impl VersionSource,
    workspace_index: &impl WorkspaceIndex,
    root: &Path,
) -> Result<CheckOutput> {
    let pinned = version_source.pinned_version(root)?;
    let workspace = workspace_index.discover(root)?;

    let root_package = workspace
        .root_package()
        .ok_or_else(|| OperationError::MissingRootVersion {
            path: root.to_path_buf(),
        })?;
    let raw_version =
        root_package
            .manifest
            .version()
            .ok_or_else(|| OperationError::MissingRootVersion {
                path: root_package.manifest_path.clone(),
            })?;

    let current = validate_consistency(&pinned, raw_version)?;
    let drift = find_drift(&workspace, raw_version);

    for d in &drift {
        warn!(
            package = %d.package,
            version = d.version.as_deref().unwrap_or("<missing>"),
            expected = %current,
            "member version differs from root"
        );
    }
    info!(
        pinned = %pinned,
        current = %current,
        packages = workspace.packages.len(),
        "validated workspace"
    );

    Ok(CheckOutput {
        pinned,
        current,
        workspace,
        drift,
    })
}

fn find_drift(workspace: &Workspace, root_version: &str) -> Vec<VersionDrift> {
    workspace
        .members()
        .filter(|p| p.manifest.version() != Some(root_version))
        .map(|p| VersionDrift {
            package: p.display_name(),
            manifest_path: p.manifest_path.clone(),
            version: p.manifest.version().map(ToString::to_string),
        })
        .collect()
}
