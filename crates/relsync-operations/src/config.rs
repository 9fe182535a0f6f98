use std::path::{Path, PathBuf};

use relsync_manifest::{PACKAGE_MANIFEST, RelsyncConfig, read_config};
use relsync_workspace::WorkspaceError;
use tracing::debug;

use crate::Result;
use crate::error::ConfigError;

/// Values given on the command line, which win over the `"relsync"` block.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub upstream: Option<String>,
    pub pin_manifest: Option<PathBuf>,
    pub no_git: bool,
}

/// Configuration with every default applied and every path anchored at the
/// workspace root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub root: PathBuf,
    pub upstream: String,
    pub pin_manifest: PathBuf,
    pub git: bool,
}

/// Merges the root manifest's configuration block with `overrides`.
///
/// # Errors
///
/// Returns an error if the root manifest is missing or unreadable, its
/// configuration block is invalid, or no upstream dependency is named by
/// either source.
pub fn resolve_config(root: &Path, overrides: ConfigOverrides) -> Result<ResolvedConfig> {
    let manifest_path = root.join(PACKAGE_MANIFEST);
    if !manifest_path.is_file() {
        return Err(WorkspaceError::RootManifestMissing {
            root: root.to_path_buf(),
        }
        .into());
    }

    let RelsyncConfig {
        upstream,
        pin_manifest,
        git,
    } = read_config(&manifest_path)?;

    let upstream = overrides
        .upstream
        .or(upstream)
        .filter(|name| !name.trim().is_empty())
        .ok_or(ConfigError::MissingUpstream {
            manifest: manifest_path,
        })?;
    let pin_manifest = root.join(overrides.pin_manifest.unwrap_or(pin_manifest));
    let git = git && !overrides.no_git;

    debug!(
        upstream = %upstream,
        pin_manifest = %pin_manifest.display(),
        git,
        "resolved configuration"
    );

    Ok(ResolvedConfig {
        root: root.to_path_buf(),
        upstream,
        pin_manifest,
        git,
    })
}
