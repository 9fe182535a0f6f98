use std::path::{Path, PathBuf};

use relsync_core::PackageManifest;
use serde::Deserialize;

use crate::error::ManifestError;
use crate::package_json::read_package_json;

const CONFIG_KEY: &str = "relsync";
const DEFAULT_PIN_MANIFEST: &str = "Cargo.toml";

/// The optional `"relsync"` block of the root package.json.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RelsyncConfig {
    /// Name of the pinned upstream dependency.
    #[serde(default)]
    pub upstream: Option<String>,
    /// Cargo manifest declaring the pin, relative to the workspace root.
    #[serde(default = "default_pin_manifest")]
    pub pin_manifest: PathBuf,
    /// Whether a release commits and tags.
    #[serde(default = "default_git")]
    pub git: bool,
}

impl Default for RelsyncConfig {
    fn default() -> Self {
        Self {
            upstream: None,
            pin_manifest: default_pin_manifest(),
            git: default_git(),
        }
    }
}

impl RelsyncConfig {
    /// # Errors
    ///
    /// Returns `ManifestError::InvalidConfig` if the `"relsync"` block has
    /// unknown keys or values of the wrong type.
    pub fn from_manifest(path: &Path, manifest: &PackageManifest) -> Result<Self, ManifestError> {
        let Some(block) = manifest.get(CONFIG_KEY) else {
            return Ok(Self::default());
        };

        serde_json::from_value(block.clone()).map_err(|source| ManifestError::InvalidConfig {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Reads the configuration block from the package.json at `path`.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or parsed, or if the
/// configuration block is invalid.
pub fn read_config(path: &Path) -> Result<RelsyncConfig, ManifestError> {
    let document = read_package_json(path)?;
    RelsyncConfig::from_manifest(path, &document.to_manifest())
}

fn default_pin_manifest() -> PathBuf {
    PathBuf::from(DEFAULT_PIN_MANIFEST)
}

fn default_git() -> bool {
    true
}
