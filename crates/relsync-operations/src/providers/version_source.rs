use std::path::{Path, PathBuf};

use relsync_manifest::read_pinned_requirement;
use relsync_version::PinnedVersion;
use tracing::debug;

use crate::error::OperationError;
use crate::traits::VersionSource;
use crate::{ResolvedConfig, Result};

/// Reads the pin from a dependency declaration in a Cargo manifest.
pub struct CargoPinVersionSource {
    pin_manifest: PathBuf,
    dependency: String,
}

impl CargoPinVersionSource {
    /// `pin_manifest` may be relative, in which case it is resolved against
    /// the root passed to [`VersionSource::pinned_version`].
    #[must_use]
    pub fn new(pin_manifest: impl Into<PathBuf>, dependency: impl Into<String>) -> Self {
        Self {
            pin_manifest: pin_manifest.into(),
            dependency: dependency.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.pin_manifest.clone(), config.upstream.clone())
    }
}

impl VersionSource for CargoPinVersionSource {
    fn pinned_version(&self, root: &Path) -> Result<PinnedVersion> {
        let manifest = root.join(&self.pin_manifest);
        let requirement = read_pinned_requirement(&manifest, &self.dependency)?.ok_or_else(|| {
            OperationError::MissingUpstreamVersion {
                manifest: manifest.clone(),
                dependency: self.dependency.clone(),
            }
        })?;

        debug!(
            dependency = %self.dependency,
            requirement = %requirement,
            "read pinned upstream requirement"
        );

        Ok(PinnedVersion::parse(&requirement)?)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn root_with_cargo(content: &str) -> anyhow::Result<TempDir> {
        let dir = TempDir::new()?;
        std::fs::write(dir.path().join("Cargo.toml"), content)?;
        Ok(dir)
    }

    #[test]
    fn reads_exact_requirement() -> anyhow::Result<()> {
        let dir = root_with_cargo("[workspace.dependencies]\nrspack_core = \"=0.5.0\"\n")?;
        let source = CargoPinVersionSource::new("Cargo.toml", "rspack_core");

        assert_eq!(source.pinned_version(dir.path())?.to_string(), "0.5.0");
        Ok(())
    }

    #[test]
    fn missing_dependency_is_reported() -> anyhow::Result<()> {
        let dir = root_with_cargo("[dependencies]\nserde = \"1\"\n")?;
        let source = CargoPinVersionSource::new("Cargo.toml", "rspack_core");

        let err = source.pinned_version(dir.path()).expect_err("should fail");

        assert!(matches!(
            err,
            OperationError::MissingUpstreamVersion { ref dependency, .. }
                if dependency == "rspack_core"
        ));
        Ok(())
    }

    #[test]
    fn range_requirement_is_malformed() -> anyhow::Result<()> {
        let dir = root_with_cargo("[dependencies]\nrspack_core = { version = \"^0.5\" }\n")?;
        let source = CargoPinVersionSource::new("Cargo.toml", "rspack_core");

        let err = source.pinned_version(dir.path()).expect_err("should fail");

        assert!(matches!(
            err,
            OperationError::Version(relsync_version::VersionError::MalformedUpstream { .. })
        ));
        Ok(())
    }

    #[test]
    fn absolute_pin_manifest_ignores_root() -> anyhow::Result<()> {
        let dir = root_with_cargo("[dependencies]\nrspack_core = \"1.0.2\"\n")?;
        let source = CargoPinVersionSource::new(dir.path().join("Cargo.toml"), "rspack_core");

        let pinned = source.pinned_version(Path::new("/nonexistent"))?;

        assert_eq!(pinned.to_string(), "1.0.2");
        Ok(())
    }
}
