use std::path::Path;

use relsync_version::PinnedVersion;

use crate::Result;

/// Supplies the upstream version the workspace is pinned to.
pub trait VersionSource: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the pin cannot be found or is not a bare
    /// `MAJOR.MINOR.PATCH` version.
    fn pinned_version(&self, root: &Path) -> Result<PinnedVersion>;
}
