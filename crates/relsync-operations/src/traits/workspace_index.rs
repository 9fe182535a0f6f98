use std::path::Path;

use relsync_core::Workspace;

use crate::Result;

pub trait WorkspaceIndex: Send + Sync {
    /// Returns the root package followed by every member, members sorted by
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the root manifest is missing or a manifest cannot
    /// be read.
    fn discover(&self, root: &Path) -> Result<Workspace>;
}
