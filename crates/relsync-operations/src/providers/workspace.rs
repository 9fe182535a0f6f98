use std::path::Path;

use relsync_core::Workspace;

use crate::Result;
use crate::traits::WorkspaceIndex;

pub struct FileSystemWorkspaceIndex;

impl FileSystemWorkspaceIndex {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemWorkspaceIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceIndex for FileSystemWorkspaceIndex {
    fn discover(&self, root: &Path) -> Result<Workspace> {
        Ok(relsync_workspace::discover_workspace(root)?)
    }
}
