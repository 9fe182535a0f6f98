use std::path::Path;

use relsync_git::{CommitInfo, TagInfo};

use crate::Result;

pub trait GitProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened.
    fn tag_exists(&self, root: &Path, tag_name: &str) -> Result<bool>;

    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or staging fails.
    fn stage_all(&self, root: &Path) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the commit cannot be created.
    fn commit(&self, root: &Path, message: &str) -> Result<CommitInfo>;

    /// # Errors
    ///
    /// Returns an error if the tag cannot be created or already exists.
    fn create_tag(&self, root: &Path, tag_name: &str, message: &str) -> Result<TagInfo>;
}
