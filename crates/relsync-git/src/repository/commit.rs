use crate::{CommitInfo, Result};

use super::Repository;

impl Repository {
    /// Records the index as a commit on HEAD. On an unborn branch the commit
    /// becomes the root commit.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GitError::MissingIdentity`] if no identity is
    /// configured, or a git error if the tree or commit cannot be written.
    pub fn commit(&self, message: &str) -> Result<CommitInfo> {
        let identity = self.identity()?;
        let tree_id = self.inner.index()?.write_tree()?;
        let tree = self.inner.find_tree(tree_id)?;

        let parent = self.head_commit()?;
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self
            .inner
            .commit(Some("HEAD"), &identity, &identity, message, &tree, &parents)?;

        Ok(CommitInfo {
            sha: oid.to_string(),
            message: message.to_string(),
        })
    }
}
