use crate::{GitError, Result, TagInfo};

use super::Repository;

impl Repository {
    #[must_use]
    pub fn tag_exists(&self, name: &str) -> bool {
        self.inner
            .find_reference(&format!("refs/tags/{name}"))
            .is_ok()
    }

    /// Creates an annotated tag on HEAD.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::TagExists`] if a tag with `name` exists,
    /// [`GitError::NoHeadCommit`] if HEAD does not point to a commit, or a git
    /// error if the tag cannot be written.
    pub fn create_tag(&self, name: &str, message: &str) -> Result<TagInfo> {
        if self.tag_exists(name) {
            return Err(GitError::TagExists {
                name: name.to_string(),
            });
        }

        let head = self.head_commit()?.ok_or(GitError::NoHeadCommit)?;
        let identity = self.identity()?;

        self.inner
            .tag(name, head.as_object(), &identity, message, false)?;

        Ok(TagInfo {
            name: name.to_string(),
            target_sha: head.id().to_string(),
        })
    }
}
