use std::path::Path;

use relsync_git::{CommitInfo, Repository, TagInfo};

use crate::Result;
use crate::traits::GitProvider;

pub struct Git2Provider;

impl Git2Provider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Git2Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for Git2Provider {
    fn tag_exists(&self, root: &Path, tag_name: &str) -> Result<bool> {
        let repo = Repository::open(root)?;
        Ok(repo.tag_exists(tag_name))
    }

    fn stage_all(&self, root: &Path) -> Result<()> {
        let repo = Repository::open(root)?;
        Ok(repo.stage_all()?)
    }

    fn commit(&self, root: &Path, message: &str) -> Result<CommitInfo> {
        let repo = Repository::open(root)?;
        Ok(repo.commit(message)?)
    }

    fn create_tag(&self, root: &Path, tag_name: &str, message: &str) -> Result<TagInfo> {
        let repo = Repository::open(root)?;
        Ok(repo.create_tag(tag_name, message)?)
    }
}
