mod commit;
mod staging;
mod tag;

use std::path::{Path, PathBuf};

use git2::ErrorCode;

use crate::{GitError, Result};

/// The git working tree that holds a workspace.
pub struct Repository {
    pub(crate) inner: git2::Repository,
    root: PathBuf,
}

impl Repository {
    /// Opens the repository whose working tree contains `path`, searching
    /// parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotARepository`] if no repository encloses `path`
    /// or the one found is bare, or a git error if it cannot be opened.
    pub fn open(path: &Path) -> Result<Self> {
        let not_a_repository = || GitError::NotARepository {
            path: path.to_path_buf(),
        };

        let inner = match git2::Repository::discover(path) {
            Ok(inner) => inner,
            Err(e) if e.code() == ErrorCode::NotFound => return Err(not_a_repository()),
            Err(e) => return Err(e.into()),
        };

        // git2 reports \\?\ paths on Windows
        let root = inner
            .workdir()
            .map(|dir| dunce::simplified(dir).to_path_buf())
            .ok_or_else(not_a_repository)?;

        Ok(Self { inner, root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The commit HEAD points at, or `None` on an unborn branch.
    pub(crate) fn head_commit(&self) -> Result<Option<git2::Commit<'_>>> {
        match self.inner.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The `user.name` / `user.email` identity release commits and tags are
    /// recorded under.
    pub(crate) fn identity(&self) -> Result<git2::Signature<'static>> {
        self.inner.signature().map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                GitError::MissingIdentity
            } else {
                e.into()
            }
        })
    }
}
