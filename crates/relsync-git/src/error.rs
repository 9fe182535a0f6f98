use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("git operation failed")]
    Git(#[from] git2::Error),

    #[error("not a git repository: '{path}'")]
    NotARepository { path: PathBuf },

    #[error("tag '{name}' already exists")]
    TagExists { name: String },

    #[error("repository has no commit to tag")]
    NoHeadCommit,

    #[error("no git identity configured; set user.name and user.email")]
    MissingIdentity,
}
