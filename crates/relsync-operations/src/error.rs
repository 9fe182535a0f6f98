use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "no upstream dependency configured; set \"relsync\": {{ \"upstream\": \"<crate>\" }} in '{manifest}' or pass --upstream"
    )]
    MissingUpstream { manifest: PathBuf },
}

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Version(#[from] relsync_version::VersionError),

    #[error(transparent)]
    Manifest(#[from] relsync_manifest::ManifestError),

    #[error(transparent)]
    Workspace(#[from] relsync_workspace::WorkspaceError),

    #[error(transparent)]
    Git(#[from] relsync_git::GitError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("pinned dependency '{dependency}' has no version in '{manifest}'")]
    MissingUpstreamVersion {
        manifest: PathBuf,
        dependency: String,
    },

    #[error("root manifest '{path}' has no version")]
    MissingRootVersion { path: PathBuf },

    #[error("failed to update manifest '{path}'; no manifest was changed")]
    ManifestWriteFailure {
        path: PathBuf,
        #[source]
        source: Box<OperationError>,
    },

    #[error(
        "failed to update manifest '{path}' and could not restore: {}",
        unrestored.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
    )]
    ManifestRollbackFailed {
        path: PathBuf,
        unrestored: Vec<PathBuf>,
        #[source]
        source: Box<OperationError>,
    },

    #[error("tag '{tag}' already exists")]
    TagExists { tag: String },

    #[error("failed to commit and tag '{tag}'; manifests remain updated on disk")]
    TagFailure {
        tag: String,
        #[source]
        source: Box<OperationError>,
    },

    #[error("{prompt} requires an interactive terminal; pass {flag}")]
    InteractionRequired {
        prompt: &'static str,
        flag: &'static str,
    },

    #[error("terminal prompt failed; pass --class and --yes to release without prompts")]
    Terminal(#[source] std::io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OperationError>;
