use std::path::PathBuf;

use relsync_manifest::ManifestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("no package.json found at workspace root '{root}'")]
    RootManifestMissing { root: PathBuf },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("failed to read pnpm workspace file at '{path}'")]
    PnpmRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse pnpm workspace file at '{path}'")]
    PnpmParse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error(
        "'workspaces' in '{path}' must be an array of patterns or an object with a 'packages' array"
    )]
    InvalidWorkspacesField { path: PathBuf },

    #[error("invalid membership pattern '{pattern}'")]
    GlobPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to read directory '{path}'")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
