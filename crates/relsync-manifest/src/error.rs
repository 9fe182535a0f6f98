use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest at '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write manifest at '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON at '{path}'")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to render JSON for '{path}'")]
    RenderJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("manifest at '{path}' is not a JSON object")]
    NotAnObject { path: PathBuf },

    #[error("could not locate the top-level members of '{path}' for editing")]
    UnsupportedLayout { path: PathBuf },

    #[error("failed to parse TOML at '{path}'")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml_edit::TomlError,
    },

    #[error("invalid 'relsync' configuration in '{path}'")]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected {field} '{expected}' but found '{actual}' in '{path}'")]
    VerificationFailed {
        path: PathBuf,
        field: &'static str,
        expected: String,
        actual: String,
    },
}
