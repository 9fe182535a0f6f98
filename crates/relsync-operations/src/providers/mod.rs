mod git;
mod manifest;
mod version_source;
mod workspace;

pub use git::Git2Provider;
pub use manifest::FileSystemManifestStore;
pub use version_source::CargoPinVersionSource;
pub use workspace::FileSystemWorkspaceIndex;
