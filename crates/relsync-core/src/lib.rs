mod package;
pub mod types;

pub use package::{PackageManifest, Workspace, WorkspacePackage};
pub use types::*;
