mod config;
mod error;
mod package_json;
mod pin;
mod write;

pub use config::{RelsyncConfig, read_config};
pub use error::ManifestError;
pub use package_json::{PackageJson, read_package_json};
pub use pin::read_pinned_requirement;
pub use write::write_atomically;

/// File name of an npm-style package manifest.
pub const PACKAGE_MANIFEST: &str = "package.json";
