use std::path::Path;

use crate::Result;

/// Raw text access to manifest files.
pub trait ManifestStore: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn read(&self, path: &Path) -> Result<String>;

    /// Replaces the file content. A reader never observes a partial write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, contents: &str) -> Result<()>;
}
