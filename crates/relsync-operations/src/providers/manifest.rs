use std::path::Path;

use relsync_manifest::ManifestError;

use crate::Result;
use crate::traits::ManifestStore;

pub struct FileSystemManifestStore;

impl FileSystemManifestStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemManifestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestStore for FileSystemManifestStore {
    fn read(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|source| {
            ManifestError::Read {
                path: path.to_path_buf(),
                source,
            }
            .into()
        })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        Ok(relsync_manifest::write_atomically(path, contents)?)
    }
}
