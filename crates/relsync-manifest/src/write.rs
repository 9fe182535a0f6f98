use std::io::{self, Write as _};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::ManifestError;

/// Writes `contents` to a temporary file next to `path`, syncs it and
/// persists it over `path`.
///
/// Readers never observe a partially written manifest. The permissions of an
/// existing file are carried over. The temporary file is removed on every
/// failure path.
///
/// # Errors
///
/// Returns `ManifestError::Write` if the temporary file cannot be created,
/// written or synced, or if it cannot be persisted over `path`.
pub fn write_atomically(path: &Path, contents: &str) -> Result<(), ManifestError> {
    let write_error = |source: io::Error| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".relsync-")
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(write_error)?;

    match std::fs::metadata(path) {
        Ok(metadata) => temp
            .as_file()
            .set_permissions(metadata.permissions())
            .map_err(write_error)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(write_error(e)),
    }

    temp.write_all(contents.as_bytes()).map_err(write_error)?;
    temp.as_file().sync_all().map_err(write_error)?;
    persist(temp, path).map_err(write_error)
}

fn persist(temp: NamedTempFile, path: &Path) -> io::Result<()> {
    temp.persist(path).map(drop).map_err(|e| e.error)
}
