use std::path::Path;

use toml_edit::{DocumentMut, Item};

use crate::error::ManifestError;

/// Looks up the version requirement of `dependency` in a Cargo manifest.
///
/// `[workspace.dependencies]` is searched before `[dependencies]`. Both the
/// string form (`dep = "=0.5.0"`) and the table form
/// (`dep = { version = "=0.5.0" }`) are understood. Returns `None` when the
/// dependency or its version is absent.
///
/// # Errors
///
/// Returns `ManifestError::Read` if the file cannot be read, or
/// `ManifestError::ParseToml` if the TOML is malformed.
pub fn read_pinned_requirement(
    path: &Path,
    dependency: &str,
) -> Result<Option<String>, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let doc = content
        .parse::<DocumentMut>()
        .map_err(|source| ManifestError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?;

    let workspace_entry = doc
        .get("workspace")
        .and_then(|ws| ws.get("dependencies"))
        .and_then(|deps| deps.get(dependency));
    let package_entry = doc
        .get("dependencies")
        .and_then(|deps| deps.get(dependency));

    Ok(workspace_entry
        .and_then(requirement_of)
        .or_else(|| package_entry.and_then(requirement_of)))
}

fn requirement_of(entry: &Item) -> Option<String> {
    if let Some(requirement) = entry.as_str() {
        return Some(requirement.to_string());
    }
    entry
        .get("version")
        .and_then(Item::as_str)
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;

    fn manifest(content: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("Cargo.toml");
        std::fs::write(&path, content).expect("write manifest");
        (dir, path)
    }

    #[test]
    fn reads_workspace_dependency_string() {
        let (_dir, path) = manifest(
            r#"[workspace]
members = ["crates/*"]

[workspace.dependencies]
rspack_core = "=0.5.0"
"#,
        );

        let requirement = read_pinned_requirement(&path, "rspack_core").expect("read");
        assert_eq!(requirement.as_deref(), Some("=0.5.0"));
    }

    #[test]
    fn reads_inline_table_version() {
        let (_dir, path) = manifest(
            r#"[workspace.dependencies]
rspack_core = { version = "=0.5.0", features = ["full"] }
"#,
        );

        let requirement = read_pinned_requirement(&path, "rspack_core").expect("read");
        assert_eq!(requirement.as_deref(), Some("=0.5.0"));
    }

    #[test]
    fn reads_dotted_table_in_package_dependencies() {
        let (_dir, path) = manifest(
            r#"[package]
name = "binding"

[dependencies.rspack_core]
version = "0.4.2"
default-features = false
"#,
        );

        let requirement = read_pinned_requirement(&path, "rspack_core").expect("read");
        assert_eq!(requirement.as_deref(), Some("0.4.2"));
    }

    #[test]
    fn workspace_entry_takes_precedence() {
        let (_dir, path) = manifest(
            r#"[workspace.dependencies]
rspack_core = "=0.5.0"

[dependencies]
rspack_core = "=0.1.0"
"#,
        );

        let requirement = read_pinned_requirement(&path, "rspack_core").expect("read");
        assert_eq!(requirement.as_deref(), Some("=0.5.0"));
    }

    #[test]
    fn missing_dependency_yields_none() {
        let (_dir, path) = manifest("[workspace.dependencies]\nserde = \"1\"\n");
        assert_eq!(read_pinned_requirement(&path, "rspack_core").expect("read"), None);
    }

    #[test]
    fn path_dependency_without_version_yields_none() {
        let (_dir, path) = manifest(
            "[workspace.dependencies]\nrspack_core = { path = \"../rspack\" }\n",
        );
        assert_eq!(read_pinned_requirement(&path, "rspack_core").expect("read"), None);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let (_dir, path) = manifest("[workspace\n");
        let result = read_pinned_requirement(&path, "rspack_core");
        assert!(matches!(result, Err(ManifestError::ParseToml { .. })));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = TempDir::new().expect("temp dir");
        let result = read_pinned_requirement(&dir.path().join("Cargo.toml"), "rspack_core");
        assert!(matches!(result, Err(ManifestError::Read { .. })));
    }
}
