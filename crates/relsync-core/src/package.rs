use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

/// Parsed key-value content of a package.json file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageManifest(Map<String, Value>);

impl PackageManifest {
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.0.get("version").and_then(Value::as_str)
    }

    #[must_use]
    pub fn is_private(&self) -> bool {
        self.0.get("private").and_then(Value::as_bool).unwrap_or(false)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkspacePackage {
    pub directory: PathBuf,
    pub manifest_path: PathBuf,
    pub manifest: PackageManifest,
    pub is_root: bool,
}

impl WorkspacePackage {
    /// Name for display; falls back to the directory when the manifest has none.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.manifest.name().map_or_else(
            || self.directory.display().to_string(),
            ToString::to_string,
        )
    }
}

/// The root package plus every member matched by the membership patterns.
///
/// `packages` always starts with the root package; members follow sorted by
/// directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    pub root: PathBuf,
    pub packages: Vec<WorkspacePackage>,
}

impl Workspace {
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn root_package(&self) -> Option<&WorkspacePackage> {
        self.packages.iter().find(|p| p.is_root)
    }

    pub fn members(&self) -> impl Iterator<Item = &WorkspacePackage> {
        self.packages.iter().filter(|p| !p.is_root)
    }
}
