use std::path::Path;

use relsync_core::PackageManifest;
use serde::Deserialize;
use serde_json::Value;

use crate::error::WorkspaceError;

pub const PNPM_WORKSPACE_FILE: &str = "pnpm-workspace.yaml";

#[derive(Debug, Deserialize)]
struct PnpmWorkspace {
    #[serde(default)]
    packages: Vec<String>,
}

/// Glob-style membership patterns, split into inclusions and `!`-prefixed
/// exclusions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipPatterns {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl MembershipPatterns {
    #[must_use]
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = Self::default();
        for pattern in patterns {
            let pattern = pattern.as_ref().trim();
            match pattern.strip_prefix('!') {
                Some(excluded) => result.exclude.push(normalize(excluded)),
                None => result.include.push(normalize(pattern)),
            }
        }
        result.include.retain(|p| !p.is_empty());
        result.exclude.retain(|p| !p.is_empty());
        result
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.include.is_empty()
    }
}

fn normalize(pattern: &str) -> String {
    let pattern = pattern.trim();
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    pattern.trim_end_matches('/').to_string()
}

/// Reads the membership patterns of the workspace at `root`.
///
/// `pnpm-workspace.yaml` wins when present; otherwise the `workspaces` field
/// of the root manifest is used, in either its array or its object form.
///
/// # Errors
///
/// Returns an error if the pnpm workspace file cannot be read or parsed, or
/// if the `workspaces` field has an unexpected shape.
pub fn membership_patterns(
    root: &Path,
    root_manifest: &PackageManifest,
) -> Result<MembershipPatterns, WorkspaceError> {
    let pnpm_path = root.join(PNPM_WORKSPACE_FILE);
    if pnpm_path.is_file() {
        let content =
            std::fs::read_to_string(&pnpm_path).map_err(|source| WorkspaceError::PnpmRead {
                path: pnpm_path.clone(),
                source,
            })?;
        if content.trim().is_empty() {
            return Ok(MembershipPatterns::default());
        }
        let workspace: Option<PnpmWorkspace> =
            serde_yml::from_str(&content).map_err(|source| WorkspaceError::PnpmParse {
                path: pnpm_path.clone(),
                source,
            })?;
        let packages = workspace.map(|w| w.packages).unwrap_or_default();
        return Ok(MembershipPatterns::from_patterns(packages));
    }

    let invalid = || WorkspaceError::InvalidWorkspacesField {
        path: root.join(relsync_manifest::PACKAGE_MANIFEST),
    };

    let patterns = match root_manifest.get("workspaces") {
        None => return Ok(MembershipPatterns::default()),
        Some(Value::Array(items)) => items,
        Some(Value::Object(object)) => match object.get("packages") {
            Some(Value::Array(items)) => items,
            None => return Ok(MembershipPatterns::default()),
            Some(_) => return Err(invalid()),
        },
        Some(_) => return Err(invalid()),
    };

    let patterns = patterns
        .iter()
        .map(|item| item.as_str().ok_or_else(invalid))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MembershipPatterns::from_patterns(patterns))
}
