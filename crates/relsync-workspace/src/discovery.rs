use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use relsync_core::{Workspace, WorkspacePackage};
use relsync_manifest::{PACKAGE_MANIFEST, read_package_json};
use tracing::debug;

use crate::error::WorkspaceError;
use crate::patterns::{MembershipPatterns, membership_patterns};

/// npm dependencies and Cargo build output.
const SKIPPED_DIRS: [&str; 2] = ["node_modules", "target"];

/// Builds the workspace rooted at `root`.
///
/// The root package comes first; members follow sorted by directory. A
/// directory matched by a membership pattern is a member only if it holds a
/// package.json.
///
/// # Errors
///
/// Returns an error if the root manifest is missing, a manifest cannot be
/// read or parsed, a pattern is invalid, or a directory cannot be listed.
pub fn discover_workspace(root: &Path) -> Result<Workspace, WorkspaceError> {
    let root_manifest_path = root.join(PACKAGE_MANIFEST);
    if !root_manifest_path.is_file() {
        return Err(WorkspaceError::RootManifestMissing {
            root: root.to_path_buf(),
        });
    }

    let root_manifest = read_package_json(&root_manifest_path)?.to_manifest();
    let patterns = membership_patterns(root, &root_manifest)?;
    debug!(
        include = ?patterns.include,
        exclude = ?patterns.exclude,
        "resolved membership patterns"
    );

    let mut packages = vec![WorkspacePackage {
        directory: root.to_path_buf(),
        manifest_path: root_manifest_path,
        manifest: root_manifest,
        is_root: true,
    }];

    for directory in expand_patterns(root, &patterns)? {
        let manifest_path = directory.join(PACKAGE_MANIFEST);
        if !manifest_path.is_file() {
            continue;
        }
        let manifest = read_package_json(&manifest_path)?.to_manifest();
        debug!(directory = %directory.display(), "found workspace member");
        packages.push(WorkspacePackage {
            directory,
            manifest_path,
            manifest,
            is_root: false,
        });
    }

    Ok(Workspace {
        root: root.to_path_buf(),
        packages,
    })
}

fn expand_patterns(
    root: &Path,
    patterns: &MembershipPatterns,
) -> Result<BTreeSet<PathBuf>, WorkspaceError> {
    if patterns.is_empty() {
        return Ok(BTreeSet::new());
    }

    let walker = PatternWalker {
        base: root,
        max_depth: max_depth(&patterns.include),
        includes: compile(&patterns.include)?,
        excludes: compile(&patterns.exclude)?,
    };

    let mut dirs = BTreeSet::new();
    walker.walk(root, 1, &mut dirs)?;
    Ok(dirs)
}

fn compile(patterns: &[String]) -> Result<Vec<GlobMatcher>, WorkspaceError> {
    patterns
        .iter()
        .map(|pattern| {
            GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map(|glob| glob.compile_matcher())
                .map_err(|source| WorkspaceError::GlobPattern {
                    pattern: pattern.clone(),
                    source,
                })
        })
        .collect()
}

/// Deepest directory level any pattern can match, or `None` when a `**`
/// makes the depth unbounded.
fn max_depth(patterns: &[String]) -> Option<usize> {
    patterns
        .iter()
        .map(|p| {
            if p.contains("**") {
                None
            } else {
                Some(p.split('/').count())
            }
        })
        .try_fold(0, |acc, depth| depth.map(|d| acc.max(d)))
}

struct PatternWalker<'a> {
    base: &'a Path,
    max_depth: Option<usize>,
    includes: Vec<GlobMatcher>,
    excludes: Vec<GlobMatcher>,
}

impl PatternWalker<'_> {
    /// An exclusion drops only the directory it matches. Its subdirectories
    /// are still walked and may match an include on their own.
    fn walk(
        &self,
        current: &Path,
        depth: usize,
        results: &mut BTreeSet<PathBuf>,
    ) -> Result<(), WorkspaceError> {
        if self.max_depth.is_some_and(|max| depth > max) {
            return Ok(());
        }

        let read_dir_error = |source| WorkspaceError::ReadDir {
            path: current.to_path_buf(),
            source,
        };

        for entry in std::fs::read_dir(current).map_err(read_dir_error)? {
            let path = entry.map_err(read_dir_error)?.path();
            if !path.is_dir() || is_skipped(&path) {
                continue;
            }

            if self.is_member(&path) {
                results.insert(path.clone());
            }

            self.walk(&path, depth + 1, results)?;
        }

        Ok(())
    }

    fn is_member(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(self.base).unwrap_or(path);
        self.includes.iter().any(|glob| glob.is_match(relative))
            && !self.excludes.iter().any(|glob| glob.is_match(relative))
    }
}

fn is_skipped(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.') || SKIPPED_DIRS.contains(&name))
}
