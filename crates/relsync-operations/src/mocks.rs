use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use relsync_core::{PackageManifest, ReleaseClass, Workspace, WorkspacePackage};
use relsync_git::{CommitInfo, GitError, TagInfo};
use relsync_manifest::ManifestError;
use relsync_version::{CandidateVersion, PinnedVersion};
use serde_json::{Map, Value};

use crate::Result;
use crate::error::OperationError;
use crate::traits::{
    CandidateSelection, ChoicePrompter, ConfirmPrompter, Confirmation, GitProvider, ManifestStore,
    VersionSource, WorkspaceIndex,
};

/// Pretty-printed package.json with a name and a version.
#[must_use]
pub fn package_json(name: &str, version: &str) -> String {
    format!("{{\n  \"name\": \"{name}\",\n  \"version\": \"{version}\"\n}}\n")
}

pub struct MockVersionSource {
    pinned: String,
}

impl MockVersionSource {
    #[must_use]
    pub fn new(pinned: &str) -> Self {
        Self {
            pinned: pinned.to_string(),
        }
    }
}

impl VersionSource for MockVersionSource {
    fn pinned_version(&self, _root: &Path) -> Result<PinnedVersion> {
        Ok(PinnedVersion::parse(&self.pinned)?)
    }
}

/// A workspace rooted at `/mock/workspace` with members under `packages/`.
pub struct MockWorkspaceIndex {
    root_version: Option<String>,
    members: Vec<(String, String)>,
}

impl MockWorkspaceIndex {
    #[must_use]
    pub fn new(root_version: &str, members: &[&str]) -> Self {
        Self {
            root_version: Some(root_version.to_string()),
            members: members
                .iter()
                .map(|name| ((*name).to_string(), root_version.to_string()))
                .collect(),
        }
    }

    #[must_use]
    pub fn without_root_version(members: &[&str]) -> Self {
        Self {
            root_version: None,
            members: members
                .iter()
                .map(|name| ((*name).to_string(), "0.0.0-0".to_string()))
                .collect(),
        }
    }

    #[must_use]
    pub fn with_member_version(mut self, member: &str, version: &str) -> Self {
        for (name, member_version) in &mut self.members {
            if name == member {
                *member_version = version.to_string();
            }
        }
        self
    }

    fn manifest(name: &str, version: Option<&str>) -> PackageManifest {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String(name.to_string()));
        if let Some(version) = version {
            fields.insert("version".to_string(), Value::String(version.to_string()));
        }
        PackageManifest::new(fields)
    }
}

impl WorkspaceIndex for MockWorkspaceIndex {
    fn discover(&self, root: &Path) -> Result<Workspace> {
        let mut packages = vec![WorkspacePackage {
            directory: root.to_path_buf(),
            manifest_path: root.join("package.json"),
            manifest: Self::manifest("@mock/root", self.root_version.as_deref()),
            is_root: true,
        }];

        let mut members: Vec<_> = self.members.iter().collect();
        members.sort();
        for (name, version) in members {
            let directory = root.join("packages").join(name);
            packages.push(WorkspacePackage {
                manifest_path: directory.join("package.json"),
                directory,
                manifest: Self::manifest(&format!("@mock/{name}"), Some(version)),
                is_root: false,
            });
        }

        Ok(Workspace {
            root: root.to_path_buf(),
            packages,
        })
    }
}

/// Manifest contents held in memory. Writes can be made to fail by their
/// 1-based position among all write calls.
#[derive(Default)]
pub struct InMemoryManifestStore {
    files: Mutex<BTreeMap<PathBuf, String>>,
    writes: Mutex<Vec<PathBuf>>,
    write_calls: AtomicUsize,
    failing_writes: BTreeSet<usize>,
}

impl InMemoryManifestStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing_writes(mut self, calls: &[usize]) -> Self {
        self.failing_writes = calls.iter().copied().collect();
        self
    }

    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    pub fn insert(&self, path: &Path, contents: &str) {
        self.files
            .lock()
            .expect("lock poisoned")
            .insert(path.to_path_buf(), contents.to_string());
    }

    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    pub fn remove(&self, path: &Path) {
        self.files.lock().expect("lock poisoned").remove(path);
    }

    /// # Panics
    ///
    /// Panics if the file is absent or the lock is poisoned.
    #[must_use]
    pub fn get(&self, path: &Path) -> String {
        self.files
            .lock()
            .expect("lock poisoned")
            .get(path)
            .cloned()
            .expect("file present")
    }

    /// Paths of successful writes, in order.
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    #[must_use]
    pub fn writes(&self) -> Vec<PathBuf> {
        self.writes.lock().expect("lock poisoned").clone()
    }
}

impl ManifestStore for InMemoryManifestStore {
    fn read(&self, path: &Path) -> Result<String> {
        self.files
            .lock()
            .expect("lock poisoned")
            .get(path)
            .cloned()
            .ok_or_else(|| {
                ManifestError::Read {
                    path: path.to_path_buf(),
                    source: io::Error::from(io::ErrorKind::NotFound),
                }
                .into()
            })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let call = self.write_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failing_writes.contains(&call) {
            return Err(ManifestError::Write {
                path: path.to_path_buf(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            }
            .into());
        }

        self.insert(path, contents);
        self.writes
            .lock()
            .expect("lock poisoned")
            .push(path.to_path_buf());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    StageAll,
    Commit(String),
    Tag(String),
}

#[derive(Default)]
pub struct MockGitProvider {
    calls: Mutex<Vec<GitCall>>,
    existing_tags: BTreeSet<String>,
    fail_commit: bool,
}

impl MockGitProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_existing_tag(mut self, tag: &str) -> Self {
        self.existing_tags.insert(tag.to_string());
        self
    }

    #[must_use]
    pub fn failing_commit(mut self) -> Self {
        self.fail_commit = true;
        self
    }

    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    fn push(&self, call: GitCall) {
        self.calls.lock().expect("lock poisoned").push(call);
    }
}

impl GitProvider for MockGitProvider {
    fn tag_exists(&self, _root: &Path, tag_name: &str) -> Result<bool> {
        Ok(self.existing_tags.contains(tag_name))
    }

    fn stage_all(&self, _root: &Path) -> Result<()> {
        self.push(GitCall::StageAll);
        Ok(())
    }

    fn commit(&self, _root: &Path, message: &str) -> Result<CommitInfo> {
        if self.fail_commit {
            return Err(GitError::Git(git2::Error::from_str("no signature configured")).into());
        }
        self.push(GitCall::Commit(message.to_string()));
        Ok(CommitInfo {
            sha: "0000000000000000000000000000000000000001".to_string(),
            message: message.to_string(),
        })
    }

    fn create_tag(&self, _root: &Path, tag_name: &str, _message: &str) -> Result<TagInfo> {
        self.push(GitCall::Tag(tag_name.to_string()));
        Ok(TagInfo {
            name: tag_name.to_string(),
            target_sha: "0000000000000000000000000000000000000001".to_string(),
        })
    }
}

/// Picks the candidate of a fixed class, or cancels.
pub struct MockChoicePrompter {
    pick: Option<ReleaseClass>,
    offered: Mutex<Vec<CandidateVersion>>,
}

impl MockChoicePrompter {
    #[must_use]
    pub fn picking(class: ReleaseClass) -> Self {
        Self {
            pick: Some(class),
            offered: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn cancelling() -> Self {
        Self {
            pick: None,
            offered: Mutex::new(Vec::new()),
        }
    }

    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    #[must_use]
    pub fn offered(&self) -> Vec<CandidateVersion> {
        self.offered.lock().expect("lock poisoned").clone()
    }
}

impl ChoicePrompter for MockChoicePrompter {
    fn choose(&self, candidates: &[CandidateVersion]) -> Result<CandidateSelection> {
        *self.offered.lock().expect("lock poisoned") = candidates.to_vec();

        let Some(class) = self.pick else {
            return Ok(CandidateSelection::Cancelled);
        };
        candidates
            .iter()
            .find(|c| c.class == class)
            .cloned()
            .map(CandidateSelection::Selected)
            .ok_or(OperationError::InteractionRequired {
                prompt: "choosing a release class",
                flag: "--class",
            })
    }
}

pub struct MockConfirmPrompter {
    answer: Confirmation,
    asked: AtomicUsize,
}

impl MockConfirmPrompter {
    #[must_use]
    pub fn answering(answer: Confirmation) -> Self {
        Self {
            answer,
            asked: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn times_asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

impl ConfirmPrompter for MockConfirmPrompter {
    fn confirm(&self, _candidate: &CandidateVersion) -> Result<Confirmation> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer)
    }
}
