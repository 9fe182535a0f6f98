mod git_provider;
mod interaction;
mod manifest_store;
mod version_source;
mod workspace_index;

pub use git_provider::GitProvider;
pub use interaction::{CandidateSelection, ChoicePrompter, ConfirmPrompter, Confirmation};
pub use manifest_store::ManifestStore;
pub use version_source::VersionSource;
pub use workspace_index::WorkspaceIndex;
