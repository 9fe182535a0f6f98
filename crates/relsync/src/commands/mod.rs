mod candidates;
mod check;
mod release;

use std::path::Path;

use clap::Subcommand;
use relsync_operations::ConfigOverrides;

use crate::error::Result;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Validate the workspace version against the pinned upstream
    Check,
    /// List the versions a release could produce
    Candidates,
    /// Synchronize every manifest to a new version and tag it
    Release(release::ReleaseArgs),
}

impl Commands {
    pub(crate) fn execute(self, root: &Path, overrides: ConfigOverrides) -> Result<()> {
        match self {
            Self::Check => check::run(root, overrides),
            Self::Candidates => candidates::run(root, overrides),
            Self::Release(args) => release::run(root, overrides, args),
        }
    }
}
