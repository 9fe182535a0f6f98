mod discovery;
mod error;
mod patterns;

pub use discovery::discover_workspace;
pub use error::WorkspaceError;
pub use patterns::{MembershipPatterns, PNPM_WORKSPACE_FILE, membership_patterns};
