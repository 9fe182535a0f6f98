use crate::error::VersionError;
use crate::pinned::PinnedVersion;
use crate::workspace_version::WorkspaceVersion;

/// Checks that `current` is derived from the pinned upstream version and
/// parses it.
///
/// `current` must start with `"{pinned}-"`. The check is a pure function of
/// its inputs.
///
/// # Errors
///
/// Returns [`VersionError::Mismatch`] if `current` does not start with the
/// pinned prefix, or [`VersionError::Malformed`] if the remainder does not
/// follow the workspace version grammar.
pub fn validate_consistency(
    pinned: &PinnedVersion,
    current: &str,
) -> Result<WorkspaceVersion, VersionError> {
    let prefix = format!("{pinned}-");
    if !current.starts_with(&prefix) {
        return Err(VersionError::Mismatch {
            pinned: pinned.to_string(),
            actual: current.to_string(),
        });
    }

    let version = WorkspaceVersion::parse(current)?;

    if version.base() != pinned.version() {
        return Err(VersionError::Mismatch {
            pinned: pinned.to_string(),
            actual: current.to_string(),
        });
    }

    Ok(version)
}
