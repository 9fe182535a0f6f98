use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("malformed workspace version '{input}': {reason}")]
    Malformed { input: String, reason: &'static str },

    #[error("malformed upstream version '{input}': {reason}")]
    MalformedUpstream { input: String, reason: &'static str },

    #[error(
        "workspace version '{actual}' does not track pinned upstream version '{pinned}' (expected '{pinned}-N')"
    )]
    Mismatch { pinned: String, actual: String },

    #[error("{counter} counter overflows in '{input}'")]
    CounterOverflow {
        input: String,
        counter: &'static str,
    },
}
