use relsync_version::CandidateVersion;

use crate::Result;

#[derive(Debug, Clone)]
pub enum CandidateSelection {
    Selected(CandidateVersion),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

pub trait ChoicePrompter: Send + Sync {
    /// Asks the operator to pick one of `candidates`.
    ///
    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn choose(&self, candidates: &[CandidateVersion]) -> Result<CandidateSelection>;
}

pub trait ConfirmPrompter: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn confirm(&self, candidate: &CandidateVersion) -> Result<Confirmation>;
}
