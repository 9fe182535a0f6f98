use std::fmt;
use std::io::IsTerminal;

use dialoguer::{Confirm, Select};
use relsync_operations::traits::{CandidateSelection, ChoicePrompter, ConfirmPrompter, Confirmation};
use relsync_operations::{OperationError, Result};
use relsync_version::CandidateVersion;

const NO_TTY_ENV: &str = "RELSYNC_NO_TTY";
const FORCE_TTY_ENV: &str = "RELSYNC_FORCE_TTY";
const CI_ENV_VARS: [&str; 8] = [
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
    "BUILDKITE",
    "TF_BUILD",
];

/// Whether `release` may prompt, and if not, why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptMode {
    Terminal,
    Disabled(DisabledReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisabledReason {
    Requested,
    Ci(&'static str),
    NoTerminal,
}

impl fmt::Display for DisabledReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requested => write!(f, "{NO_TTY_ENV} is set"),
            Self::Ci(var) => write!(f, "CI detected via {var}"),
            Self::NoTerminal => f.write_str("stdin is not a terminal"),
        }
    }
}

impl PromptMode {
    pub fn detect() -> Self {
        Self::resolve(
            |name| std::env::var_os(name).is_some(),
            std::io::stdin().is_terminal(),
        )
    }

    /// `RELSYNC_NO_TTY` wins over `RELSYNC_FORCE_TTY`, which wins over CI
    /// detection and the stdin check.
    fn resolve(is_set: impl Fn(&str) -> bool, stdin_is_terminal: bool) -> Self {
        if is_set(NO_TTY_ENV) {
            return Self::Disabled(DisabledReason::Requested);
        }
        if is_set(FORCE_TTY_ENV) {
            return Self::Terminal;
        }
        if let Some(var) = CI_ENV_VARS.into_iter().find(|&var| is_set(var)) {
            return Self::Disabled(DisabledReason::Ci(var));
        }
        if stdin_is_terminal {
            Self::Terminal
        } else {
            Self::Disabled(DisabledReason::NoTerminal)
        }
    }
}

pub struct TerminalPrompter;

impl ChoicePrompter for TerminalPrompter {
    fn choose(&self, candidates: &[CandidateVersion]) -> Result<CandidateSelection> {
        let items: Vec<String> = candidates.iter().map(choice_label).collect();

        let selection = Select::new()
            .with_prompt("Select a release version")
            .items(&items)
            .default(0)
            .interact_opt()
            .map_err(into_operation_error)?;

        match selection.and_then(|i| candidates.get(i)) {
            Some(candidate) => Ok(CandidateSelection::Selected(candidate.clone())),
            None => Ok(CandidateSelection::Cancelled),
        }
    }
}

impl ConfirmPrompter for TerminalPrompter {
    fn confirm(&self, candidate: &CandidateVersion) -> Result<Confirmation> {
        let answer = Confirm::new()
            .with_prompt(format!(
                "Release {} and tag {}?",
                candidate.version,
                candidate.tag_name()
            ))
            .default(false)
            .interact_opt()
            .map_err(into_operation_error)?;

        if answer == Some(true) {
            Ok(Confirmation::Confirmed)
        } else {
            Ok(Confirmation::Declined)
        }
    }
}

/// Fails every prompt, naming the flag that answers it instead.
pub struct NonInteractivePrompter;

impl ChoicePrompter for NonInteractivePrompter {
    fn choose(&self, _candidates: &[CandidateVersion]) -> Result<CandidateSelection> {
        Err(OperationError::InteractionRequired {
            prompt: "choosing a release version",
            flag: "--class",
        })
    }
}

impl ConfirmPrompter for NonInteractivePrompter {
    fn confirm(&self, _candidate: &CandidateVersion) -> Result<Confirmation> {
        Err(OperationError::InteractionRequired {
            prompt: "confirming the release",
            flag: "--yes",
        })
    }
}

pub fn choice_label(candidate: &CandidateVersion) -> String {
    if candidate.is_noop {
        format!("{candidate} [unchanged]")
    } else {
        candidate.to_string()
    }
}

fn into_operation_error(e: dialoguer::Error) -> OperationError {
    match e {
        dialoguer::Error::IO(source) => OperationError::Terminal(source),
    }
}
