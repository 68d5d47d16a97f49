use std::fmt;

use serde::Serialize;

use crate::domain::AppError;

/// Lifecycle state of a proposal, in the contract's enum order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ProposalState {
    Created,
    UnderAuthorityVoting,
    PublicVoting,
    Approved,
    Rejected,
    InProgress,
    Completed,
}

impl ProposalState {
    /// All states, indexed by their raw contract value.
    pub const ALL: [ProposalState; 7] = [
        ProposalState::Created,
        ProposalState::UnderAuthorityVoting,
        ProposalState::PublicVoting,
        ProposalState::Approved,
        ProposalState::Rejected,
        ProposalState::InProgress,
        ProposalState::Completed,
    ];

    /// Map a raw contract index to a state. Unknown indices are an error.
    pub fn from_index(index: u128) -> Result<Self, AppError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(AppError::UnknownState { what: "proposal", index })
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ProposalState::Created => "Created",
            ProposalState::UnderAuthorityVoting => "Under Authority Voting",
            ProposalState::PublicVoting => "Public Voting",
            ProposalState::Approved => "Approved",
            ProposalState::Rejected => "Rejected",
            ProposalState::InProgress => "In Progress",
            ProposalState::Completed => "Completed",
        }
    }

    /// States from which the contract accepts no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, ProposalState::Rejected | ProposalState::Completed)
    }

    /// States that still count towards active proposals.
    pub fn is_active(self) -> bool {
        !self.is_terminal()
    }

    /// States whose total amount counts as allocated funding.
    pub fn is_funded(self) -> bool {
        matches!(
            self,
            ProposalState::Approved | ProposalState::InProgress | ProposalState::Completed
        )
    }

    /// Observed successor states. Enforcement lives in the contract.
    pub fn successors(self) -> &'static [ProposalState] {
        match self {
            ProposalState::Created => &[ProposalState::UnderAuthorityVoting],
            ProposalState::UnderAuthorityVoting => &[ProposalState::PublicVoting],
            ProposalState::PublicVoting => &[ProposalState::Approved, ProposalState::Rejected],
            ProposalState::Approved => &[ProposalState::InProgress],
            ProposalState::InProgress => &[ProposalState::Completed],
            ProposalState::Rejected | ProposalState::Completed => &[],
        }
    }

    /// Whether `target` is this state or lies further along the lifecycle.
    pub fn reaches(self, target: ProposalState) -> bool {
        self == target || self.successors().iter().any(|next| next.reaches(target))
    }
}

impl fmt::Display for ProposalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Disbursement state of a single stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StageState {
    NotStarted,
    InProgress,
    Completed,
}

impl StageState {
    pub const ALL: [StageState; 3] =
        [StageState::NotStarted, StageState::InProgress, StageState::Completed];

    pub fn from_index(index: u128) -> Result<Self, AppError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(AppError::UnknownState { what: "stage", index })
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn display_name(self) -> &'static str {
        match self {
            StageState::NotStarted => "Not Started",
            StageState::InProgress => "In Progress",
            StageState::Completed => "Completed",
        }
    }
}

impl fmt::Display for StageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
