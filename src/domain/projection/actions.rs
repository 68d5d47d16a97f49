use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::domain::AppError;
use crate::domain::projection::window::is_voting_open;
use crate::domain::proposal::{Proposal, ProposalState};

/// Who is looking at a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Role {
    Admin,
    Authority,
    Public,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Authority => "Authority",
            Role::Public => "Public",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A contract write the client may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Action {
    Vote,
    CloseVoting,
    ReleaseStage,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Vote => "Vote",
            Action::CloseVoting => "Close Voting",
            Action::ReleaseStage => "Release Stage",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Actions `role` may request on `proposal` at time `now`.
pub fn eligible_actions(proposal: &Proposal, role: Role, now: u64) -> BTreeSet<Action> {
    let mut actions = BTreeSet::new();

    match role {
        Role::Public => {
            if is_voting_open(proposal, now) {
                actions.insert(Action::Vote);
            }
        }
        Role::Admin => {
            if proposal.state == ProposalState::PublicVoting {
                actions.insert(Action::CloseVoting);
            }
            if matches!(proposal.state, ProposalState::Approved | ProposalState::InProgress)
                && proposal.has_pending_stage()
            {
                actions.insert(Action::ReleaseStage);
            }
        }
        Role::Authority => {}
    }

    actions
}

/// Reject `action` unless it is currently eligible.
pub fn ensure_eligible(
    proposal: &Proposal,
    role: Role,
    action: Action,
    now: u64,
) -> Result<(), AppError> {
    if eligible_actions(proposal, role, now).contains(&action) {
        Ok(())
    } else {
        Err(AppError::IneligibleAction { action, role, state: proposal.state })
    }
}
