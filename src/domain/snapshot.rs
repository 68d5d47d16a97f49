use serde::Serialize;

use crate::domain::AppError;
use crate::domain::projection::{
    Action, ProposalVotes, Role, StageProgress, VotingDeadline, aggregate_stage_progress,
    check_stage_alignment, eligible_actions, is_voting_open,
};
use crate::domain::proposal::{Proposal, Stage};

/// A proposal together with all of its stages, read as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProposalSnapshot {
    pub proposal: Proposal,
    pub stages: Vec<Stage>,
}

impl ProposalSnapshot {
    /// Assemble a snapshot, rejecting stages that disagree with the proposal.
    pub fn new(proposal: Proposal, stages: Vec<Stage>) -> Result<Self, AppError> {
        check_stage_alignment(&proposal, &stages)?;
        aggregate_stage_progress(&stages)?;
        Ok(Self { proposal, stages })
    }

    pub fn id(&self) -> u64 {
        self.proposal.id
    }
}

/// Everything a screen needs to render one proposal for one viewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProposalView {
    pub proposal: Proposal,
    pub stages: Vec<Stage>,
    pub votes: ProposalVotes,
    pub public_approval: u8,
    pub authority_approval: u8,
    pub progress: StageProgress,
    pub voting_open: bool,
    pub deadline: VotingDeadline,
    pub role: Option<Role>,
    pub actions: Vec<Action>,
}

impl ProposalView {
    /// Derive the view at `now`. Eligibility is recomputed on every call.
    pub fn project(
        snapshot: &ProposalSnapshot,
        role: Option<Role>,
        now: u64,
    ) -> Result<Self, AppError> {
        let proposal = &snapshot.proposal;
        let votes = ProposalVotes::of(proposal);
        let actions = match role {
            Some(role) => eligible_actions(proposal, role, now).into_iter().collect(),
            None => Vec::new(),
        };

        Ok(Self {
            proposal: proposal.clone(),
            stages: snapshot.stages.clone(),
            public_approval: votes.public.approval_percentage(),
            authority_approval: votes.authority.approval_percentage(),
            votes,
            progress: aggregate_stage_progress(&snapshot.stages)?,
            voting_open: is_voting_open(proposal, now),
            deadline: VotingDeadline::of(proposal, now),
            role,
            actions,
        })
    }
}
