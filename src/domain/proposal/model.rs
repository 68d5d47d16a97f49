//! Typed proposal and stage records and the decode boundary that produces them.

use serde::Serialize;

use crate::domain::AppError;
use crate::domain::proposal::raw::{RawValue, TupleReader};
use crate::domain::proposal::{Address, ProposalState, StageState, Wei};

pub const PROPOSAL_FIELDS: usize = 11;
pub const STAGE_FIELDS: usize = 4;

/// A funding proposal as last read from the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Proposal {
    pub id: u64,
    pub description: String,
    pub recipient: Address,
    pub total_amount: Wei,
    pub state: ProposalState,
    pub current_stage: u64,
    pub total_stages: u64,
    pub public_yes_votes: u64,
    pub public_no_votes: u64,
    pub authority_yes_votes: u64,
    pub authority_no_votes: u64,
    /// Unix seconds; 0 means no deadline has been set.
    pub public_voting_end_time: u64,
}

impl Proposal {
    /// Decode the positional `getProposalInfo` result.
    ///
    /// Layout: description, recipient, totalAmount, state, publicYesVotes,
    /// publicNoVotes, currentStage, totalStages, authorityYesVotes,
    /// authorityNoVotes, publicVotingEndTime.
    pub fn decode(id: u64, raw: &[RawValue]) -> Result<Self, AppError> {
        let r = TupleReader::new("proposal tuple", raw, PROPOSAL_FIELDS)?;

        let proposal = Proposal {
            id,
            description: r.text(0, "description")?,
            recipient: r.address(1, "recipient")?,
            total_amount: Wei(r.uint(2, "totalAmount")?),
            state: ProposalState::from_index(r.uint(3, "state")?)?,
            public_yes_votes: r.u64(4, "publicYesVotes")?,
            public_no_votes: r.u64(5, "publicNoVotes")?,
            current_stage: r.u64(6, "currentStage")?,
            total_stages: r.u64(7, "totalStages")?,
            authority_yes_votes: r.u64(8, "authorityYesVotes")?,
            authority_no_votes: r.u64(9, "authorityNoVotes")?,
            public_voting_end_time: r.u64(10, "publicVotingEndTime")?,
        };

        if proposal.current_stage > proposal.total_stages {
            return Err(AppError::malformed(
                "proposal tuple",
                format!(
                    "currentStage {} exceeds totalStages {}",
                    proposal.current_stage, proposal.total_stages
                ),
            ));
        }

        Ok(proposal)
    }

    /// Whether another stage remains to be released.
    pub fn has_pending_stage(&self) -> bool {
        self.current_stage < self.total_stages
    }

    /// The fields that must agree between two reads of one snapshot.
    pub(crate) fn shape(&self) -> (ProposalState, u64, u64) {
        (self.state, self.current_stage, self.total_stages)
    }
}

/// One disbursement tranche of a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
    pub index: u64,
    pub amount: Wei,
    pub report: String,
    pub vote_count: u64,
    pub state: StageState,
}

impl Stage {
    /// Decode the positional `getStageInfo` result: amount, report, voteCount, state.
    pub fn decode(index: u64, raw: &[RawValue]) -> Result<Self, AppError> {
        let r = TupleReader::new("stage tuple", raw, STAGE_FIELDS)?;
        Ok(Stage {
            index,
            amount: Wei(r.uint(0, "amount")?),
            report: r.text(1, "report")?,
            vote_count: r.u64(2, "voteCount")?,
            state: StageState::from_index(r.uint(3, "state")?)?,
        })
    }

    pub fn has_report(&self) -> bool {
        !self.report.trim().is_empty()
    }
}
