//! Builders for proposals, stages and raw contract tuples.

use crate::domain::proposal::{
    Address, Proposal, ProposalState, RawTuple, RawValue, Stage, StageState, Wei,
};

const ETH: u128 = 1_000_000_000_000_000_000;

/// Well-known local development accounts.
pub mod accounts {
    use crate::domain::proposal::Address;

    pub fn admin() -> Address {
        Address::new("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266").unwrap()
    }

    pub fn authority() -> Address {
        Address::new("0x70997970c51812dc3a010c7d01b50e0d17dc79c8").unwrap()
    }

    pub fn citizen() -> Address {
        Address::new("0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc").unwrap()
    }
}

pub fn recipient() -> Address {
    Address::new("0x90f79bf6eb2c4f870365e785982e1f101e93b906").unwrap()
}

pub struct ProposalBuilder {
    proposal: Proposal,
}

/// Proposal in `state` with one not-yet-started stage and no votes.
pub fn proposal(state: ProposalState) -> ProposalBuilder {
    ProposalBuilder {
        proposal: Proposal {
            id: 0,
            description: "Community solar panels".to_string(),
            recipient: recipient(),
            total_amount: Wei(ETH),
            state,
            current_stage: 0,
            total_stages: 1,
            public_yes_votes: 0,
            public_no_votes: 0,
            authority_yes_votes: 0,
            authority_no_votes: 0,
            public_voting_end_time: 0,
        },
    }
}

impl ProposalBuilder {
    pub fn id(mut self, id: u64) -> Self {
        self.proposal.id = id;
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.proposal.description = description.to_string();
        self
    }

    pub fn amount(mut self, wei: u128) -> Self {
        self.proposal.total_amount = Wei(wei);
        self
    }

    pub fn votes(mut self, yes: u64, no: u64) -> Self {
        self.proposal.public_yes_votes = yes;
        self.proposal.public_no_votes = no;
        self
    }

    pub fn authority_votes(mut self, yes: u64, no: u64) -> Self {
        self.proposal.authority_yes_votes = yes;
        self.proposal.authority_no_votes = no;
        self
    }

    pub fn stages(mut self, current: u64, total: u64) -> Self {
        self.proposal.current_stage = current;
        self.proposal.total_stages = total;
        self
    }

    pub fn end_time(mut self, secs: u64) -> Self {
        self.proposal.public_voting_end_time = secs;
        self
    }

    pub fn build(self) -> Proposal {
        self.proposal
    }
}

pub fn stage(index: u64, state: StageState) -> Stage {
    Stage { index, amount: Wei(ETH / 2), report: String::new(), vote_count: 0, state }
}

/// Raw proposal tuple in contract field order.
pub fn proposal_tuple(
    state: ProposalState,
    yes: u64,
    no: u64,
    current_stage: u64,
    total_stages: u64,
    end_time: u64,
) -> RawTuple {
    raw_proposal(
        &proposal(state)
            .votes(yes, no)
            .stages(current_stage, total_stages)
            .end_time(end_time)
            .build(),
    )
}

pub fn raw_proposal(p: &Proposal) -> RawTuple {
    vec![
        RawValue::Text(p.description.clone()),
        RawValue::Address(p.recipient.clone()),
        RawValue::Uint(p.total_amount.as_u128()),
        RawValue::Uint(p.state.index() as u128),
        RawValue::Uint(p.public_yes_votes.into()),
        RawValue::Uint(p.public_no_votes.into()),
        RawValue::Uint(p.current_stage.into()),
        RawValue::Uint(p.total_stages.into()),
        RawValue::Uint(p.authority_yes_votes.into()),
        RawValue::Uint(p.authority_no_votes.into()),
        RawValue::Uint(p.public_voting_end_time.into()),
    ]
}

pub fn raw_stage(s: &Stage) -> RawTuple {
    vec![
        RawValue::Uint(s.amount.as_u128()),
        RawValue::Text(s.report.clone()),
        RawValue::Uint(s.vote_count.into()),
        RawValue::Uint(s.state.index() as u128),
    ]
}
