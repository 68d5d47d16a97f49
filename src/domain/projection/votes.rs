use serde::Serialize;

use crate::domain::proposal::Proposal;

/// `round(100 * yes / (yes + no))`, rounding half up; 0 when nobody voted.
pub fn compute_approval_percentage(yes: u64, no: u64) -> u8 {
    rounded_percentage(u128::from(yes), u128::from(yes) + u128::from(no))
}

/// Share of `part` in `total` as a whole percentage, rounding half up.
pub(crate) fn rounded_percentage(mut part: u128, mut total: u128) -> u8 {
    if total == 0 {
        return 0;
    }
    // Keep 200 * total within u128.
    while total > u128::MAX / 200 {
        part >>= 1;
        total >>= 1;
    }
    let pct = (200 * part.min(total) + total) / (2 * total);
    pct.min(100) as u8
}

/// Yes/no counts for one voter group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VoteTally {
    pub yes: u64,
    pub no: u64,
}

impl VoteTally {
    pub fn new(yes: u64, no: u64) -> Self {
        Self { yes, no }
    }

    pub fn total(&self) -> u64 {
        self.yes.saturating_add(self.no)
    }

    pub fn approval_percentage(&self) -> u8 {
        compute_approval_percentage(self.yes, self.no)
    }
}

/// Public and authority tallies of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProposalVotes {
    pub public: VoteTally,
    pub authority: VoteTally,
}

impl ProposalVotes {
    pub fn of(proposal: &Proposal) -> Self {
        Self {
            public: VoteTally::new(proposal.public_yes_votes, proposal.public_no_votes),
            authority: VoteTally::new(proposal.authority_yes_votes, proposal.authority_no_votes),
        }
    }

    pub fn combined(&self) -> VoteTally {
        VoteTally::new(
            self.public.yes.saturating_add(self.authority.yes),
            self.public.no.saturating_add(self.authority.no),
        )
    }
}
