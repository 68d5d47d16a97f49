//! Dashboard-level aggregates over every proposal of the contract.

use std::fmt;

use serde::Serialize;

use crate::domain::projection::votes::{ProposalVotes, rounded_percentage};
use crate::domain::proposal::{Proposal, ProposalState, Wei};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminStatistics {
    pub total_proposals: usize,
    pub active_proposals: usize,
    pub total_funds_allocated: Wei,
    pub treasury_balance: Wei,
    pub proposals_by_state: Vec<StateCount>,
    pub funds_by_category: Vec<CategoryShare>,
    pub vote_distribution: VoteDistribution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateCount {
    pub state: ProposalState,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FundingCategory {
    Infrastructure,
    Education,
    Healthcare,
    Technology,
    Environment,
    Others,
}

impl FundingCategory {
    pub const ALL: [FundingCategory; 6] = [
        FundingCategory::Infrastructure,
        FundingCategory::Education,
        FundingCategory::Healthcare,
        FundingCategory::Technology,
        FundingCategory::Environment,
        FundingCategory::Others,
    ];

    fn keywords(self) -> &'static [&'static str] {
        match self {
            FundingCategory::Infrastructure => &["infrastructure", "road", "bridge"],
            FundingCategory::Education => &["education", "school", "university"],
            FundingCategory::Healthcare => &["health", "hospital", "medical"],
            FundingCategory::Technology => &["technology", "tech", "digital"],
            FundingCategory::Environment => &["environment", "green", "clean"],
            FundingCategory::Others => &[],
        }
    }

    /// First category whose keywords appear in the description.
    pub fn classify(description: &str) -> Self {
        let lower = description.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.keywords().iter().any(|kw| lower.contains(kw)))
            .unwrap_or(FundingCategory::Others)
    }
}

impl fmt::Display for FundingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category: FundingCategory,
    pub amount: Wei,
    pub percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoteDistribution {
    #[serde(rename = "for")]
    pub for_pct: u8,
    #[serde(rename = "against")]
    pub against_pct: u8,
    #[serde(rename = "pending")]
    pub pending_pct: u8,
}

pub fn compute_statistics(proposals: &[Proposal], treasury_balance: Wei) -> AdminStatistics {
    let active_proposals = proposals.iter().filter(|p| p.state.is_active()).count();

    let funded: Vec<&Proposal> = proposals.iter().filter(|p| p.state.is_funded()).collect();
    let total_funds_allocated: Wei = funded.iter().map(|p| p.total_amount).sum();

    let proposals_by_state = ProposalState::ALL
        .into_iter()
        .map(|state| StateCount {
            state,
            count: proposals.iter().filter(|p| p.state == state).count(),
        })
        .filter(|entry| entry.count > 0)
        .collect();

    let funds_by_category = FundingCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let members: Vec<&&Proposal> = funded
                .iter()
                .filter(|p| FundingCategory::classify(&p.description) == category)
                .collect();
            if members.is_empty() {
                return None;
            }
            let amount: Wei = members.iter().map(|p| p.total_amount).sum();
            let percent = rounded_percentage(amount.as_u128(), total_funds_allocated.as_u128());
            Some(CategoryShare { category, amount, percent })
        })
        .collect();

    AdminStatistics {
        total_proposals: proposals.len(),
        active_proposals,
        total_funds_allocated,
        treasury_balance,
        proposals_by_state,
        funds_by_category,
        vote_distribution: vote_distribution(proposals),
    }
}

/// Shares always sum to 100. With any votes cast nothing is pending.
fn vote_distribution(proposals: &[Proposal]) -> VoteDistribution {
    let (yes, no) = proposals.iter().fold((0u128, 0u128), |(yes, no), p| {
        let tally = ProposalVotes::of(p).combined();
        (yes + u128::from(tally.yes), no + u128::from(tally.no))
    });
    let all = yes + no;

    if all == 0 {
        return VoteDistribution { for_pct: 0, against_pct: 0, pending_pct: 100 };
    }

    let for_pct = rounded_percentage(yes, all);
    VoteDistribution { for_pct, against_pct: 100 - for_pct, pending_pct: 0 }
}
