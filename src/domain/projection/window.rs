use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::proposal::{Proposal, ProposalState};

/// Whether the public can currently vote on `proposal`.
///
/// An end time of 0 means no deadline has been set, not that voting ended.
pub fn is_voting_open(proposal: &Proposal, now: u64) -> bool {
    proposal.state == ProposalState::PublicVoting
        && (proposal.public_voting_end_time == 0 || proposal.public_voting_end_time > now)
}

/// Public voting deadline as seen at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VotingDeadline {
    NotSet,
    Open { ends_at: u64, remaining_secs: u64 },
    Ended { ended_at: u64 },
}

impl VotingDeadline {
    pub fn of(proposal: &Proposal, now: u64) -> Self {
        match proposal.public_voting_end_time {
            0 => VotingDeadline::NotSet,
            end if end > now => VotingDeadline::Open { ends_at: end, remaining_secs: end - now },
            end => VotingDeadline::Ended { ended_at: end },
        }
    }

    pub fn describe(&self) -> String {
        match self {
            VotingDeadline::NotSet => "Not set".to_string(),
            VotingDeadline::Open { ends_at, remaining_secs } => {
                format!(
                    "{} ({} left)",
                    format_timestamp(*ends_at),
                    format_remaining(*remaining_secs)
                )
            }
            VotingDeadline::Ended { ended_at } => format!("Ended {}", format_timestamp(*ended_at)),
        }
    }
}

fn format_timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| secs.to_string())
}

fn format_remaining(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes.max(1))
    }
}
