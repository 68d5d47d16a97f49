//! Read-side projection of proposal state: vote math, voting window,
//! action eligibility and stage progress. Everything here is pure.

pub mod actions;
pub mod progress;
pub mod votes;
pub mod window;

pub use actions::{Action, Role, eligible_actions, ensure_eligible};
pub use progress::{StageProgress, aggregate_stage_progress, check_stage_alignment};
pub use votes::{ProposalVotes, VoteTally, compute_approval_percentage};
pub use window::{VotingDeadline, is_voting_open};
