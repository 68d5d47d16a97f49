//! pubfund: Inspect and act on staged public-fund proposals held by an on-chain funding contract.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    ProposalListing, Session, WriteOutcome, WriteRequest, close_voting, list_proposals,
    release_stage, show_proposal, statistics, vote, whoami,
};
pub use domain::configuration::load_config;
pub use domain::{AdminStatistics, AppConfig, AppError, ProposalView};
