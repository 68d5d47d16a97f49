//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together context creation
//! and command execution against a JSON-RPC node.

use std::sync::Arc;

use crate::adapters::{
    HttpRpcTransport, RetryPolicy, RetryingRpcTransport, RpcFundingContract, RpcWallet,
    TerminalNotifier,
};
use crate::app::AppContext;
use crate::app::commands::{actions, list, session, show, stats};
use crate::domain::{AdminStatistics, AppConfig, ProposalBoard, ProposalView};
use crate::ports::RpcTransport;

pub use crate::app::commands::actions::{WriteOutcome, WriteRequest};
pub use crate::app::commands::list::ProposalListing;
pub use crate::app::commands::session::Session;
pub use crate::domain::AppError;

type SharedTransport = Arc<dyn RpcTransport>;

/// Context wired to a live node.
pub type RpcContext =
    AppContext<RpcFundingContract<SharedTransport>, RpcWallet<SharedTransport>, TerminalNotifier>;

/// Create an `AppContext` for the configured node and contract.
pub fn create_context(config: &AppConfig) -> Result<RpcContext, AppError> {
    let http = HttpRpcTransport::new(&config.rpc)?;
    let transport: SharedTransport =
        Arc::new(RetryingRpcTransport::new(Box::new(http), RetryPolicy::from_config(&config.rpc)));

    let contract = RpcFundingContract::new(Arc::clone(&transport), &config.contract);
    let wallet = RpcWallet::new(transport, config.wallet.account.clone());

    Ok(AppContext::new(contract, wallet, TerminalNotifier)
        .with_expected_chain_id(config.contract.chain_id)
        .with_snapshot_attempts(config.contract.snapshot_attempts))
}

/// Current Unix time in seconds.
pub fn now_unix() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}

/// List every proposal as seen by the connected account.
pub fn list_proposals(config: &AppConfig) -> Result<ProposalListing, AppError> {
    let ctx = create_context(config)?;
    let mut board = ProposalBoard::new();
    list::execute(&ctx, &mut board, now_unix())
}

/// Load one proposal with its stages, votes and available actions.
pub fn show_proposal(config: &AppConfig, id: u64) -> Result<ProposalView, AppError> {
    let ctx = create_context(config)?;
    show::execute(&ctx, id, now_unix())
}

/// Cast a public vote.
pub fn vote(
    config: &AppConfig,
    id: u64,
    approve: bool,
    comment: &str,
) -> Result<WriteOutcome, AppError> {
    write(config, WriteRequest::Vote { id, approve, comment: comment.to_string() })
}

/// Close public voting (admin only).
pub fn close_voting(config: &AppConfig, id: u64) -> Result<WriteOutcome, AppError> {
    write(config, WriteRequest::CloseVoting { id })
}

/// Release the current stage's funds (admin only).
pub fn release_stage(config: &AppConfig, id: u64) -> Result<WriteOutcome, AppError> {
    write(config, WriteRequest::ReleaseStage { id })
}

/// Submit a write and return the re-read proposal.
pub fn write(config: &AppConfig, request: WriteRequest) -> Result<WriteOutcome, AppError> {
    let ctx = create_context(config)?;
    let mut board = ProposalBoard::new();
    actions::execute(&ctx, &mut board, request, now_unix())
}

/// Dashboard statistics over all proposals.
pub fn statistics(config: &AppConfig) -> Result<AdminStatistics, AppError> {
    let ctx = create_context(config)?;
    stats::execute(&ctx)
}

/// Connected account and its role.
pub fn whoami(config: &AppConfig) -> Result<Session, AppError> {
    let ctx = create_context(config)?;
    session::resolve(&ctx)
}
