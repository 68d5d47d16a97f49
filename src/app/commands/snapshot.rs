//! Consistent reads of proposals and their stages.
//!
//! A proposal and its stages come from separate calls, so a transaction mined
//! in between can produce a torn view. The loader reads proposal, stages, then
//! the proposal again, and retries until both proposal reads agree on the stage
//! cursor and the stages line up with it.

use tracing::{debug, warn};

use crate::app::AppContext;
use crate::domain::proposal::{Proposal, Stage};
use crate::domain::{AppError, ProposalSnapshot};
use crate::ports::{FundingContract, Notifier, WalletProvider};

/// Load one proposal. Ids at or past `proposalCount()` are `ProposalNotFound`.
pub fn load_snapshot<C, W, N>(
    ctx: &AppContext<C, W, N>,
    id: u64,
) -> Result<ProposalSnapshot, AppError>
where
    C: FundingContract,
    W: WalletProvider,
    N: Notifier,
{
    let count = ctx.contract().proposal_count()?;
    if id >= count {
        return Err(AppError::ProposalNotFound(id));
    }
    read_consistent(ctx.contract(), id, ctx.snapshot_attempts())
}

/// Load every proposal, in id order.
pub fn load_all<C, W, N>(ctx: &AppContext<C, W, N>) -> Result<Vec<ProposalSnapshot>, AppError>
where
    C: FundingContract,
    W: WalletProvider,
    N: Notifier,
{
    let count = ctx.contract().proposal_count()?;
    debug!(count, "loading proposals");
    (0..count).map(|id| read_consistent(ctx.contract(), id, ctx.snapshot_attempts())).collect()
}

pub(crate) fn read_consistent(
    contract: &impl FundingContract,
    id: u64,
    attempts: u32,
) -> Result<ProposalSnapshot, AppError> {
    let attempts = attempts.max(1);
    let mut attempt = 1;

    loop {
        let error = match read_once(contract, id) {
            Ok(snapshot) => return Ok(snapshot),
            Err(error @ AppError::InconsistentStageOrder { .. }) => error,
            Err(error) => return Err(error),
        };

        if attempt >= attempts {
            return Err(error);
        }
        warn!(proposal = id, attempt, attempts, %error, "inconsistent snapshot, re-reading");
        attempt += 1;
    }
}

fn read_once(contract: &impl FundingContract, id: u64) -> Result<ProposalSnapshot, AppError> {
    let before = Proposal::decode(id, &contract.get_proposal_info(id)?)?;

    let stages = (0..before.total_stages)
        .map(|index| Stage::decode(index, &contract.get_stage_info(id, index)?))
        .collect::<Result<Vec<_>, _>>()?;

    let after = Proposal::decode(id, &contract.get_proposal_info(id)?)?;
    if before.shape() != after.shape() {
        return Err(AppError::InconsistentStageOrder {
            stage: after.current_stage as usize,
            reason: format!(
                "proposal #{} changed while reading stages ({} stage {}/{} -> {} stage {}/{})",
                id,
                before.state,
                before.current_stage,
                before.total_stages,
                after.state,
                after.current_stage,
                after.total_stages
            ),
        });
    }

    ProposalSnapshot::new(after, stages)
}
