use serde::Serialize;

use crate::app::AppContext;
use crate::app::commands::{session, snapshot};
use crate::domain::proposal::{Address, Wei};
use crate::domain::{AppError, ProposalBoard, ProposalView, Role};
use crate::ports::{FundingContract, Notifier, WalletProvider};

#[derive(Debug, Clone, Serialize)]
pub struct ProposalListing {
    pub account: Option<Address>,
    pub role: Option<Role>,
    pub treasury_balance: Option<Wei>,
    pub proposals: Vec<ProposalView>,
}

/// Refresh `board` from the contract and project every proposal for the
/// connected account.
pub fn execute<C, W, N>(
    ctx: &AppContext<C, W, N>,
    board: &mut ProposalBoard,
    now: u64,
) -> Result<ProposalListing, AppError>
where
    C: FundingContract,
    W: WalletProvider,
    N: Notifier,
{
    let session = session::resolve(ctx)?;

    let ticket = board.begin_refresh();
    let snapshots = snapshot::load_all(ctx)?;
    let balance = ctx.contract().get_contract_balance()?;
    board.apply(ticket, snapshots, Some(balance));

    let proposals = board
        .snapshots()
        .map(|snapshot| ProposalView::project(snapshot, session.role, now))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ProposalListing {
        account: session.account,
        role: session.role,
        treasury_balance: board.treasury_balance(),
        proposals,
    })
}
