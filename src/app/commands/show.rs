use crate::app::AppContext;
use crate::app::commands::{session, snapshot};
use crate::domain::{AppError, ProposalView};
use crate::ports::{FundingContract, Notifier, WalletProvider};

/// Load one proposal and project it for the connected account.
pub fn execute<C, W, N>(
    ctx: &AppContext<C, W, N>,
    id: u64,
    now: u64,
) -> Result<ProposalView, AppError>
where
    C: FundingContract,
    W: WalletProvider,
    N: Notifier,
{
    let session = session::resolve(ctx)?;
    let snapshot = snapshot::load_snapshot(ctx, id)?;
    ProposalView::project(&snapshot, session.role, now)
}
