use crate::app::AppContext;
use crate::app::commands::snapshot;
use crate::domain::{AdminStatistics, AppError, compute_statistics};
use crate::ports::{FundingContract, Notifier, WalletProvider};

pub fn execute<C, W, N>(ctx: &AppContext<C, W, N>) -> Result<AdminStatistics, AppError>
where
    C: FundingContract,
    W: WalletProvider,
    N: Notifier,
{
    let proposals: Vec<_> =
        snapshot::load_all(ctx)?.into_iter().map(|snapshot| snapshot.proposal).collect();
    let balance = ctx.contract().get_contract_balance()?;
    Ok(compute_statistics(&proposals, balance))
}
