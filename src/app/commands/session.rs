//! Who is looking at the contract, and with which role.

use serde::Serialize;

use crate::app::AppContext;
use crate::domain::proposal::Address;
use crate::domain::{AppError, Role};
use crate::ports::{FundingContract, Notifier, WalletProvider};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub account: Option<Address>,
    pub role: Option<Role>,
    pub chain_id: Option<u64>,
}

impl Session {
    /// The connected account and its role, or an `Unauthorized` upstream error.
    pub fn require_account(&self) -> Result<(&Address, Role), AppError> {
        match (&self.account, self.role) {
            (Some(account), Some(role)) => Ok((account, role)),
            _ => Err(AppError::no_account()),
        }
    }
}

/// Admin if the account is the contract admin, else Authority if listed as
/// one, else Public.
pub fn resolve_role(contract: &impl FundingContract, account: &Address) -> Result<Role, AppError> {
    if contract.admin()? == *account {
        return Ok(Role::Admin);
    }
    if contract.is_authority(account)? {
        return Ok(Role::Authority);
    }
    Ok(Role::Public)
}

pub fn resolve<C, W, N>(ctx: &AppContext<C, W, N>) -> Result<Session, AppError>
where
    C: FundingContract,
    W: WalletProvider,
    N: Notifier,
{
    let Some(account) = ctx.wallet().connected_account()? else {
        return Ok(Session { account: None, role: None, chain_id: None });
    };
    let role = resolve_role(ctx.contract(), &account)?;
    let chain_id = ctx.wallet().chain_id()?;
    Ok(Session { account: Some(account), role: Some(role), chain_id: Some(chain_id) })
}

/// Fail with `ChainMismatch` when a chain is configured and the wallet is elsewhere.
pub fn ensure_chain<C, W, N>(ctx: &AppContext<C, W, N>) -> Result<(), AppError>
where
    C: FundingContract,
    W: WalletProvider,
    N: Notifier,
{
    let Some(expected) = ctx.expected_chain_id() else {
        return Ok(());
    };
    let actual = ctx.wallet().chain_id()?;
    if actual != expected {
        return Err(AppError::ChainMismatch { expected, actual });
    }
    Ok(())
}
