//! Funding contract port definition.

use std::fmt;

use serde::Serialize;

use crate::domain::AppError;
use crate::domain::proposal::{Address, RawTuple, Wei};

/// Hash of a submitted, not yet confirmed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TxHandle(pub String);

impl TxHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Confirmation of a mined, successful transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxReceipt {
    pub hash: TxHandle,
    pub block_number: u64,
}

/// Port for the on-chain funding contract.
///
/// Reads return raw positional tuples; decoding into domain types happens
/// once, in the caller. Writes are sent from `sender` and return as soon as
/// the transaction is accepted; use [`FundingContract::wait_for`] to block
/// until it is mined.
pub trait FundingContract {
    fn proposal_count(&self) -> Result<u64, AppError>;

    fn get_proposal_info(&self, id: u64) -> Result<RawTuple, AppError>;

    fn get_stage_info(&self, id: u64, stage: u64) -> Result<RawTuple, AppError>;

    fn get_contract_balance(&self) -> Result<Wei, AppError>;

    fn admin(&self) -> Result<Address, AppError>;

    fn is_authority(&self, account: &Address) -> Result<bool, AppError>;

    fn public_vote_on_proposal(
        &self,
        sender: &Address,
        id: u64,
        approve: bool,
        comment: &str,
    ) -> Result<TxHandle, AppError>;

    fn close_public_voting(&self, sender: &Address, id: u64) -> Result<TxHandle, AppError>;

    fn release_stage_amount(&self, sender: &Address, id: u64) -> Result<TxHandle, AppError>;

    /// Block until the transaction is mined. Reverted transactions fail with
    /// an upstream error of category `Reverted`.
    fn wait_for(&self, tx: &TxHandle) -> Result<TxReceipt, AppError>;
}
