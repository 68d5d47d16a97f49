use serde_json::{Value, json};

use crate::adapters::abi;
use crate::domain::AppError;
use crate::domain::proposal::Address;
use crate::ports::{RpcTransport, WalletProvider};

/// Wallet view of a node's unlocked accounts.
///
/// A configured account takes precedence over the node's first account.
pub struct RpcWallet<T: RpcTransport> {
    transport: T,
    account: Option<Address>,
}

impl<T: RpcTransport> RpcWallet<T> {
    pub fn new(transport: T, account: Option<Address>) -> Self {
        Self { transport, account }
    }
}

impl<T: RpcTransport> WalletProvider for RpcWallet<T> {
    fn connected_account(&self) -> Result<Option<Address>, AppError> {
        if let Some(account) = &self.account {
            return Ok(Some(account.clone()));
        }

        let accounts = self.transport.call("eth_accounts", json!([]))?;
        let list = accounts
            .as_array()
            .ok_or_else(|| AppError::malformed("eth_accounts", "result is not an array"))?;

        match list.first().map(Value::as_str) {
            None => Ok(None),
            Some(Some(raw)) => Address::new(raw).map(Some),
            Some(None) => Err(AppError::malformed("eth_accounts", "account is not a string")),
        }
    }

    fn chain_id(&self) -> Result<u64, AppError> {
        let result = self.transport.call("eth_chainId", json!([]))?;
        let raw = result
            .as_str()
            .ok_or_else(|| AppError::malformed("eth_chainId", "result is not a string"))?;
        let id = abi::parse_quantity(raw)?;
        u64::try_from(id)
            .map_err(|_| AppError::malformed("eth_chainId", format!("{} is too large", id)))
    }
}
