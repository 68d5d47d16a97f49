use crate::domain::AppError;
use crate::domain::proposal::Address;

/// Port for the account that signs writes.
pub trait WalletProvider {
    /// The active account, or `None` when nothing is connected.
    fn connected_account(&self) -> Result<Option<Address>, AppError>;

    fn chain_id(&self) -> Result<u64, AppError>;
}
