use crate::domain::AppError;
use crate::domain::proposal::Address;
use crate::ports::WalletProvider;

const LOCAL_CHAIN_ID: u64 = 31337;

#[derive(Debug, Clone)]
pub struct FakeWallet {
    account: Option<Address>,
    chain_id: u64,
}

impl FakeWallet {
    pub fn connected(account: Address) -> Self {
        Self { account: Some(account), chain_id: LOCAL_CHAIN_ID }
    }

    pub fn disconnected() -> Self {
        Self { account: None, chain_id: LOCAL_CHAIN_ID }
    }

    pub fn on_chain(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }
}

impl WalletProvider for FakeWallet {
    fn connected_account(&self) -> Result<Option<Address>, AppError> {
        Ok(self.account.clone())
    }

    fn chain_id(&self) -> Result<u64, AppError> {
        Ok(self.chain_id)
    }
}
