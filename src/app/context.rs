use crate::ports::{FundingContract, Notifier, WalletProvider};

const DEFAULT_SNAPSHOT_ATTEMPTS: u32 = 3;

/// Application context holding dependencies for command execution.
pub struct AppContext<C: FundingContract, W: WalletProvider, N: Notifier> {
    contract: C,
    wallet: W,
    notifier: N,
    expected_chain_id: Option<u64>,
    snapshot_attempts: u32,
}

impl<C: FundingContract, W: WalletProvider, N: Notifier> AppContext<C, W, N> {
    /// Create a new application context.
    pub fn new(contract: C, wallet: W, notifier: N) -> Self {
        Self {
            contract,
            wallet,
            notifier,
            expected_chain_id: None,
            snapshot_attempts: DEFAULT_SNAPSHOT_ATTEMPTS,
        }
    }

    /// Refuse writes when the wallet reports a different chain.
    pub fn with_expected_chain_id(mut self, chain_id: Option<u64>) -> Self {
        self.expected_chain_id = chain_id;
        self
    }

    pub fn with_snapshot_attempts(mut self, attempts: u32) -> Self {
        self.snapshot_attempts = attempts.max(1);
        self
    }

    /// Get a reference to the funding contract.
    pub fn contract(&self) -> &C {
        &self.contract
    }

    /// Get a reference to the wallet provider.
    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn expected_chain_id(&self) -> Option<u64> {
        self.expected_chain_id
    }

    pub fn snapshot_attempts(&self) -> u32 {
        self.snapshot_attempts
    }
}
