//! Client configuration domain models.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;
use crate::domain::proposal::Address;

/// Configuration loaded from `pubfund.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// JSON-RPC endpoint configuration.
    #[serde(default)]
    pub rpc: RpcConfig,
    /// Funding contract configuration.
    pub contract: ContractConfig,
    /// Account selection.
    #[serde(default)]
    pub wallet: WalletConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.rpc.validate()?;
        self.contract.validate()?;
        Ok(())
    }
}

/// JSON-RPC endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RpcConfig {
    /// Node endpoint URL.
    #[serde(default = "default_rpc_url")]
    pub url: Url,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Maximum retry attempts for idempotent calls.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base delay between retries in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: default_rpc_url(),
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl RpcConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if !matches!(self.url.scheme(), "http" | "https") {
            return Err(AppError::InvalidConfig(format!(
                "rpc.url must use http or https, got '{}'",
                self.url.scheme()
            )));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("timeout_secs must be greater than 0".to_string()));
        }
        if self.max_retries == 0 {
            return Err(AppError::InvalidConfig("max_retries must be greater than 0".to_string()));
        }
        if self.retry_delay_ms == 0 {
            return Err(AppError::InvalidConfig(
                "retry_delay_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_rpc_url() -> Url {
    Url::parse("http://127.0.0.1:8545").expect("Default RPC URL must be valid")
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}

/// Funding contract configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractConfig {
    /// Deployed contract address.
    pub address: Address,
    /// Expected chain id. Writes are refused on any other chain.
    #[serde(default)]
    pub chain_id: Option<u64>,
    /// Interval between receipt polls in milliseconds.
    #[serde(default = "default_receipt_poll_ms")]
    pub receipt_poll_ms: u64,
    /// Give up waiting for a receipt after this many seconds.
    #[serde(default = "default_receipt_timeout_secs")]
    pub receipt_timeout_secs: u64,
    /// Attempts at reading a consistent proposal snapshot.
    #[serde(default = "default_snapshot_attempts")]
    pub snapshot_attempts: u32,
}

impl ContractConfig {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            chain_id: None,
            receipt_poll_ms: default_receipt_poll_ms(),
            receipt_timeout_secs: default_receipt_timeout_secs(),
            snapshot_attempts: default_snapshot_attempts(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.receipt_poll_ms == 0 {
            return Err(AppError::InvalidConfig(
                "receipt_poll_ms must be greater than 0".to_string(),
            ));
        }
        if self.receipt_timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "receipt_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.snapshot_attempts == 0 {
            return Err(AppError::InvalidConfig(
                "snapshot_attempts must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_receipt_poll_ms() -> u64 {
    1000
}

fn default_receipt_timeout_secs() -> u64 {
    120
}

fn default_snapshot_attempts() -> u32 {
    3
}

/// Account selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WalletConfig {
    /// Use this account instead of the node's first account.
    #[serde(default)]
    pub account: Option<Address>,
}
