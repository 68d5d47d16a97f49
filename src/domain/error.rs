use std::io;

use thiserror::Error;

use crate::domain::projection::{Action, Role};
use crate::domain::proposal::ProposalState;
use crate::domain::upstream::{UpstreamCategory, describe_upstream};

/// Library-wide error type for pubfund operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration file could not be located.
    #[error("Config file not found: {0}. Pass --config or create pubfund.toml.")]
    ConfigMissing(String),

    /// Configuration is present but invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A raw state index fell outside the known enumeration.
    #[error("Unknown {what} state index {index}")]
    UnknownState { what: &'static str, index: u128 },

    /// Stage states violate the completed-prefix or current-stage alignment.
    #[error("Inconsistent stage order at stage {stage}: {reason}")]
    InconsistentStageOrder { stage: usize, reason: String },

    /// An action was requested outside its eligibility predicate.
    #[error("{action} is not available to {role} while the proposal is {state}")]
    IneligibleAction { action: Action, role: Role, state: ProposalState },

    /// Contract or wallet call failed. Only the normalized category is shown.
    #[error("{}", describe_upstream(.category, .detail))]
    Upstream { category: UpstreamCategory, detail: Option<String> },

    /// A contract read returned data of the wrong shape.
    #[error("Malformed {what}: {details}")]
    MalformedResponse { what: String, details: String },

    /// Proposal id is past the contract's proposal count.
    #[error("Proposal #{0} does not exist")]
    ProposalNotFound(u64),

    /// Address is not `0x` followed by 40 hex characters.
    #[error("Invalid address '{0}': expected 0x followed by 40 hex characters")]
    InvalidAddress(String),

    /// Wallet is connected to a different chain than the configured contract.
    #[error("Wallet is on chain {actual}, but the contract is configured for chain {expected}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// The user declined a confirmation prompt.
    #[error("Aborted")]
    Aborted,
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::InvalidConfig(message.into())
    }

    pub fn malformed<W: Into<String>, D: Into<String>>(what: W, details: D) -> Self {
        AppError::MalformedResponse { what: what.into(), details: details.into() }
    }

    pub fn upstream(category: UpstreamCategory, detail: Option<String>) -> Self {
        AppError::Upstream { category, detail }
    }

    /// Error for write paths that need a connected account.
    pub fn no_account() -> Self {
        AppError::upstream(
            UpstreamCategory::Unauthorized,
            Some("no wallet account connected".to_string()),
        )
    }

    /// Upstream category, if this error came from the contract or wallet.
    pub fn upstream_category(&self) -> Option<UpstreamCategory> {
        match self {
            AppError::Upstream { category, .. } => Some(*category),
            _ => None,
        }
    }

    /// Provide an `io::ErrorKind`-like view for callers that group failures.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::InvalidConfig(_)
            | AppError::TomlParse(_)
            | AppError::InvalidAddress(_)
            | AppError::ChainMismatch { .. } => io::ErrorKind::InvalidInput,
            AppError::UnknownState { .. }
            | AppError::InconsistentStageOrder { .. }
            | AppError::MalformedResponse { .. } => io::ErrorKind::InvalidData,
            AppError::ConfigMissing(_) | AppError::ProposalNotFound(_) => io::ErrorKind::NotFound,
            AppError::IneligibleAction { .. } => io::ErrorKind::PermissionDenied,
            AppError::Aborted => io::ErrorKind::Interrupted,
            AppError::Upstream { category, .. } => match category {
                UpstreamCategory::Cancelled => io::ErrorKind::Interrupted,
                UpstreamCategory::Unauthorized => io::ErrorKind::PermissionDenied,
                UpstreamCategory::NotFound => io::ErrorKind::NotFound,
                UpstreamCategory::Network => io::ErrorKind::TimedOut,
                UpstreamCategory::InsufficientFunds
                | UpstreamCategory::Server
                | UpstreamCategory::Reverted => io::ErrorKind::Other,
            },
        }
    }
}
