//! Normalization of contract, wallet and transport failures.
//!
//! Upstream text is never shown verbatim. Failures are reduced to a small set of
//! categories, each with a fixed user-facing message. The only upstream text
//! that survives is a contract revert reason.

use serde::Serialize;
use tracing::debug;

use crate::domain::AppError;
use crate::domain::notification::{Notification, Severity};

const REVERT_MARKER: &str = "execution reverted";

/// Node-specific revert phrasings, checked when the generic marker is absent.
const REVERT_REASON_MARKERS: &[&str] = &[
    "reverted with reason string",
    "reverted with custom error",
    "reverted with panic code",
];

/// JSON-RPC / EIP-1193 error codes with a fixed meaning.
const CODE_USER_REJECTED: i64 = 4001;
const CODE_UNAUTHORIZED: i64 = 4100;
const CODE_EXECUTION_REVERTED: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamCategory {
    Cancelled,
    InsufficientFunds,
    Network,
    Server,
    Unauthorized,
    NotFound,
    Reverted,
}

impl UpstreamCategory {
    pub fn title(self) -> &'static str {
        match self {
            UpstreamCategory::Cancelled => "Transaction Cancelled",
            UpstreamCategory::InsufficientFunds => "Insufficient Funds",
            UpstreamCategory::Network => "Network Error",
            UpstreamCategory::Server => "Server Error",
            UpstreamCategory::Unauthorized => "Unauthorized Action",
            UpstreamCategory::NotFound => "Not Found",
            UpstreamCategory::Reverted => "Transaction Rejected",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            UpstreamCategory::Cancelled => "Transaction was cancelled by user.",
            UpstreamCategory::InsufficientFunds => {
                "Insufficient funds in the connected account. Add more ETH and try again."
            }
            UpstreamCategory::Network => {
                "Network connection issue. Check the RPC endpoint and try again."
            }
            UpstreamCategory::Server => "Server error occurred. Try again in a few moments.",
            UpstreamCategory::Unauthorized => "You are not authorized to perform this action.",
            UpstreamCategory::NotFound => "The requested resource was not found.",
            UpstreamCategory::Reverted => "Smart contract rejected the transaction.",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            UpstreamCategory::Cancelled
            | UpstreamCategory::Network
            | UpstreamCategory::Unauthorized => Severity::Warning,
            UpstreamCategory::NotFound => Severity::Info,
            UpstreamCategory::InsufficientFunds
            | UpstreamCategory::Server
            | UpstreamCategory::Reverted => Severity::Error,
        }
    }

    /// Whether a read failing with this category may succeed if repeated.
    pub fn is_transient(self) -> bool {
        matches!(self, UpstreamCategory::Network | UpstreamCategory::Server)
    }

    pub fn notification(self, detail: Option<&str>) -> Notification {
        Notification::new(describe(self, detail), self.severity()).with_title(self.title())
    }
}

pub(crate) fn describe_upstream(category: &UpstreamCategory, detail: &Option<String>) -> String {
    describe(*category, detail.as_deref())
}

fn describe(category: UpstreamCategory, detail: Option<&str>) -> String {
    match (category, detail) {
        (UpstreamCategory::Reverted, Some(reason)) => {
            format!("Smart contract rejected the transaction: {}", reason)
        }
        (_, Some(detail)) => format!("{} ({})", category.message(), detail),
        (_, None) => category.message().to_string(),
    }
}

/// Map an upstream failure onto a category.
///
/// Precedence: well-known JSON-RPC codes, then HTTP status, then message text.
/// Anything unrecognized is a server error.
pub fn categorize(status: Option<u16>, rpc_code: Option<i64>, message: &str) -> UpstreamCategory {
    match rpc_code {
        Some(CODE_USER_REJECTED) => return UpstreamCategory::Cancelled,
        Some(CODE_UNAUTHORIZED) => return UpstreamCategory::Unauthorized,
        Some(CODE_EXECUTION_REVERTED) => return UpstreamCategory::Reverted,
        _ => {}
    }

    match status {
        Some(401) | Some(403) => return UpstreamCategory::Unauthorized,
        Some(404) => return UpstreamCategory::NotFound,
        Some(408) | Some(429) => return UpstreamCategory::Network,
        Some(code) if code >= 500 => return UpstreamCategory::Server,
        _ => {}
    }

    let lower = message.to_ascii_lowercase();
    let has = |needle: &str| lower.contains(needle);

    if has_revert_marker(&lower) {
        UpstreamCategory::Reverted
    } else if has("user rejected") || has("user denied") {
        UpstreamCategory::Cancelled
    } else if has("insufficient funds") || has("insufficient balance") {
        UpstreamCategory::InsufficientFunds
    } else if has("out of gas") || (has("gas") && has("estimation")) {
        UpstreamCategory::InsufficientFunds
    } else if has("reverted") {
        UpstreamCategory::Reverted
    } else if has("nonce too low")
        || has("replacement transaction underpriced")
        || has("timeout")
        || has("timed out")
        || has("connection")
        || has("connect")
        || has("network")
    {
        UpstreamCategory::Network
    } else if has("unauthorized") || has("not authorized") || has("forbidden") {
        UpstreamCategory::Unauthorized
    } else if has("not found") {
        UpstreamCategory::NotFound
    } else {
        UpstreamCategory::Server
    }
}

fn has_revert_marker(lower: &str) -> bool {
    lower.contains(REVERT_MARKER) || lower.contains("reverted with")
}

/// Extract the contract-authored reason from a revert message.
pub fn revert_reason(message: &str) -> Option<String> {
    let lower = message.to_ascii_lowercase();
    let reason = match text_after(message, &lower, REVERT_MARKER) {
        Some(rest) => strip_reason_marker(rest.trim_start_matches(':').trim()),
        None => REVERT_REASON_MARKERS
            .iter()
            .find_map(|marker| text_after(message, &lower, marker))?,
    };
    let reason = reason.trim().trim_matches(|ch| ch == '\'' || ch == '"').trim();
    if reason.is_empty() { None } else { Some(reason.to_string()) }
}

/// `lower` must be the ASCII-lowercased `message` so byte offsets line up.
fn text_after<'a>(message: &'a str, lower: &str, marker: &str) -> Option<&'a str> {
    lower.find(marker).map(|at| &message[at + marker.len()..])
}

fn strip_reason_marker(reason: &str) -> &str {
    REVERT_REASON_MARKERS
        .iter()
        .find_map(|marker| reason.strip_prefix(marker))
        .unwrap_or(reason)
}

/// Build a typed upstream error from raw failure data.
///
/// The raw message is logged at debug level and otherwise dropped.
pub fn upstream_error(status: Option<u16>, rpc_code: Option<i64>, message: &str) -> AppError {
    let category = categorize(status, rpc_code, message);
    debug!(?status, ?rpc_code, ?category, raw = message, "upstream failure");
    let detail = match category {
        UpstreamCategory::Reverted => revert_reason(message),
        _ => None,
    };
    AppError::upstream(category, detail)
}
