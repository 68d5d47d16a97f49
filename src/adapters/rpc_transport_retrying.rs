//! Retry wrapper for idempotent JSON-RPC reads.

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde_json::Value;
use tracing::warn;

use crate::domain::{AppError, RpcConfig, UpstreamCategory};
use crate::ports::RpcTransport;

const MAX_BACKOFF: Duration = Duration::from_secs(30);
const MAX_DOUBLINGS: u32 = 6;

/// Methods that are safe to repeat. Submitting a transaction is not.
const IDEMPOTENT_METHODS: &[&str] =
    &["eth_call", "eth_accounts", "eth_chainId", "eth_getTransactionReceipt"];

/// How many times a read is attempted and how long to wait between attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    attempts: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &RpcConfig) -> Self {
        let initial_backoff = Duration::from_millis(config.retry_delay_ms.max(1));
        Self {
            attempts: config.max_retries.max(1),
            initial_backoff,
            max_backoff: MAX_BACKOFF.max(initial_backoff),
        }
    }

    /// Wait after the `failures`-th failed attempt: doubles each time, plus up
    /// to a quarter of jitter, never above `max_backoff`.
    fn backoff(&self, failures: u32) -> Duration {
        let doublings = failures.saturating_sub(1).min(MAX_DOUBLINGS);
        let base = self.initial_backoff.saturating_mul(1 << doublings).min(self.max_backoff);
        (base + jitter(base / 4)).min(self.max_backoff)
    }
}

fn jitter(cap: Duration) -> Duration {
    let cap_nanos = cap.as_nanos() as u64;
    if cap_nanos == 0 {
        return Duration::ZERO;
    }
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|now| u64::from(now.subsec_nanos()))
        .unwrap_or(0);
    Duration::from_nanos(seed % cap_nanos)
}

/// Repeats idempotent calls that failed with a transient upstream category.
pub struct RetryingRpcTransport {
    inner: Box<dyn RpcTransport>,
    policy: RetryPolicy,
}

impl RetryingRpcTransport {
    pub fn new(inner: Box<dyn RpcTransport>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl RpcTransport for RetryingRpcTransport {
    fn call(&self, method: &str, params: Value) -> Result<Value, AppError> {
        if !IDEMPOTENT_METHODS.contains(&method) {
            return self.inner.call(method, params);
        }

        let mut failures = 0;
        loop {
            let error = match self.inner.call(method, params.clone()) {
                Ok(result) => return Ok(result),
                Err(error) => error,
            };
            failures += 1;

            let Some(category) = transient_category(&error) else {
                return Err(error);
            };
            if failures >= self.policy.attempts {
                return Err(error);
            }

            let delay = self.policy.backoff(failures);
            warn!(
                method,
                attempt = failures,
                attempts = self.policy.attempts,
                delay_ms = delay.as_millis() as u64,
                ?category,
                "rpc call failed, retrying"
            );
            thread::sleep(delay);
        }
    }
}

fn transient_category(error: &AppError) -> Option<UpstreamCategory> {
    error.upstream_category().filter(|category| category.is_transient())
}
