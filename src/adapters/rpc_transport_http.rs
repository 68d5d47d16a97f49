//! JSON-RPC transport implementation using reqwest.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::domain::upstream::upstream_error;
use crate::domain::{AppError, RpcConfig, UpstreamCategory};
use crate::ports::RpcTransport;

const DEFAULT_STATUS_MESSAGE: &str = "JSON-RPC request failed";

/// HTTP transport for a JSON-RPC node.
///
/// This transport performs a single request per call. Retry behavior is
/// implemented by a dedicated retry wrapper adapter.
pub struct HttpRpcTransport {
    url: Url,
    client: Client,
    next_id: AtomicU64,
}

impl std::fmt::Debug for HttpRpcTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRpcTransport").field("url", &redacted(&self.url)).finish()
    }
}

impl HttpRpcTransport {
    /// Create a new transport for the configured endpoint.
    pub fn new(config: &RpcConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                AppError::config_error(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { url: config.url.clone(), client, next_id: AtomicU64::new(1) })
    }

    fn send_request(&self, request: &RpcRequest<'_>) -> Result<Value, AppError> {
        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .map_err(|e| {
                debug!(method = request.method, error = %e, "transport failure");
                AppError::upstream(UpstreamCategory::Network, None)
            })?;

        let status = response.status();
        let body_text = response.text().unwrap_or_default();

        if !status.is_success() {
            let message = extract_error_message(&body_text).unwrap_or_else(|| {
                if !body_text.trim().is_empty() {
                    body_text.clone()
                } else {
                    DEFAULT_STATUS_MESSAGE.to_string()
                }
            });
            return Err(upstream_error(Some(status.as_u16()), None, &message));
        }

        let envelope: RpcResponse = serde_json::from_str(&body_text)
            .map_err(|e| AppError::malformed("JSON-RPC response", e.to_string()))?;

        if let Some(error) = envelope.error {
            return Err(upstream_error(None, Some(error.code), &error.full_message()));
        }

        envelope
            .result
            .ok_or_else(|| AppError::malformed("JSON-RPC response", "neither result nor error"))
    }
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

impl RpcErrorObject {
    /// Nodes put the revert reason either in `message` or in a string `data`.
    fn full_message(&self) -> String {
        match self.data.as_ref().and_then(Value::as_str) {
            Some(data) if !data.starts_with("0x") && !self.message.contains(data) => {
                format!("{}: {}", self.message, data)
            }
            _ => self.message.clone(),
        }
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}

/// Endpoint URL with userinfo and query removed; hosted nodes embed API keys in both.
fn redacted(url: &Url) -> String {
    let mut clean = url.clone();
    let _ = clean.set_username("");
    let _ = clean.set_password(None);
    clean.set_query(None);
    clean.to_string()
}

impl RpcTransport for HttpRpcTransport {
    fn call(&self, method: &str, params: Value) -> Result<Value, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(method, id, "rpc call");
        self.send_request(&RpcRequest { jsonrpc: "2.0", id, method, params })
    }
}
