//! JSON-RPC transport port definition.

use serde_json::Value;

use crate::domain::AppError;

/// Port for sending a single JSON-RPC request.
///
/// Implementations return the `result` member on success and map every
/// failure (transport, HTTP status, JSON-RPC error object) to
/// `AppError::Upstream`.
pub trait RpcTransport {
    fn call(&self, method: &str, params: Value) -> Result<Value, AppError>;
}

impl<T: RpcTransport + ?Sized> RpcTransport for std::sync::Arc<T> {
    fn call(&self, method: &str, params: Value) -> Result<Value, AppError> {
        (**self).call(method, params)
    }
}
