//! JSON-RPC 2.0 envelope used by Hive and Hive-Engine nodes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::api::error::{ApiError, ApiResult};
use crate::api::http::send_json;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a, P: Serialize> {
    jsonrpc: &'static str,
    method: &'a str,
    params: P,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<Value>,
}

/// Call `method` on the node at `url`. A `null` result is returned as `None`.
pub async fn call<T, P>(
    http: &reqwest::Client,
    service: &'static str,
    url: &str,
    method: &str,
    params: P,
) -> ApiResult<Option<T>>
where
    T: DeserializeOwned,
    P: Serialize,
{
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let body = JsonRpcRequest {
        jsonrpc: "2.0",
        method,
        params,
        id,
    };

    tracing::trace!(service, url, method, id, "JSON-RPC call");
    let response: JsonRpcResponse<T> = send_json(service, http.post(url).json(&body)).await?;

    match response.error {
        Some(error) if !error.is_null() => {
            tracing::debug!(service, method, error = %error, "JSON-RPC error");
            Err(ApiError::Remote(error))
        }
        _ => Ok(response.result),
    }
}
