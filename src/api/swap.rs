//! Swap orchestration service client.
//!
//! Every endpoint answers `{ "result": ..., "error": ... }`; a non-null
//! `error` is surfaced as [`ApiError::Remote`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::error::{ApiError, ApiResult};
use crate::api::http::send_json;
use crate::swap::types::{Estimate, ServerStatus, Swap, SwapConfig, SwapStep};

#[derive(Debug, Deserialize)]
struct SwapEnvelope<T> {
    result: Option<T>,
    error: Option<Value>,
}

impl<T> SwapEnvelope<T> {
    fn into_result(self, endpoint: &str) -> ApiResult<T> {
        match (self.result, self.error) {
            (_, Some(error)) if !error.is_null() => Err(ApiError::Remote(error)),
            (Some(result), _) => Ok(result),
            (None, _) => Err(ApiError::EmptyResult(endpoint.to_string())),
        }
    }
}

/// Body of `POST token-swap/estimate/save`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveEstimateRequest<'a> {
    #[serde(rename = "slipperage")]
    pub slippage: f64,
    pub steps: &'a [SwapStep],
    pub start_token: &'a str,
    pub end_token: &'a str,
    pub amount: f64,
    pub username: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedEstimate {
    estimate_id: String,
}

/// Client for the swap service REST API.
#[derive(Debug, Clone)]
pub struct SwapApi {
    http: reqwest::Client,
    base_url: String,
}

impl SwapApi {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let envelope: SwapEnvelope<T> = send_json("swap", self.http.get(self.url(path))).await?;
        envelope.into_result(path)
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<T> {
        let envelope: SwapEnvelope<T> =
            send_json("swap", self.http.post(self.url(path)).json(body)).await?;
        envelope.into_result(path)
    }

    /// `GET token-swap/estimate/{start}/{end}/{amount}`
    pub async fn estimate(&self, start_token: &str, end_token: &str, amount: f64) -> ApiResult<Estimate> {
        self.get(&format!("token-swap/estimate/{}/{}/{}", start_token, end_token, amount))
            .await
    }

    /// `POST token-swap/estimate/save`, returns the estimate id.
    pub async fn save_estimate(&self, request: &SaveEstimateRequest<'_>) -> ApiResult<String> {
        let saved: SavedEstimate = self.post("token-swap/estimate/save", request).await?;
        Ok(saved.estimate_id)
    }

    /// `POST token-swap/{id}/confirm`: tell the service the transfer went out.
    pub async fn confirm(&self, swap_id: &str) -> ApiResult<bool> {
        let result: Value = self.post(&format!("token-swap/{}/confirm", swap_id), &json!({})).await?;
        Ok(!matches!(result, Value::Bool(false) | Value::Null))
    }

    /// `POST token-swap/{id}/cancel`
    pub async fn cancel(&self, swap_id: &str) -> ApiResult<()> {
        let envelope: SwapEnvelope<Value> = send_json(
            "swap",
            self.http
                .post(self.url(&format!("token-swap/{}/cancel", swap_id)))
                .json(&json!({})),
        )
        .await?;
        match envelope.error {
            Some(error) if !error.is_null() => Err(ApiError::Remote(error)),
            _ => Ok(()),
        }
    }

    /// `GET token-swap/history/{username}`
    pub async fn history(&self, username: &str) -> ApiResult<Vec<Swap>> {
        self.get(&format!("token-swap/history/{}", username)).await
    }

    /// `GET token-swap/{id}`
    pub async fn swap(&self, swap_id: &str) -> ApiResult<Swap> {
        self.get(&format!("token-swap/{}", swap_id)).await
    }

    /// `GET server/status`
    pub async fn server_status(&self) -> ApiResult<ServerStatus> {
        self.get("server/status").await
    }

    /// `GET token-swap/public-config`
    pub async fn public_config(&self) -> ApiResult<SwapConfig> {
        self.get("token-swap/public-config").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_error_wins() {
        let envelope: SwapEnvelope<Value> =
            serde_json::from_value(json!({"result": 1, "error": {"reason": "no route"}})).unwrap();
        assert!(matches!(envelope.into_result("x"), Err(ApiError::Remote(_))));

        let envelope: SwapEnvelope<Value> =
            serde_json::from_value(json!({"result": null, "error": null})).unwrap();
        assert!(matches!(envelope.into_result("x"), Err(ApiError::EmptyResult(_))));
    }

    #[test]
    fn test_save_request_uses_wire_names() {
        let request = SaveEstimateRequest {
            slippage: 5.0,
            steps: &[],
            start_token: "HIVE",
            end_token: "LEO",
            amount: 10.0,
            username: "alice",
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["slipperage"], 5.0);
        assert_eq!(body["startToken"], "HIVE");
        assert_eq!(body["username"], "alice");
    }
}
