//! Shared HTTP plumbing.

use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::api::error::{ApiError, ApiResult};
use crate::config::TimeoutConfig;
use crate::observability::metrics;

/// Build the reqwest client used by every service client.
pub fn build_http_client(timeouts: &TimeoutConfig) -> ApiResult<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .timeout(Duration::from_secs(timeouts.request_secs))
        .user_agent(concat!("hive-wallet/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ApiError::Request(format!("failed to build HTTP client: {}", e)))
}

/// Send a prepared request and decode a JSON body, mapping failures to [`ApiError`].
pub async fn send_json<T: DeserializeOwned>(
    service: &'static str,
    request: reqwest::RequestBuilder,
) -> ApiResult<T> {
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            metrics::record_api_request(service, "network_error");
            return Err(ApiError::Request(format!("Request failed: {}", e)));
        }
    };

    let status = response.status();
    if !status.is_success() {
        metrics::record_api_request(service, "http_error");
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_status(status, body));
    }

    metrics::record_api_request(service, "ok");
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Deserialization(format!("Failed to parse response: {}", e)))
}
