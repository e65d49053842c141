//! Hive RPC client.
//!
//! # Responsibilities
//! - Query accounts and chain state through `condenser_api`
//! - Always target the node currently selected in the registry

use serde_json::json;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::jsonrpc;
use crate::chain::account::{
    DynamicGlobalProperties, GlobalProperties, HiveAccount, Price, RewardFund,
};
use crate::rpc::{ActiveEndpoints, RpcKind};

/// JSON-RPC client for a Hive node.
#[derive(Clone)]
pub struct HiveClient {
    http: reqwest::Client,
    endpoints: Arc<ActiveEndpoints>,
}

impl HiveClient {
    pub fn new(http: reqwest::Client, endpoints: Arc<ActiveEndpoints>) -> Self {
        Self { http, endpoints }
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> ApiResult<T> {
        let url = self.endpoints.base_url(RpcKind::Hive);
        jsonrpc::call(&self.http, "hive", &url, method, params)
            .await?
            .ok_or_else(|| ApiError::EmptyResult(method.to_string()))
    }

    pub async fn get_accounts(&self, names: &[&str]) -> ApiResult<Vec<HiveAccount>> {
        self.call("condenser_api.get_accounts", json!([names])).await
    }

    /// A single account, `None` if it does not exist.
    pub async fn get_account(&self, name: &str) -> ApiResult<Option<HiveAccount>> {
        Ok(self.get_accounts(&[name]).await?.into_iter().next())
    }

    pub async fn get_dynamic_global_properties(&self) -> ApiResult<DynamicGlobalProperties> {
        self.call("condenser_api.get_dynamic_global_properties", json!([]))
            .await
    }

    pub async fn get_reward_fund(&self) -> ApiResult<RewardFund> {
        self.call("condenser_api.get_reward_fund", json!(["post"])).await
    }

    pub async fn get_current_median_history_price(&self) -> ApiResult<Price> {
        self.call("condenser_api.get_current_median_history_price", json!([]))
            .await
    }

    /// Everything a vote estimate needs, fetched concurrently.
    pub async fn get_global_properties(&self) -> ApiResult<GlobalProperties> {
        let (globals, reward_fund, price) = tokio::try_join!(
            self.get_dynamic_global_properties(),
            self.get_reward_fund(),
            self.get_current_median_history_price(),
        )?;
        Ok(GlobalProperties {
            globals,
            reward_fund,
            price,
        })
    }
}

impl std::fmt::Debug for HiveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HiveClient")
            .field("rpc", &self.endpoints.base_url(RpcKind::Hive))
            .finish()
    }
}
