//! Hive-Engine ledger client.
//!
//! # Responsibilities
//! - `find` / `findOne` contract table queries on `/contracts`
//! - `getTransactionInfo` lookups on `/blockchain`
//! - Account history REST queries
//!
//! Every request goes to the endpoint currently selected in [`ActiveEndpoints`].

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::http::send_json;
use crate::api::jsonrpc;
use crate::rpc::{ActiveEndpoints, RpcKind};
use crate::tokens::types::TokenOperation;

/// Parameters of a contract table query.
#[derive(Debug, Clone)]
pub struct FindQuery {
    pub contract: String,
    pub table: String,
    pub query: Value,
    pub limit: u32,
    pub offset: u32,
    pub indexes: Vec<Value>,
}

impl FindQuery {
    pub fn new(contract: &str, table: &str, query: Value) -> Self {
        Self {
            contract: contract.to_string(),
            table: table.to_string(),
            query,
            limit: 1000,
            offset: 0,
            indexes: Vec::new(),
        }
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// Client for a Hive-Engine compatible node.
#[derive(Clone)]
pub struct HiveEngineClient {
    http: reqwest::Client,
    endpoints: Arc<ActiveEndpoints>,
}

impl HiveEngineClient {
    pub fn new(http: reqwest::Client, endpoints: Arc<ActiveEndpoints>) -> Self {
        Self { http, endpoints }
    }

    fn contracts_url(&self) -> String {
        format!("{}/contracts", self.endpoints.base_url(RpcKind::HiveEngine))
    }

    fn blockchain_url(&self) -> String {
        format!("{}/blockchain", self.endpoints.base_url(RpcKind::HiveEngine))
    }

    /// Run a `find` query. A `null` result is an empty page.
    pub async fn find<T: DeserializeOwned>(&self, query: FindQuery) -> ApiResult<Vec<T>> {
        let params = json!({
            "contract": query.contract,
            "table": query.table,
            "query": query.query,
            "limit": query.limit,
            "offset": query.offset,
            "indexes": query.indexes,
        });
        let rows: Option<Vec<T>> =
            jsonrpc::call(&self.http, "hive_engine", &self.contracts_url(), "find", params).await?;
        Ok(rows.unwrap_or_default())
    }

    /// Run a `findOne` query.
    pub async fn find_one<T: DeserializeOwned>(
        &self,
        contract: &str,
        table: &str,
        query: Value,
    ) -> ApiResult<Option<T>> {
        let params = json!({
            "contract": contract,
            "table": table,
            "query": query,
        });
        jsonrpc::call(&self.http, "hive_engine", &self.contracts_url(), "findOne", params).await
    }

    /// Look up a sidechain transaction. `None` until the node has processed it.
    pub async fn get_transaction_info(&self, trx_id: &str) -> ApiResult<Option<Value>> {
        let info: Option<Value> = jsonrpc::call(
            &self.http,
            "hive_engine",
            &self.blockchain_url(),
            "getTransactionInfo",
            json!({ "txid": trx_id }),
        )
        .await?;
        Ok(info.filter(|v| !v.is_null()))
    }

    /// Token operations of `account` from the account history API.
    pub async fn get_account_history(
        &self,
        account: &str,
        symbol: Option<&str>,
        limit: u32,
        offset: u32,
    ) -> ApiResult<Vec<TokenOperation>> {
        let url = format!(
            "{}/accountHistory",
            self.endpoints.base_url(RpcKind::AccountHistory)
        );
        let mut params = vec![
            ("account", account.to_string()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        if let Some(symbol) = symbol {
            params.push(("symbol", symbol.to_string()));
        }

        send_json("account_history", self.http.get(url).query(&params)).await
    }
}

impl std::fmt::Debug for HiveEngineClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HiveEngineClient")
            .field("rpc", &self.endpoints.base_url(RpcKind::HiveEngine))
            .field("account_history", &self.endpoints.base_url(RpcKind::AccountHistory))
            .finish()
    }
}
