//! Token snapshots from the Hive-Engine ledger.

use dashmap::DashMap;
use serde_json::json;
use std::sync::Arc;

use crate::api::{ApiResult, FindQuery, HiveEngineClient};
use crate::chain::Asset;
use crate::tokens::types::{Token, TokenBalance, TokenMarket, TokenOperation};

const PAGE_SIZE: u32 = 1000;

/// Read-only view of the token ledger with a per-process token definition cache.
#[derive(Debug, Clone)]
pub struct TokenLedger {
    client: HiveEngineClient,
    tokens: Arc<DashMap<String, Token>>,
}

impl TokenLedger {
    pub fn new(client: HiveEngineClient) -> Self {
        Self {
            client,
            tokens: Arc::new(DashMap::new()),
        }
    }

    pub fn client(&self) -> &HiveEngineClient {
        &self.client
    }

    /// All token balances of `account`.
    pub async fn get_user_balance(&self, account: &str) -> ApiResult<Vec<TokenBalance>> {
        self.client
            .find(FindQuery::new("tokens", "balances", json!({ "account": account })))
            .await
    }

    /// Every token definition, fetched page by page.
    pub async fn get_all_tokens(&self) -> ApiResult<Vec<Token>> {
        let mut tokens: Vec<Token> = Vec::new();
        let mut offset = 0;
        loop {
            let page: Vec<Token> = self
                .client
                .find(FindQuery::new("tokens", "tokens", json!({})).offset(offset).limit(PAGE_SIZE))
                .await?;
            let page_len = page.len() as u32;
            tokens.extend(page);
            if page_len < PAGE_SIZE {
                break;
            }
            offset += PAGE_SIZE;
        }

        for token in &tokens {
            self.tokens.insert(token.symbol.clone(), token.clone());
        }
        tracing::debug!(count = tokens.len(), "Fetched token definitions");
        Ok(tokens)
    }

    /// Definition of `symbol`, cached after the first lookup.
    pub async fn get_token_info(&self, symbol: &str) -> ApiResult<Option<Token>> {
        if let Some(token) = self.tokens.get(symbol) {
            return Ok(Some(token.clone()));
        }
        let token: Option<Token> = self
            .client
            .find_one("tokens", "tokens", json!({ "symbol": symbol }))
            .await?;
        if let Some(token) = &token {
            self.tokens.insert(symbol.to_string(), token.clone());
        }
        Ok(token)
    }

    /// Decimal places of `symbol`. HIVE and HBD are fixed at 3.
    pub async fn token_precision(&self, symbol: &str) -> ApiResult<Option<u32>> {
        if Asset::is_native_symbol(symbol) {
            return Ok(Some(3));
        }
        Ok(self.get_token_info(symbol).await?.map(|t| t.precision))
    }

    /// Market metrics of every listed token.
    pub async fn get_tokens_market(&self) -> ApiResult<Vec<TokenMarket>> {
        self.client
            .find(FindQuery::new("market", "metrics", json!({})))
            .await
    }

    pub async fn get_account_history(
        &self,
        account: &str,
        symbol: Option<&str>,
        limit: u32,
        offset: u32,
    ) -> ApiResult<Vec<TokenOperation>> {
        self.client
            .get_account_history(account, symbol, limit, offset)
            .await
    }
}
