//! Swap workflow.
//!
//! # Responsibilities
//! - Validate and request estimates
//! - Persist an accepted estimate and send the funds to the swap account
//! - Confirm Hive-Engine transfers before flagging the swap as initiated
//! - Present the user's swap history
//!
//! # Design Decisions
//! - An error payload on the estimate aborts before any funds move
//! - Native transfers are final once broadcast; only engine transfers are polled
//! - A failed engine transfer is never flagged as initiated

use serde::Serialize;
use std::sync::Arc;

use crate::api::swap::SaveEstimateRequest;
use crate::api::{ApiError, HiveEngineClient, SwapApi};
use crate::chain::asset::{HBD, HIVE};
use crate::chain::operations::format_quantity;
use crate::chain::{Asset, Broadcaster, HiveAccount, KeyRole, Operation};
use crate::config::ConfirmationConfig;
use crate::storage::store::{get_json, set_json};
use crate::storage::{KeyValueStore, StorageKey};
use crate::swap::types::{
    Estimate, LastUsedTokens, ServerStatus, Swap, SwapConfig, SwapError, SwapExecution, SwapResult,
    SwapStatus,
};
use crate::tokens::{TokenBalance, TokenLedger, TransactionConfirmer};

/// What the user asked to swap.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapRequest {
    pub username: String,
    pub start_token: String,
    pub end_token: String,
    pub amount: f64,
    /// Tolerated slippage in percent.
    pub slippage: f64,
}

/// Display amounts of a history entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapAmounts {
    pub amount: String,
    pub received: Option<String>,
    pub final_amount: String,
}

/// A swap as shown in the history list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwapHistoryEntry {
    pub swap: Swap,
    pub display: SwapAmounts,
}

/// Client-side swap operations.
pub struct SwapTokenService {
    api: SwapApi,
    ledger: TokenLedger,
    confirmer: TransactionConfirmer<HiveEngineClient>,
    store: Arc<dyn KeyValueStore>,
}

/// Remote error payloads become [`SwapError::Service`].
fn service_error(error: ApiError) -> SwapError {
    match error {
        ApiError::Remote(payload) => SwapError::Service(payload),
        other => SwapError::Api(other),
    }
}

impl SwapTokenService {
    pub fn new(
        api: SwapApi,
        ledger: TokenLedger,
        store: Arc<dyn KeyValueStore>,
        confirmation: &ConfirmationConfig,
    ) -> Self {
        let confirmer = TransactionConfirmer::new(ledger.client().clone(), confirmation);
        Self {
            api,
            ledger,
            confirmer,
            store,
        }
    }

    pub fn ledger(&self) -> &TokenLedger {
        &self.ledger
    }

    pub fn confirmer(&self) -> &TransactionConfirmer<HiveEngineClient> {
        &self.confirmer
    }

    /// Tokens the account can start a swap from.
    pub async fn get_swap_token_start_list(&self, account: &HiveAccount) -> SwapResult<Vec<TokenBalance>> {
        let balances = self.ledger.get_user_balance(&account.name).await?;
        Ok(start_list(account, balances))
    }

    /// Ask the service for a conversion path.
    pub async fn get_estimate(&self, start_token: &str, end_token: &str, amount: &str) -> SwapResult<Estimate> {
        let amount = parse_amount(start_token, end_token, amount)?;
        match self.api.estimate(start_token, end_token, amount).await {
            Ok(estimate) => {
                tracing::debug!(
                    start_token = %start_token,
                    end_token = %end_token,
                    steps = estimate.steps.len(),
                    "Estimate received"
                );
                Ok(estimate)
            }
            Err(e) => {
                tracing::warn!(start_token = %start_token, end_token = %end_token, error = %e, "Estimate failed");
                Err(service_error(e))
            }
        }
    }

    /// Persist an estimate server-side. Returns the estimate id.
    pub async fn save_estimate(&self, estimate: &Estimate, request: &SwapRequest) -> SwapResult<String> {
        let body = SaveEstimateRequest {
            slippage: request.slippage,
            steps: &estimate.steps,
            start_token: &request.start_token,
            end_token: &request.end_token,
            amount: request.amount,
            username: &request.username,
        };
        let estimate_id = self.api.save_estimate(&body).await.map_err(service_error)?;
        tracing::info!(estimate_id = %estimate_id, username = %request.username, "Estimate saved");
        Ok(estimate_id)
    }

    /// Send the start tokens to `swap_account` with the estimate id as memo.
    pub async fn process_swap<B: Broadcaster>(
        &self,
        broadcaster: &B,
        estimate_id: &str,
        request: &SwapRequest,
        swap_account: &str,
    ) -> SwapResult<String> {
        let operation = if Asset::is_native_symbol(&request.start_token) {
            Operation::transfer(
                &request.username,
                swap_account,
                Asset::new(request.amount, &request.start_token),
                estimate_id,
            )
        } else {
            let precision = self
                .ledger
                .token_precision(&request.start_token)
                .await?
                .ok_or_else(|| SwapError::UnknownToken(request.start_token.clone()))?;
            Operation::engine_transfer(
                &request.username,
                swap_account,
                &request.start_token,
                &format_quantity(request.amount, precision),
                estimate_id,
            )
        };

        let result = broadcaster.broadcast(vec![operation], KeyRole::Active).await?;
        tracing::info!(
            estimate_id = %estimate_id,
            tx_id = %result.tx_id,
            start_token = %request.start_token,
            "Swap funds sent"
        );
        Ok(result.tx_id)
    }

    /// Tell the service the transfer for `swap_id` went out.
    pub async fn set_as_initiated(&self, swap_id: &str) -> SwapResult<()> {
        if !self.api.confirm(swap_id).await.map_err(service_error)? {
            tracing::error!(swap_id = %swap_id, "Couldn't set swap as initiated");
        }
        Ok(())
    }

    /// Save, send, confirm and flag a swap in one go.
    pub async fn execute_swap<B: Broadcaster>(
        &self,
        broadcaster: &B,
        estimate: &Estimate,
        request: &SwapRequest,
    ) -> SwapResult<SwapExecution> {
        let config = self.get_config().await?;
        let estimate_id = self.save_estimate(estimate, request).await?;
        let tx_id = self
            .process_swap(broadcaster, &estimate_id, request, &config.account)
            .await?;

        if !Asset::is_native_symbol(&request.start_token) {
            let confirmation = self.confirmer.try_confirm_transaction(&tx_id).await;
            if let Some(error) = confirmation.error {
                tracing::warn!(estimate_id = %estimate_id, tx_id = %tx_id, error = %error, "Swap transfer failed");
                return Ok(SwapExecution::Failed {
                    estimate_id,
                    tx_id,
                    error,
                });
            }
            if !confirmation.confirmed {
                self.set_as_initiated(&estimate_id).await?;
                return Ok(SwapExecution::Unconfirmed { estimate_id, tx_id });
            }
        }

        self.set_as_initiated(&estimate_id).await?;
        Ok(SwapExecution::Confirmed { estimate_id, tx_id })
    }

    /// Swaps of `username`, newest data from the service.
    pub async fn retrieve_swap_history(&self, username: &str) -> SwapResult<Vec<SwapHistoryEntry>> {
        match self.api.history(username).await {
            Ok(swaps) => Ok(present_history(swaps)),
            Err(ApiError::Remote(error)) => {
                tracing::warn!(username = %username, error = %error, "Swap history unavailable");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get_swap(&self, swap_id: &str) -> SwapResult<Swap> {
        self.api.swap(swap_id).await.map_err(service_error)
    }

    pub async fn cancel_swap(&self, swap_id: &str) -> SwapResult<()> {
        self.api.cancel(swap_id).await.map_err(service_error)?;
        tracing::info!(swap_id = %swap_id, "Swap cancelled");
        Ok(())
    }

    pub async fn get_server_status(&self) -> SwapResult<ServerStatus> {
        self.api.server_status().await.map_err(service_error)
    }

    pub async fn get_config(&self) -> SwapResult<SwapConfig> {
        self.api.public_config().await.map_err(service_error)
    }

    /// Remember the pair last used in the swap form.
    pub fn save_last_used(&self, from: &str, to: &str) -> SwapResult<()> {
        let tokens = LastUsedTokens {
            from: Some(from.to_string()),
            to: Some(to.to_string()),
        };
        set_json(self.store.as_ref(), StorageKey::SwapLastUsedTokens, &tokens)?;
        Ok(())
    }

    pub fn get_last_used(&self) -> SwapResult<LastUsedTokens> {
        Ok(get_json(self.store.as_ref(), StorageKey::SwapLastUsedTokens)?.unwrap_or_default())
    }
}

impl std::fmt::Debug for SwapTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapTokenService")
            .field("api", &self.api)
            .field("ledger", &self.ledger)
            .finish()
    }
}

fn parse_amount(start_token: &str, end_token: &str, amount: &str) -> SwapResult<f64> {
    if start_token.trim().is_empty() || end_token.trim().is_empty() {
        return Err(SwapError::InvalidParameters("token symbol is empty".to_string()));
    }
    match amount.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(SwapError::InvalidParameters(format!("invalid amount '{}'", amount))),
    }
}

/// Positive engine balances by symbol, preceded by HBD then HIVE when held.
pub fn start_list(account: &HiveAccount, balances: Vec<TokenBalance>) -> Vec<TokenBalance> {
    let mut list: Vec<TokenBalance> = balances.into_iter().filter(|b| b.liquid() > 0.0).collect();
    list.sort_by_key(|b| b.symbol.to_lowercase());

    let native = |asset: &Asset, symbol: &str| TokenBalance {
        account: account.name.clone(),
        symbol: symbol.to_string(),
        balance: asset.amount.to_string(),
        ..TokenBalance::default()
    };
    if account.balance.amount > 0.0 {
        list.insert(0, native(&account.balance, HIVE));
    }
    if account.hbd_balance.amount > 0.0 {
        list.insert(0, native(&account.hbd_balance, HBD));
    }
    list
}

/// Hide pending swaps that never got their funds, and format amounts.
pub fn present_history(swaps: Vec<Swap>) -> Vec<SwapHistoryEntry> {
    swaps
        .into_iter()
        .filter(|s| !(s.status == SwapStatus::Pending && !s.transfer_initiated))
        .map(|swap| {
            let amount = format_with_commas(swap.amount.parse().unwrap_or(0.0), 3);
            let received = swap.received.map(|r| format_with_commas(r, 3));
            let final_amount = format_with_commas(
                swap.received
                    .or(swap.expected_amount_after_fee)
                    .unwrap_or(0.0),
                3,
            );
            SwapHistoryEntry {
                display: SwapAmounts {
                    amount,
                    received,
                    final_amount,
                },
                swap,
            }
        })
        .collect()
}

/// `1234567.5` → `"1,234,567.500"` with `decimals` = 3.
pub fn format_with_commas(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    if value < 0.0 && grouped.chars().any(|c| c.is_ascii_digit() && c != '0') {
        grouped.insert(0, '-');
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::account::tests::account_json;
    use serde_json::json;

    fn balance(symbol: &str, amount: &str) -> TokenBalance {
        TokenBalance {
            account: "alice".to_string(),
            symbol: symbol.to_string(),
            balance: amount.to_string(),
            ..TokenBalance::default()
        }
    }

    fn swap(id: &str, status: &str, initiated: bool, received: Option<&str>) -> Swap {
        serde_json::from_value(json!({
            "id": id,
            "username": "alice",
            "startToken": "HIVE",
            "endToken": "LEO",
            "amount": "1234.5",
            "slipperage": 1,
            "status": status,
            "received": received,
            "expectedAmountAfterFee": "99.1",
            "transferInitiated": initiated
        }))
        .unwrap()
    }

    #[test]
    fn test_format_with_commas() {
        assert_eq!(format_with_commas(1234567.5, 3), "1,234,567.500");
        assert_eq!(format_with_commas(999.0, 3), "999.000");
        assert_eq!(format_with_commas(1000.0, 3), "1,000.000");
        assert_eq!(format_with_commas(0.0, 3), "0.000");
        assert_eq!(format_with_commas(-12345.678, 3), "-12,345.678");
    }

    #[test]
    fn test_start_list_ordering() {
        let account: HiveAccount =
            serde_json::from_value(account_json("alice", "5.000", "2.500")).unwrap();
        let balances = vec![
            balance("LEO", "1"),
            balance("bee", "3"),
            balance("ZERO", "0"),
            balance("DEC", "10.5"),
        ];

        let list = start_list(&account, balances);
        let symbols: Vec<&str> = list.iter().map(|b| b.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["HBD", "HIVE", "bee", "DEC", "LEO"]);
        assert_eq!(list[0].balance, "2.5");
        assert_eq!(list[1].balance, "5");
    }

    #[test]
    fn test_start_list_skips_empty_native_balances() {
        let account: HiveAccount =
            serde_json::from_value(account_json("alice", "0.000", "1.000")).unwrap();
        let list = start_list(&account, vec![]);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].symbol, "HBD");
    }

    #[test]
    fn test_history_hides_uninitiated_pending_swaps() {
        let entries = present_history(vec![
            swap("a", "PENDING", false, None),
            swap("b", "PENDING", true, None),
            swap("c", "COMPLETED", false, Some("1500")),
        ]);

        let ids: Vec<&str> = entries.iter().map(|e| e.swap.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert_eq!(entries[0].display.amount, "1,234.500");
        assert_eq!(entries[0].display.received, None);
        assert_eq!(entries[0].display.final_amount, "99.100");
        assert_eq!(entries[1].display.received.as_deref(), Some("1,500.000"));
        assert_eq!(entries[1].display.final_amount, "1,500.000");
    }

    #[test]
    fn test_parse_amount_rejects_bad_input() {
        assert!(matches!(parse_amount("HIVE", "LEO", "0"), Err(SwapError::InvalidParameters(_))));
        assert!(matches!(parse_amount("HIVE", "LEO", "-1"), Err(SwapError::InvalidParameters(_))));
        assert!(matches!(parse_amount("HIVE", "LEO", "abc"), Err(SwapError::InvalidParameters(_))));
        assert!(matches!(parse_amount("", "LEO", "1"), Err(SwapError::InvalidParameters(_))));
        assert_eq!(parse_amount("HIVE", "LEO", " 2.5 ").unwrap(), 2.5);
    }
}
