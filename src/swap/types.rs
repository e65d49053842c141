//! Swap data model as exchanged with the swap service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::api::ApiError;
use crate::chain::BroadcastError;
use crate::storage::StorageError;

/// Kind of a routing step. Names the service adds later land in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SwapStepType {
    DepositToHiveEngine,
    WithdrawalFromHiveEngine,
    ConvertInternalMarket,
    SwapToken,
    BuyOnHiveEngineMarket,
    SellOnHiveEngineMarket,
    BuyOnMarket,
    SellOnMarket,
    Other(String),
}

impl SwapStepType {
    pub fn as_str(&self) -> &str {
        match self {
            SwapStepType::DepositToHiveEngine => "DEPOSIT_TO_HIVE_ENGINE",
            SwapStepType::WithdrawalFromHiveEngine => "WITHDRAWAL_FROM_HIVE_ENGINE",
            SwapStepType::ConvertInternalMarket => "CONVERT_INTERNAL_MARKET",
            SwapStepType::SwapToken => "SWAP",
            SwapStepType::BuyOnHiveEngineMarket => "BUY_ON_HIVE_ENGINE_MARKET",
            SwapStepType::SellOnHiveEngineMarket => "SELL_ON_HIVE_ENGINE_MARKET",
            SwapStepType::BuyOnMarket => "BUY_ON_MARKET",
            SwapStepType::SellOnMarket => "SELL_ON_MARKET",
            SwapStepType::Other(name) => name,
        }
    }
}

impl From<String> for SwapStepType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "DEPOSIT_TO_HIVE_ENGINE" => SwapStepType::DepositToHiveEngine,
            "WITHDRAWAL_FROM_HIVE_ENGINE" => SwapStepType::WithdrawalFromHiveEngine,
            "CONVERT_INTERNAL_MARKET" => SwapStepType::ConvertInternalMarket,
            "SWAP" => SwapStepType::SwapToken,
            "BUY_ON_HIVE_ENGINE_MARKET" => SwapStepType::BuyOnHiveEngineMarket,
            "SELL_ON_HIVE_ENGINE_MARKET" => SwapStepType::SellOnHiveEngineMarket,
            "BUY_ON_MARKET" => SwapStepType::BuyOnMarket,
            "SELL_ON_MARKET" => SwapStepType::SellOnMarket,
            _ => SwapStepType::Other(name),
        }
    }
}

impl From<SwapStepType> for String {
    fn from(step: SwapStepType) -> Self {
        match step {
            SwapStepType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwapStatus {
    Pending,
    Started,
    CanceledDueToError,
    #[serde(rename = "REFUND_SLIPPAGE")]
    RefundedSlippage,
    RefundedCannotComplete,
    Completed,
    FundsReturned,
}

impl SwapStatus {
    /// No further server-side transition is expected.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SwapStatus::Pending | SwapStatus::Started)
    }
}

/// External liquidity venue used by a step. The set is open: unlisted venues
/// are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Provider {
    HiveInternalMarket,
    Beeswap,
    HivePay,
    DiscountedBridge,
    Leodex,
    HiveEngine,
    LiquidityPool,
    HiveEngineInternalMarket,
    Other(String),
}

impl Provider {
    pub fn as_str(&self) -> &str {
        match self {
            Provider::HiveInternalMarket => "HIVE_INTERNAL_MARKET",
            Provider::Beeswap => "BEESWAP",
            Provider::HivePay => "HIVE_PAY",
            Provider::DiscountedBridge => "DISCOUNTED_BRIDGE",
            Provider::Leodex => "LEODEX",
            Provider::HiveEngine => "HIVE_ENGINE",
            Provider::LiquidityPool => "LIQUIDITY_POOL",
            Provider::HiveEngineInternalMarket => "HIVE_ENGINE_INTERNAL_MARKET",
            Provider::Other(name) => name,
        }
    }
}

impl From<String> for Provider {
    fn from(name: String) -> Self {
        match name.as_str() {
            "HIVE_INTERNAL_MARKET" => Provider::HiveInternalMarket,
            "BEESWAP" => Provider::Beeswap,
            "HIVE_PAY" => Provider::HivePay,
            "DISCOUNTED_BRIDGE" => Provider::DiscountedBridge,
            "LEODEX" => Provider::Leodex,
            "HIVE_ENGINE" => Provider::HiveEngine,
            "LIQUIDITY_POOL" => Provider::LiquidityPool,
            "HIVE_ENGINE_INTERNAL_MARKET" => Provider::HiveEngineInternalMarket,
            _ => Provider::Other(name),
        }
    }
}

impl From<Provider> for String {
    fn from(provider: Provider) -> Self {
        match provider {
            Provider::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// One hop of an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapStep {
    pub step: SwapStepType,
    pub estimate: f64,
    pub start_token: String,
    pub end_token: String,
    pub provider: Provider,
}

/// One hop of a saved swap plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: i64,
    #[serde(rename = "type")]
    pub step_type: SwapStepType,
    pub step_number: u32,
    pub estimate: f64,
    pub start_token: String,
    pub end_token: String,
    pub provider: Provider,
}

/// An executed hop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStep {
    pub step_number: u32,
    pub start_token: String,
    #[serde(default, deserialize_with = "opt_amount")]
    pub amount_start_token: Option<f64>,
    #[serde(default, deserialize_with = "opt_amount")]
    pub amount_end_token: Option<f64>,
    pub end_token: String,
    #[serde(rename = "type")]
    pub step_type: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

/// A swap as recorded by the swap service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Swap {
    pub id: String,
    pub username: String,
    pub start_token: String,
    pub end_token: String,
    pub amount: String,
    #[serde(default)]
    pub estimated_final_amount: String,
    #[serde(rename = "slipperage")]
    pub slippage: f64,
    pub status: SwapStatus,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub history: Vec<HistoryStep>,
    #[serde(default, deserialize_with = "opt_amount")]
    pub received: Option<f64>,
    #[serde(default)]
    pub fee: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "opt_amount")]
    pub expected_amount_after_fee: Option<f64>,
    #[serde(default, deserialize_with = "opt_amount")]
    pub expected_amount_before_fee: Option<f64>,
    #[serde(default)]
    pub transfer_initiated: bool,
    #[serde(default)]
    pub final_amount: String,
}

impl Swap {
    /// Plan and history ordered by step number.
    pub fn is_ordered(&self) -> bool {
        self.steps.windows(2).all(|w| w[0].step_number < w[1].step_number)
            && self.history.windows(2).all(|w| w[0].step_number <= w[1].step_number)
    }
}

/// Amounts come as numbers or decimal strings.
fn opt_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.parse().map(Some).map_err(serde::de::Error::custom),
        Some(other) => Err(serde::de::Error::custom(format!("invalid amount {}", other))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapFeeConfig {
    pub account: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapSlippageConfig {
    pub min: f64,
    pub default: f64,
}

/// Public configuration of the swap service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapConfig {
    /// Account receiving the funds to swap.
    pub account: String,
    pub fee: SwapFeeConfig,
    pub slippage: SwapSlippageConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerStatus {
    pub is_maintenance_on: bool,
    pub layer_two_delayed: bool,
}

/// An estimate: the routing steps returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Estimate {
    pub steps: Vec<SwapStep>,
}

impl Estimate {
    /// Amount of end token produced by the last step.
    pub fn final_amount(&self) -> Option<f64> {
        self.steps.last().map(|s| s.estimate)
    }
}

/// Tokens last used in the swap form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastUsedTokens {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Outcome of [`SwapTokenService::execute_swap`](crate::swap::SwapTokenService::execute_swap).
#[derive(Debug, Clone, PartialEq)]
pub enum SwapExecution {
    /// Funds were sent and the transfer was observed.
    Confirmed { estimate_id: String, tx_id: String },
    /// Funds were sent but no confirmation arrived within the polling window.
    Unconfirmed { estimate_id: String, tx_id: String },
    /// The ledger processed the transfer with an error.
    Failed {
        estimate_id: String,
        tx_id: String,
        error: Value,
    },
}

/// Errors from the swap workflow.
#[derive(Debug, Error)]
pub enum SwapError {
    /// Empty symbol or non-positive amount; nothing was requested.
    #[error("invalid swap parameters: {0}")]
    InvalidParameters(String),

    /// The swap service returned an error payload.
    #[error("swap service error: {0}")]
    Service(Value),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Broadcast(#[from] BroadcastError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Token definition missing from the ledger.
    #[error("unknown token {0}")]
    UnknownToken(String),
}

/// Result type for swap operations.
pub type SwapResult<T> = Result<T, SwapError>;
