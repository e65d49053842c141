//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the wallet.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the wallet.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WalletConfig {
    /// Device-local storage settings.
    pub storage: StorageConfig,

    /// Remote swap orchestration service.
    pub swap: SwapServiceConfig,

    /// Built-in endpoints used when nothing else is selected.
    pub endpoints: EndpointConfig,

    /// Transaction confirmation polling.
    pub confirmation: ConfirmationConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the JSON file holding persisted key/value pairs.
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "hive-wallet-storage.json".to_string(),
        }
    }
}

/// Swap service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SwapServiceConfig {
    /// Base URL of the swap service (e.g., "https://swap.hive-keychain.com").
    pub base_url: String,
}

impl Default for SwapServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://swap.hive-keychain.com".to_string(),
        }
    }
}

/// Default endpoints for the three RPC lists.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Core Hive RPC node.
    pub hive_rpc: String,

    /// Hive-Engine RPC node.
    pub hive_engine_rpc: String,

    /// Hive-Engine account history API.
    pub account_history_api: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            hive_rpc: "https://api.hive.blog".to_string(),
            hive_engine_rpc: "https://engine.rishipanthee.com".to_string(),
            account_history_api: "https://history.hive-engine.com".to_string(),
        }
    }
}

/// Confirmation polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    /// Maximum number of transaction info lookups.
    pub max_attempts: u32,

    /// Fixed delay before each lookup in milliseconds.
    pub interval_ms: u64,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            interval_ms: 1000,
        }
    }
}

/// Timeout configuration for outgoing requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
