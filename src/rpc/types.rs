//! RPC registry types and errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::{StorageError, StorageKey};

/// A blockchain or Hive-Engine endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rpc {
    pub uri: String,
    #[serde(default)]
    pub testnet: bool,
}

impl Rpc {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            testnet: false,
        }
    }

    pub fn testnet(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            testnet: true,
        }
    }
}

/// The three independent endpoint lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcKind {
    /// Core Hive blockchain RPC.
    Hive,
    /// Hive-Engine sidechain RPC.
    HiveEngine,
    /// Hive-Engine account history API.
    AccountHistory,
}

impl RpcKind {
    pub const ALL: [RpcKind; 3] = [RpcKind::Hive, RpcKind::HiveEngine, RpcKind::AccountHistory];

    pub fn custom_key(&self) -> StorageKey {
        match self {
            RpcKind::Hive => StorageKey::CustomRpcList,
            RpcKind::HiveEngine => StorageKey::CustomHiveEngineRpcList,
            RpcKind::AccountHistory => StorageKey::CustomAccountHistoryApiList,
        }
    }

    pub fn active_key(&self) -> StorageKey {
        match self {
            RpcKind::Hive => StorageKey::ActiveRpc,
            RpcKind::HiveEngine => StorageKey::ActiveHiveEngineRpc,
            RpcKind::AccountHistory => StorageKey::ActiveAccountHistoryApi,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RpcKind::Hive => "hive",
            RpcKind::HiveEngine => "hive_engine",
            RpcKind::AccountHistory => "account_history",
        }
    }
}

impl std::fmt::Display for RpcKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of [`RpcRegistry::list`](crate::rpc::RpcRegistry::list).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RpcEntry {
    pub uri: String,
    pub label: String,
    pub testnet: bool,
    /// Only custom entries can be removed.
    pub removable: bool,
    pub active: bool,
}

/// Errors that can occur while editing the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Not an absolute http(s) URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The URI is already listed (default or custom).
    #[error("RPC node already exists: {0}")]
    AlreadyExists(String),

    /// Built-in entries cannot be removed.
    #[error("RPC node {0} is not a custom entry")]
    NotRemovable(String),

    /// Selecting a URI that is in neither the default nor the custom list.
    #[error("unknown RPC node: {0}")]
    UnknownEndpoint(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
