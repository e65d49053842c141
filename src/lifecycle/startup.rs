//! Startup orchestration.
//!
//! # Responsibilities
//! - Open device storage
//! - Load the RPC registry and publish its active endpoints
//! - Build every service client on one HTTP client
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently

use std::sync::Arc;
use thiserror::Error;

use crate::api::{build_http_client, ApiError, HiveClient, HiveEngineClient, SwapApi};
use crate::config::WalletConfig;
use crate::rpc::{RegistryError, RpcRegistry};
use crate::storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
use crate::swap::SwapTokenService;
use crate::tokens::{TokenLedger, TransactionConfirmer};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    #[error("registry: {0}")]
    Registry(#[from] RegistryError),

    #[error("http client: {0}")]
    Http(#[from] ApiError),
}

/// Everything a wallet session needs, wired together.
#[derive(Debug)]
pub struct Wallet {
    pub config: WalletConfig,
    pub registry: RpcRegistry,
    pub hive: HiveClient,
    pub ledger: TokenLedger,
    pub swaps: SwapTokenService,
}

impl Wallet {
    /// Wire a session backed by the storage file named in `config`.
    pub fn bootstrap(config: WalletConfig) -> Result<Self, StartupError> {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.storage.path)?);
        Self::with_store(config, store)
    }

    /// Wire a session on a volatile store.
    pub fn in_memory(config: WalletConfig) -> Result<Self, StartupError> {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    pub fn with_store(config: WalletConfig, store: Arc<dyn KeyValueStore>) -> Result<Self, StartupError> {
        let registry = RpcRegistry::load(store.clone(), &config.endpoints)?;
        let endpoints = registry.active();
        let http = build_http_client(&config.timeouts)?;

        let hive = HiveClient::new(http.clone(), endpoints.clone());
        let ledger = TokenLedger::new(HiveEngineClient::new(http.clone(), endpoints));
        let swaps = SwapTokenService::new(
            SwapApi::new(http, &config.swap.base_url),
            ledger.clone(),
            store,
            &config.confirmation,
        );

        tracing::info!(
            swap_service = %config.swap.base_url,
            storage = %config.storage.path,
            "Wallet ready"
        );

        Ok(Self {
            config,
            registry,
            hive,
            ledger,
            swaps,
        })
    }

    /// A confirmer for arbitrary Hive-Engine transactions.
    pub fn confirmer(&self) -> TransactionConfirmer<HiveEngineClient> {
        TransactionConfirmer::new(self.ledger.client().clone(), &self.config.confirmation)
    }
}
