//! Currently selected endpoints, shared by every client.

use arc_swap::ArcSwap;
use std::sync::Arc;

use crate::rpc::types::{Rpc, RpcKind};

/// Lock-free cell per endpoint list. A selection made through the registry
/// is visible to the next request of every client holding this handle.
#[derive(Debug)]
pub struct ActiveEndpoints {
    hive: ArcSwap<Rpc>,
    hive_engine: ArcSwap<Rpc>,
    account_history: ArcSwap<Rpc>,
}

impl ActiveEndpoints {
    pub fn new(hive: Rpc, hive_engine: Rpc, account_history: Rpc) -> Self {
        Self {
            hive: ArcSwap::from_pointee(hive),
            hive_engine: ArcSwap::from_pointee(hive_engine),
            account_history: ArcSwap::from_pointee(account_history),
        }
    }

    /// Fixed endpoints, mostly for tests and one-off clients.
    pub fn fixed(hive: &str, hive_engine: &str, account_history: &str) -> Arc<Self> {
        Arc::new(Self::new(
            Rpc::new(hive),
            Rpc::new(hive_engine),
            Rpc::new(account_history),
        ))
    }

    fn cell(&self, kind: RpcKind) -> &ArcSwap<Rpc> {
        match kind {
            RpcKind::Hive => &self.hive,
            RpcKind::HiveEngine => &self.hive_engine,
            RpcKind::AccountHistory => &self.account_history,
        }
    }

    pub fn get(&self, kind: RpcKind) -> Arc<Rpc> {
        self.cell(kind).load_full()
    }

    /// Active URI without a trailing slash, ready for path joining.
    pub fn base_url(&self, kind: RpcKind) -> String {
        self.cell(kind).load().uri.trim_end_matches('/').to_string()
    }

    pub fn set(&self, kind: RpcKind, rpc: Rpc) {
        self.cell(kind).store(Arc::new(rpc));
    }
}
