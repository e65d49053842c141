//! Broadcasting seam.
//!
//! Signing and broadcasting belong to an external Hive client; the wallet
//! only hands it operations and reads back the transaction id.

use std::future::Future;
use thiserror::Error;

use crate::chain::operations::Operation;

/// Authority a set of operations must be signed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    Active,
    Posting,
}

/// Errors reported by a broadcaster.
#[derive(Debug, Error)]
pub enum BroadcastError {
    /// The node rejected the transaction.
    #[error("transaction rejected: {0}")]
    Rejected(String),

    /// The key for the requested authority is not available.
    #[error("missing {0:?} key")]
    MissingKey(KeyRole),

    /// The node could not be reached.
    #[error("broadcast unavailable: {0}")]
    Unavailable(String),
}

/// Accepted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastResult {
    pub tx_id: String,
}

/// Signs and broadcasts operations.
pub trait Broadcaster: Send + Sync {
    fn broadcast(
        &self,
        operations: Vec<Operation>,
        role: KeyRole,
    ) -> impl Future<Output = Result<BroadcastResult, BroadcastError>> + Send;
}
