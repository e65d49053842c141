//! Client-side operation flows of a Hive wallet.
//!
//! Token swaps against the swap service, Hive-Engine transaction
//! confirmation, the RPC node registry and the ledger snapshots they rely on.

pub mod api;
pub mod chain;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod rpc;
pub mod storage;
pub mod swap;
pub mod tokens;

pub use config::WalletConfig;
pub use lifecycle::{Shutdown, Wallet};
pub use rpc::{RpcKind, RpcRegistry};
pub use swap::SwapTokenService;
pub use tokens::{TokenLedger, TransactionConfirmer};
