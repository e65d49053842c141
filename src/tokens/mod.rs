//! Hive-Engine token subsystem.
//!
//! # Data Flow
//! ```text
//! TokenLedger (ledger.rs)
//!     → HiveEngineClient find / findOne → TokenBalance, Token, TokenMarket
//!     → account history API → TokenOperation
//!
//! TransactionConfirmer (confirm.rs)
//!     → getTransactionInfo every interval, at most max_attempts times
//!     → ConfirmationResult { confirmed, error from logs }
//! ```
//!
//! # Design Decisions
//! - Token definitions are cached per process; balances never are
//! - Confirmation never fails: exhausted polling reports unconfirmed

pub mod confirm;
pub mod ledger;
pub mod types;

pub use confirm::{parse_logs_error, ConfirmationResult, TransactionConfirmer, TransactionSource};
pub use ledger::TokenLedger;
pub use types::{Token, TokenBalance, TokenMarket, TokenMetadata, TokenOperation};
