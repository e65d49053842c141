//! Token swap subsystem.
//!
//! # Data Flow
//! ```text
//! get_estimate(start, end, amount)
//!     → SwapApi GET token-swap/estimate → Estimate (steps)
//! execute_swap(estimate, request)
//!     → save_estimate → estimate id
//!     → process_swap → Broadcaster (transfer or engine transfer, memo = estimate id)
//!     → TransactionConfirmer (engine tokens only)
//!     → set_as_initiated
//!     → SwapExecution { Confirmed | Unconfirmed | Failed }
//! ```
//!
//! # Design Decisions
//! - Estimate errors surface before anything is saved or sent
//! - Last used token pair is device state, not server state

pub mod service;
pub mod types;

pub use service::{format_with_commas, SwapHistoryEntry, SwapRequest, SwapTokenService};
pub use types::{
    Estimate, LastUsedTokens, ServerStatus, Swap, SwapConfig, SwapError, SwapExecution, SwapResult,
    SwapStatus, SwapStep,
};
