//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Broadcast accepted:
//!     → polling.rs (fixed interval, bounded attempts, optional shutdown)
//!     → caller inspects PollOutcome
//!     → delay_refresh before re-reading balances
//! ```
//!
//! # Design Decisions
//! - Constant delay; the ledger processes blocks at a steady pace
//! - Every loop is bounded; none waits forever

pub mod polling;

pub use polling::{delay_refresh, poll_fixed, poll_fixed_until, refresh_delay_at, PollOutcome};
