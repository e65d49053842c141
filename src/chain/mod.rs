//! Hive blockchain integration.
//!
//! # Data Flow
//! ```text
//! HiveClient (condenser_api over the active RPC)
//!     → account.rs (HiveAccount, GlobalProperties, voting estimates)
//! operations.rs (transfer, power up/down, engine token ops, proposal votes)
//!     → broadcast.rs (Broadcaster: external signer)
//! ```
//!
//! # Security Constraints
//! - Keys never enter this crate; signing is the broadcaster's job

pub mod account;
pub mod asset;
pub mod broadcast;
pub mod operations;

pub use account::{GlobalProperties, HiveAccount};
pub use asset::Asset;
pub use broadcast::{BroadcastError, BroadcastResult, Broadcaster, KeyRole};
pub use operations::Operation;
