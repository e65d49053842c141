//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     WalletConfig → open storage → load RPC registry → build HTTP client → clients
//!
//! Shutdown (shutdown.rs):
//!     trigger() → every subscribed poll stops and reports unconfirmed
//!
//! Signals (signals.rs):
//!     Ctrl-C → Shutdown::trigger
//! ```
//!
//! # Design Decisions
//! - Ordered startup: storage first, then registry, then clients sharing its endpoints
//! - Fail fast: any startup error is fatal

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{StartupError, Wallet};
