//! Remote service clients.
//!
//! # Data Flow
//! ```text
//! SwapApi          → swap service REST (token-swap/*, server/status)
//! HiveEngineClient → active Hive-Engine node (/contracts, /blockchain)
//!                  → active account history API (/accountHistory)
//! HiveClient       → active Hive node (condenser_api)
//! ```
//!
//! # Design Decisions
//! - One reqwest client built from [`TimeoutConfig`](crate::config::TimeoutConfig), cloned into every service client
//! - Endpoints are resolved per request so registry switches apply immediately

pub mod engine;
pub mod error;
pub mod hive;
pub mod http;
pub mod jsonrpc;
pub mod swap;

pub use engine::{FindQuery, HiveEngineClient};
pub use error::{ApiError, ApiResult};
pub use hive::HiveClient;
pub use http::build_http_client;
pub use swap::SwapApi;
