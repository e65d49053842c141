//! RPC node registry subsystem.
//!
//! # Data Flow
//! ```text
//! user action (add / remove / select)
//!     → registry.rs (validate, de-duplicate, persist)
//!     → storage (custom lists + selection)
//!     → active.rs (swap cell read by HiveClient / HiveEngineClient)
//! ```

pub mod active;
pub mod defaults;
pub mod registry;
pub mod types;

pub use active::ActiveEndpoints;
pub use registry::RpcRegistry;
pub use types::{RegistryError, RegistryResult, Rpc, RpcEntry, RpcKind};

use url::Url;

/// True for absolute `http`/`https` URLs with a host.
pub fn is_web_uri(value: &str) -> bool {
    match Url::parse(value.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}

/// Display label for an endpoint: scheme and path stripped.
pub fn clean_rpc_label(uri: &str) -> String {
    uri.trim_start_matches("https://")
        .trim_start_matches("http://")
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string()
}
