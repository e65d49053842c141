//! Device-local persisted storage.
//!
//! # Data Flow
//! ```text
//! registry / swap service
//!     → keys.rs (well-known storage keys)
//!     → store.rs (KeyValueStore: memory or JSON file)
//! ```

pub mod keys;
pub mod store;

use thiserror::Error;

pub use keys::StorageKey;
pub use store::{get_json, set_json, FileStore, KeyValueStore, MemoryStore};

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A stored value could not be encoded or decoded.
    #[error("invalid stored value for {key}: {source}")]
    Serde {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
