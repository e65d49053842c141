//! Key/value stores.
//!
//! # Responsibilities
//! - Hold string values under [`StorageKey`]s
//! - Persist every write to disk (file store)
//! - Offer typed JSON helpers on top of raw strings

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::storage::keys::StorageKey;
use crate::storage::{StorageError, StorageResult};

/// Device-local string storage.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`.
    fn get(&self, key: StorageKey) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: StorageKey, value: &str) -> StorageResult<()>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove(&self, key: StorageKey) -> StorageResult<()>;
}

/// Read a JSON encoded value.
pub fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: StorageKey,
) -> StorageResult<Option<T>> {
    match store.get(key)? {
        Some(raw) => {
            let value = serde_json::from_str(&raw).map_err(|e| StorageError::Serde {
                key: key.to_string(),
                source: e,
            })?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Write a value as JSON.
pub fn set_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: StorageKey,
    value: &T,
) -> StorageResult<()> {
    let raw = serde_json::to_string(value).map_err(|e| StorageError::Serde {
        key: key.to_string(),
        source: e,
    })?;
    store.set(key, &raw)
}

/// Volatile store, used in tests and when no storage path is configured.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<&'static str, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: StorageKey) -> StorageResult<Option<String>> {
        Ok(self.inner.get(key.as_str()).map(|v| v.value().clone()))
    }

    fn set(&self, key: StorageKey, value: &str) -> StorageResult<()> {
        self.inner.insert(key.as_str(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> StorageResult<()> {
        self.inner.remove(key.as_str());
        Ok(())
    }
}

/// JSON file backed store. The whole map is rewritten on each change.
#[derive(Debug, Clone)]
pub struct FileStore {
    inner: Arc<DashMap<String, String>>,
    path: PathBuf,
}

impl FileStore {
    /// Open the store at `path`, loading existing entries if the file exists.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        let inner = DashMap::new();

        if path.exists() {
            let file = File::open(&path).map_err(|e| StorageError::Io {
                path: path.display().to_string(),
                source: e,
            })?;
            let map: BTreeMap<String, String> = serde_json::from_reader(BufReader::new(file))
                .map_err(|e| StorageError::Serde {
                    key: path.display().to_string(),
                    source: e,
                })?;
            for (k, v) in map {
                inner.insert(k, v);
            }
            tracing::debug!(path = %path.display(), entries = inner.len(), "Loaded device storage");
        }

        Ok(Self {
            inner: Arc::new(inner),
            path,
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> StorageResult<()> {
        let io_err = |e| StorageError::Io {
            path: self.path.display().to_string(),
            source: e,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let snapshot: BTreeMap<String, String> = self
            .inner
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();

        let file = File::create(&self.path).map_err(io_err)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &snapshot).map_err(|e| {
            StorageError::Serde {
                key: self.path.display().to_string(),
                source: e,
            }
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: StorageKey) -> StorageResult<Option<String>> {
        Ok(self.inner.get(key.as_str()).map(|v| v.value().clone()))
    }

    fn set(&self, key: StorageKey, value: &str) -> StorageResult<()> {
        self.inner.insert(key.as_str().to_string(), value.to_string());
        self.flush()
    }

    fn remove(&self, key: StorageKey) -> StorageResult<()> {
        if self.inner.remove(key.as_str()).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
