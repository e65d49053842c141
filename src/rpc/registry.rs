//! RPC node registry.
//!
//! # Responsibilities
//! - Keep a built-in and a custom list per [`RpcKind`]
//! - Validate and de-duplicate custom entries on insert
//! - Fall back to the default endpoint when the active custom entry is removed
//! - Persist custom lists, selections and the auto-switch flag
//!
//! # Design Decisions
//! - Built-in entries are never written to storage
//! - The active endpoint lives in [`ActiveEndpoints`] so clients observe
//!   a selection without holding a reference to the registry

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::EndpointConfig;
use crate::observability::metrics;
use crate::rpc::active::ActiveEndpoints;
use crate::rpc::defaults::defaults_for;
use crate::rpc::types::{RegistryError, RegistryResult, Rpc, RpcEntry, RpcKind};
use crate::rpc::{clean_rpc_label, is_web_uri};
use crate::storage::{get_json, set_json, KeyValueStore, StorageKey};

/// Named endpoint lists backed by device storage.
pub struct RpcRegistry {
    store: Arc<dyn KeyValueStore>,
    defaults: HashMap<RpcKind, String>,
    custom: HashMap<RpcKind, Vec<Rpc>>,
    active: Arc<ActiveEndpoints>,
}

fn same_uri(a: &str, b: &str) -> bool {
    a.trim_end_matches('/') == b.trim_end_matches('/')
}

impl RpcRegistry {
    /// Load custom lists and selections from `store`.
    ///
    /// A stored selection that no longer matches a known entry is replaced by
    /// the configured default.
    pub fn load(store: Arc<dyn KeyValueStore>, endpoints: &EndpointConfig) -> RegistryResult<Self> {
        let defaults: HashMap<RpcKind, String> = [
            (RpcKind::Hive, endpoints.hive_rpc.clone()),
            (RpcKind::HiveEngine, endpoints.hive_engine_rpc.clone()),
            (RpcKind::AccountHistory, endpoints.account_history_api.clone()),
        ]
        .into_iter()
        .collect();

        let mut custom = HashMap::new();
        for kind in RpcKind::ALL {
            let list: Vec<Rpc> = get_json(store.as_ref(), kind.custom_key())?.unwrap_or_default();
            custom.insert(kind, list);
        }

        let mut registry = Self {
            store,
            active: Arc::new(ActiveEndpoints::new(
                Rpc::new(&defaults[&RpcKind::Hive]),
                Rpc::new(&defaults[&RpcKind::HiveEngine]),
                Rpc::new(&defaults[&RpcKind::AccountHistory]),
            )),
            defaults,
            custom,
        };

        for kind in RpcKind::ALL {
            let stored: Option<Rpc> = get_json(registry.store.as_ref(), kind.active_key())?;
            match stored {
                Some(rpc) if registry.is_known(kind, &rpc.uri) => registry.active.set(kind, rpc),
                Some(rpc) => {
                    tracing::warn!(
                        kind = %kind,
                        uri = %rpc.uri,
                        "Stored active RPC is no longer listed, using default"
                    );
                }
                None => {}
            }
        }

        tracing::debug!(
            hive = %registry.active.base_url(RpcKind::Hive),
            hive_engine = %registry.active.base_url(RpcKind::HiveEngine),
            account_history = %registry.active.base_url(RpcKind::AccountHistory),
            "RPC registry loaded"
        );

        Ok(registry)
    }

    /// Shared handle on the selected endpoints.
    pub fn active(&self) -> Arc<ActiveEndpoints> {
        self.active.clone()
    }

    /// Endpoint used when nothing else is selected.
    pub fn default_uri(&self, kind: RpcKind) -> &str {
        &self.defaults[&kind]
    }

    /// User-added entries for `kind`.
    pub fn custom(&self, kind: RpcKind) -> &[Rpc] {
        self.custom.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    fn builtin(&self, kind: RpcKind) -> Vec<&str> {
        let mut list: Vec<&str> = defaults_for(kind).to_vec();
        let configured = self.default_uri(kind);
        if !list.iter().any(|uri| same_uri(uri, configured)) {
            list.insert(0, configured);
        }
        list
    }

    fn is_builtin(&self, kind: RpcKind, uri: &str) -> bool {
        self.builtin(kind).iter().any(|known| same_uri(known, uri))
    }

    fn is_custom(&self, kind: RpcKind, uri: &str) -> bool {
        self.custom(kind).iter().any(|rpc| same_uri(&rpc.uri, uri))
    }

    fn is_known(&self, kind: RpcKind, uri: &str) -> bool {
        self.is_builtin(kind, uri) || self.is_custom(kind, uri)
    }

    /// Built-in entries followed by custom ones.
    pub fn list(&self, kind: RpcKind) -> Vec<RpcEntry> {
        let active = self.active.get(kind);
        let builtin = self.builtin(kind).into_iter().map(|uri| (Rpc::new(uri), false));
        let custom = self.custom(kind).iter().cloned().map(|rpc| (rpc, true));

        builtin
            .chain(custom)
            .map(|(rpc, removable)| RpcEntry {
                label: clean_rpc_label(&rpc.uri),
                active: same_uri(&rpc.uri, &active.uri),
                uri: rpc.uri,
                testnet: rpc.testnet,
                removable,
            })
            .collect()
    }

    /// Add a custom entry, optionally selecting it.
    pub fn add(&mut self, kind: RpcKind, rpc: Rpc, set_active: bool) -> RegistryResult<()> {
        let rpc = Rpc {
            uri: rpc.uri.trim().to_string(),
            testnet: rpc.testnet,
        };
        if !is_web_uri(&rpc.uri) {
            return Err(RegistryError::InvalidUrl(rpc.uri));
        }
        if self.is_known(kind, &rpc.uri) {
            return Err(RegistryError::AlreadyExists(rpc.uri));
        }

        let list = self.custom.entry(kind).or_default();
        list.push(rpc.clone());
        set_json(self.store.as_ref(), kind.custom_key(), &*list)?;
        metrics::record_registry_change(kind.name(), "add");
        tracing::info!(kind = %kind, uri = %rpc.uri, "RPC node added");

        if set_active {
            self.activate(kind, rpc)?;
        }
        Ok(())
    }

    /// Remove a custom entry. If it was active, the default takes over.
    pub fn remove(&mut self, kind: RpcKind, uri: &str) -> RegistryResult<()> {
        if !self.is_custom(kind, uri) {
            return Err(if self.is_builtin(kind, uri) {
                RegistryError::NotRemovable(uri.to_string())
            } else {
                RegistryError::UnknownEndpoint(uri.to_string())
            });
        }

        if same_uri(&self.active.get(kind).uri, uri) {
            let fallback = Rpc::new(self.default_uri(kind));
            tracing::info!(kind = %kind, removed = %uri, fallback = %fallback.uri, "Active RPC removed, falling back to default");
            self.activate(kind, fallback)?;
        }

        let list = self.custom.entry(kind).or_default();
        list.retain(|rpc| !same_uri(&rpc.uri, uri));
        set_json(self.store.as_ref(), kind.custom_key(), &*list)?;
        metrics::record_registry_change(kind.name(), "remove");
        tracing::info!(kind = %kind, uri = %uri, "RPC node removed");
        Ok(())
    }

    /// Switch the in-use endpoint for `kind`.
    pub fn select(&mut self, kind: RpcKind, uri: &str) -> RegistryResult<()> {
        let rpc = if let Some(custom) = self.custom(kind).iter().find(|rpc| same_uri(&rpc.uri, uri)) {
            custom.clone()
        } else if self.is_builtin(kind, uri) {
            Rpc::new(uri)
        } else {
            return Err(RegistryError::UnknownEndpoint(uri.to_string()));
        };
        self.activate(kind, rpc)
    }

    fn activate(&mut self, kind: RpcKind, rpc: Rpc) -> RegistryResult<()> {
        set_json(self.store.as_ref(), kind.active_key(), &rpc)?;
        tracing::info!(kind = %kind, uri = %rpc.uri, testnet = rpc.testnet, "Active RPC switched");
        self.active.set(kind, rpc);
        metrics::record_registry_change(kind.name(), "select");
        Ok(())
    }

    /// Persisted "switch automatically" preference. Nothing acts on it yet.
    pub fn switch_auto(&self) -> RegistryResult<bool> {
        Ok(self.store.get(StorageKey::SwitchRpcAuto)?.as_deref() == Some("true"))
    }

    pub fn set_switch_auto(&self, enabled: bool) -> RegistryResult<()> {
        self.store
            .set(StorageKey::SwitchRpcAuto, if enabled { "true" } else { "false" })?;
        Ok(())
    }
}

impl std::fmt::Debug for RpcRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcRegistry")
            .field("active", &self.active)
            .field("custom", &self.custom)
            .finish()
    }
}
