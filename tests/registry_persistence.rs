//! RPC registry state survives a restart on the file store.

use std::sync::Arc;

use hive_wallet::config::EndpointConfig;
use hive_wallet::rpc::{RegistryError, Rpc, RpcKind, RpcRegistry};
use hive_wallet::storage::{FileStore, KeyValueStore};

fn open(path: &std::path::Path) -> RpcRegistry {
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(path).unwrap());
    RpcRegistry::load(store, &EndpointConfig::default()).unwrap()
}

#[test]
fn test_custom_lists_and_selection_persist() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wallet.json");

    {
        let mut registry = open(&path);
        registry
            .add(RpcKind::Hive, Rpc::testnet("https://testnet.example.com"), true)
            .unwrap();
        registry
            .add(RpcKind::AccountHistory, Rpc::new("https://history.example.com"), false)
            .unwrap();
        registry.set_switch_auto(true).unwrap();
    }

    let registry = open(&path);
    let active = registry.active().get(RpcKind::Hive);
    assert_eq!(active.uri, "https://testnet.example.com");
    assert!(active.testnet);
    assert_eq!(registry.custom(RpcKind::AccountHistory).len(), 1);
    assert!(registry.custom(RpcKind::HiveEngine).is_empty());
    assert!(registry.switch_auto().unwrap());
}

#[test]
fn test_removed_active_falls_back_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wallet.json");

    {
        let mut registry = open(&path);
        registry
            .add(RpcKind::HiveEngine, Rpc::new("https://he.example.com"), true)
            .unwrap();
        registry
            .remove(RpcKind::HiveEngine, "https://he.example.com")
            .unwrap();
    }

    let registry = open(&path);
    assert_eq!(
        registry.active().base_url(RpcKind::HiveEngine),
        registry.default_uri(RpcKind::HiveEngine).trim_end_matches('/')
    );
    assert!(registry.custom(RpcKind::HiveEngine).is_empty());
}

#[test]
fn test_duplicates_rejected_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wallet.json");

    open(&path)
        .add(RpcKind::Hive, Rpc::new("https://node.example.com"), false)
        .unwrap();

    let mut registry = open(&path);
    let err = registry
        .add(RpcKind::Hive, Rpc::new("https://node.example.com"), false)
        .unwrap_err();
    assert!(matches!(err, RegistryError::AlreadyExists(_)));
}
