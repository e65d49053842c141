//! Hive-Engine client, ledger and confirmation polling over HTTP.

use serde_json::{json, Value};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use hive_wallet::api::{build_http_client, HiveEngineClient};
use hive_wallet::config::TimeoutConfig;
use hive_wallet::rpc::{Rpc, RpcKind, RpcRegistry};
use hive_wallet::storage::MemoryStore;
use hive_wallet::tokens::{TokenLedger, TransactionConfirmer};

mod common;

#[tokio::test]
async fn test_confirmation_stops_once_transaction_appears() {
    let lookups = Arc::new(AtomicU32::new(0));
    let counter = lookups.clone();
    let (engine, log) = common::start_programmable_backend(move |_| {
        let counter = counter.clone();
        async move {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 3 {
                (200, common::rpc_result(Value::Null))
            } else {
                (200, common::rpc_result(json!({"transactionId": "tx1", "logs": "{\"events\":[]}"})))
            }
        }
    })
    .await;

    let confirmer = TransactionConfirmer::new(common::engine_client(engine), &common::fast_confirmation());
    let result = confirmer.try_confirm_transaction("tx1").await;

    assert!(result.confirmed);
    assert_eq!(result.error, None);
    assert_eq!(lookups.load(Ordering::SeqCst), 3);

    let request = log.lock().unwrap()[0].clone();
    assert_eq!(request.path, "/blockchain");
    assert_eq!(request.rpc_method(), "getTransactionInfo");
    assert_eq!(request.json()["params"]["txid"], "tx1");
}

#[tokio::test]
async fn test_confirmation_gives_up_after_max_attempts() {
    let (engine, log) = common::start_programmable_backend(|_| async { (200, common::rpc_result(Value::Null)) }).await;

    let confirmer = TransactionConfirmer::new(common::engine_client(engine), &common::fast_confirmation());
    let result = confirmer.try_confirm_transaction("never").await;

    assert!(!result.confirmed);
    assert_eq!(log.lock().unwrap().len(), 20);
}

#[tokio::test]
async fn test_confirmation_survives_server_errors() {
    let (engine, log) = common::start_programmable_backend(|_| async { (503, "down".to_string()) }).await;

    let confirmer = TransactionConfirmer::new(common::engine_client(engine), &common::fast_confirmation());
    let result = confirmer.try_confirm_transaction("tx1").await;

    assert!(!result.confirmed);
    assert_eq!(log.lock().unwrap().len(), 20);
}

#[tokio::test]
async fn test_all_tokens_are_paged() {
    let (engine, log) = common::start_programmable_backend(|req| async move {
        let offset = req.json()["params"]["offset"].as_u64().unwrap_or(0);
        let count = if offset == 0 { 1000 } else { 2 };
        let tokens: Vec<Value> = (0..count)
            .map(|i| json!({"symbol": format!("T{}", offset + i), "precision": 3, "metadata": "{}"}))
            .collect();
        (200, common::rpc_result(Value::Array(tokens)))
    })
    .await;

    let ledger = TokenLedger::new(common::engine_client(engine));
    let tokens = ledger.get_all_tokens().await.unwrap();
    assert_eq!(tokens.len(), 1002);
    assert_eq!(log.lock().unwrap().len(), 2);

    // Served from the cache, no further request.
    let token = ledger.get_token_info("T1001").await.unwrap().unwrap();
    assert_eq!(token.precision, 3);
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_empty_token_table_terminates() {
    let (engine, log) = common::start_programmable_backend(|_| async { (200, common::rpc_result(json!([]))) }).await;

    let ledger = TokenLedger::new(common::engine_client(engine));
    assert!(ledger.get_all_tokens().await.unwrap().is_empty());
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_user_balance_query() {
    let (engine, log) = common::start_programmable_backend(|_| async {
        (
            200,
            common::rpc_result(json!([
                {"account": "alice", "symbol": "LEO", "balance": "12.5", "stake": "1"}
            ])),
        )
    })
    .await;

    let ledger = TokenLedger::new(common::engine_client(engine));
    let balances = ledger.get_user_balance("alice").await.unwrap();
    assert_eq!(balances[0].liquid(), 12.5);

    let request = log.lock().unwrap()[0].json();
    assert_eq!(request["method"], "find");
    assert_eq!(request["params"]["contract"], "tokens");
    assert_eq!(request["params"]["table"], "balances");
    assert_eq!(request["params"]["query"]["account"], "alice");
    assert_eq!(request["params"]["limit"], 1000);
}

#[tokio::test]
async fn test_account_history_query_string() {
    let (engine, log) = common::start_programmable_backend(|_| async {
        (
            200,
            json!([{"_id": "x", "blockNumber": 5, "transactionId": "t", "timestamp": 1,
                    "operation": "tokens_transfer", "from": "alice", "to": "bob",
                    "symbol": "LEO", "quantity": "1.000"}])
            .to_string(),
        )
    })
    .await;

    let ledger = TokenLedger::new(common::engine_client(engine));
    let history = ledger
        .get_account_history("alice", Some("LEO"), 10, 20)
        .await
        .unwrap();
    assert_eq!(history[0].operation, "tokens_transfer");

    let request = log.lock().unwrap()[0].clone();
    assert_eq!(request.method, "GET");
    assert_eq!(
        request.path,
        "/accountHistory?account=alice&limit=10&offset=20&symbol=LEO"
    );
}

#[tokio::test]
async fn test_registry_selection_redirects_client() {
    let (first, first_log) = common::start_programmable_backend(|_| async { (200, common::rpc_result(json!([]))) }).await;
    let (second, second_log) = common::start_programmable_backend(|_| async { (200, common::rpc_result(json!([]))) }).await;

    let mut registry = RpcRegistry::load(Arc::new(MemoryStore::new()), &Default::default()).unwrap();
    registry
        .add(RpcKind::HiveEngine, Rpc::new(format!("http://{}", first)), true)
        .unwrap();
    registry
        .add(RpcKind::HiveEngine, Rpc::new(format!("http://{}/", second)), false)
        .unwrap();

    let http = build_http_client(&TimeoutConfig::default()).unwrap();
    let ledger = TokenLedger::new(HiveEngineClient::new(http, registry.active()));

    ledger.get_tokens_market().await.unwrap();
    registry
        .select(RpcKind::HiveEngine, &format!("http://{}", second))
        .unwrap();
    ledger.get_tokens_market().await.unwrap();

    assert_eq!(first_log.lock().unwrap().len(), 1);
    assert_eq!(second_log.lock().unwrap().len(), 1);
    assert_eq!(second_log.lock().unwrap()[0].path, "/contracts");
}
