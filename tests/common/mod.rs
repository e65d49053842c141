//! Shared utilities for integration tests.

#![allow(dead_code)]

use serde_json::Value;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use hive_wallet::api::{build_http_client, HiveEngineClient, SwapApi};
use hive_wallet::chain::{BroadcastError, BroadcastResult, Broadcaster, KeyRole, Operation};
use hive_wallet::config::{ConfirmationConfig, TimeoutConfig};
use hive_wallet::rpc::ActiveEndpoints;
use hive_wallet::storage::MemoryStore;
use hive_wallet::{SwapTokenService, TokenLedger};

/// A request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct MockRequest {
    pub method: String,
    /// Path including the query string.
    pub path: String,
    pub body: String,
}

impl MockRequest {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }

    /// `method` of a JSON-RPC body.
    pub fn rpc_method(&self) -> String {
        self.json()["method"].as_str().unwrap_or_default().to_string()
    }
}

/// JSON-RPC 2.0 success body.
pub fn rpc_result(result: Value) -> String {
    serde_json::json!({ "jsonrpc": "2.0", "id": 1, "result": result }).to_string()
}

/// Swap service envelope.
pub fn envelope(result: Value, error: Value) -> String {
    serde_json::json!({ "result": result, "error": error }).to_string()
}

async fn read_request(socket: &mut TcpStream) -> Option<MockRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let content_length = lines
        .filter_map(|l| l.split_once(':'))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

    Some(MockRequest { method, path, body })
}

/// Start a programmable JSON backend on an ephemeral port.
///
/// Every request is recorded in the returned log before `f` answers it.
pub async fn start_programmable_backend<F, Fut>(f: F) -> (SocketAddr, Arc<Mutex<Vec<MockRequest>>>)
where
    F: Fn(MockRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);
    let log = Arc::new(Mutex::new(Vec::new()));
    let seen = log.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let seen = seen.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        seen.lock().unwrap().push(request.clone());
                        let (status, body) = f(request).await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, log)
}

/// Paths requested so far.
pub fn paths(log: &Arc<Mutex<Vec<MockRequest>>>) -> Vec<String> {
    log.lock().unwrap().iter().map(|r| r.path.clone()).collect()
}

/// Fast polling for tests.
pub fn fast_confirmation() -> ConfirmationConfig {
    ConfirmationConfig {
        max_attempts: 20,
        interval_ms: 1,
    }
}

pub fn engine_client(engine: SocketAddr) -> HiveEngineClient {
    let http = build_http_client(&TimeoutConfig::default()).unwrap();
    let url = format!("http://{}", engine);
    HiveEngineClient::new(http, ActiveEndpoints::fixed(&url, &url, &url))
}

/// Swap service on `swap`, ledger on `engine`, volatile storage.
pub fn swap_service(swap: SocketAddr, engine: SocketAddr) -> SwapTokenService {
    let http = build_http_client(&TimeoutConfig::default()).unwrap();
    SwapTokenService::new(
        SwapApi::new(http, &format!("http://{}/", swap)),
        TokenLedger::new(engine_client(engine)),
        Arc::new(MemoryStore::new()),
        &fast_confirmation(),
    )
}

/// Broadcaster that records operations and answers a fixed transaction id.
#[derive(Debug, Default)]
pub struct RecordingBroadcaster {
    pub sent: Mutex<Vec<(Vec<Operation>, KeyRole)>>,
}

impl RecordingBroadcaster {
    pub fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Broadcaster for RecordingBroadcaster {
    fn broadcast(
        &self,
        operations: Vec<Operation>,
        role: KeyRole,
    ) -> impl Future<Output = Result<BroadcastResult, BroadcastError>> + Send {
        self.sent.lock().unwrap().push((operations, role));
        async {
            Ok(BroadcastResult {
                tx_id: "a1b2c3".to_string(),
            })
        }
    }
}
