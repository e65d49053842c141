//! Transaction confirmation polling.
//!
//! # Responsibilities
//! - Poll the ledger for a processed transaction with a bounded, fixed-interval loop
//! - Extract the first error from the embedded `logs` JSON string
//!
//! # Design Decisions
//! - Constant delay, no backoff
//! - A failed lookup counts as "not processed yet"
//! - Exhausting the attempts reports unconfirmed instead of erroring

use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tokio::sync::broadcast;

use crate::api::{ApiResult, HiveEngineClient};
use crate::config::ConfirmationConfig;
use crate::observability::metrics;
use crate::resilience::polling::{poll_fixed, poll_fixed_until, PollOutcome};

/// Outcome of a confirmation poll.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfirmationResult {
    /// The ledger returned the transaction.
    pub confirmed: bool,
    /// First error the ledger logged for it, if any.
    pub error: Option<Value>,
}

/// Something that can look up a processed transaction by id.
pub trait TransactionSource: Send + Sync {
    fn transaction_info(&self, trx_id: &str) -> impl Future<Output = ApiResult<Option<Value>>> + Send;
}

impl TransactionSource for HiveEngineClient {
    fn transaction_info(&self, trx_id: &str) -> impl Future<Output = ApiResult<Option<Value>>> + Send {
        self.get_transaction_info(trx_id)
    }
}

/// Polls a [`TransactionSource`] until a transaction shows up.
#[derive(Debug, Clone)]
pub struct TransactionConfirmer<S> {
    source: S,
    max_attempts: u32,
    interval: Duration,
}

impl<S: TransactionSource> TransactionConfirmer<S> {
    pub fn new(source: S, config: &ConfirmationConfig) -> Self {
        Self {
            source,
            max_attempts: config.max_attempts,
            interval: Duration::from_millis(config.interval_ms),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    async fn lookup(&self, trx_id: &str, attempt: u32) -> Option<Value> {
        match self.source.transaction_info(trx_id).await {
            Ok(info) => {
                if info.is_none() {
                    tracing::debug!(trx_id = %trx_id, attempt, "Transaction not processed yet");
                }
                info
            }
            Err(e) => {
                tracing::warn!(trx_id = %trx_id, attempt, error = %e, "Transaction lookup failed");
                None
            }
        }
    }

    /// Poll up to `max_attempts` times, `interval` apart.
    pub async fn try_confirm_transaction(&self, trx_id: &str) -> ConfirmationResult {
        let outcome = poll_fixed(self.max_attempts, self.interval, |attempt| {
            self.lookup(trx_id, attempt)
        })
        .await;
        self.finish(trx_id, outcome)
    }

    /// Like [`try_confirm_transaction`](Self::try_confirm_transaction) but stops
    /// as unconfirmed once `shutdown` fires.
    pub async fn try_confirm_until(
        &self,
        trx_id: &str,
        shutdown: broadcast::Receiver<()>,
    ) -> ConfirmationResult {
        let outcome = poll_fixed_until(
            self.max_attempts,
            self.interval,
            |attempt| self.lookup(trx_id, attempt),
            shutdown,
        )
        .await;
        self.finish(trx_id, outcome)
    }

    fn finish(&self, trx_id: &str, outcome: PollOutcome<Value>) -> ConfirmationResult {
        let result = match outcome.value {
            Some(info) => ConfirmationResult {
                confirmed: true,
                error: parse_logs_error(&info),
            },
            None => ConfirmationResult::default(),
        };
        metrics::record_confirmation_attempts(outcome.attempts, result.confirmed);

        if result.confirmed {
            tracing::info!(
                trx_id = %trx_id,
                attempts = outcome.attempts,
                failed = result.error.is_some(),
                "Transaction processed"
            );
        } else {
            tracing::warn!(
                trx_id = %trx_id,
                attempts = outcome.attempts,
                cancelled = outcome.cancelled,
                "Transaction not confirmed"
            );
        }
        result
    }
}

/// First entry of `errors` inside the `logs` JSON string of a transaction info payload.
pub fn parse_logs_error(info: &Value) -> Option<Value> {
    let logs = match info.get("logs") {
        Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
            Ok(logs) => logs,
            Err(e) => {
                tracing::warn!(error = %e, "Unparseable transaction logs");
                return None;
            }
        },
        Some(Value::Object(_)) => info["logs"].clone(),
        _ => return None,
    };

    logs.get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Returns `found` on attempt `found_at`, nothing before.
    struct CountingSource {
        calls: Arc<AtomicU32>,
        found_at: Option<u32>,
        found: Value,
        fail: bool,
    }

    impl CountingSource {
        fn never() -> Self {
            Self {
                calls: Arc::new(AtomicU32::new(0)),
                found_at: None,
                found: Value::Null,
                fail: false,
            }
        }
    }

    impl TransactionSource for CountingSource {
        fn transaction_info(&self, _trx_id: &str) -> impl Future<Output = ApiResult<Option<Value>>> + Send {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            let result = if self.fail {
                Err(ApiError::Request("connection refused".to_string()))
            } else if self.found_at == Some(call) {
                Ok(Some(self.found.clone()))
            } else {
                Ok(None)
            };
            async move { result }
        }
    }

    fn fast_config() -> ConfirmationConfig {
        ConfirmationConfig {
            max_attempts: 20,
            interval_ms: 1,
        }
    }

    #[tokio::test]
    async fn test_makes_exactly_max_attempts_when_nothing_found() {
        let source = CountingSource::never();
        let calls = source.calls.clone();
        let confirmer = TransactionConfirmer::new(source, &fast_config());

        let result = confirmer.try_confirm_transaction("abc").await;
        assert!(!result.confirmed);
        assert_eq!(result.error, None);
        assert_eq!(calls.load(Ordering::SeqCst), 20);
    }

    #[tokio::test]
    async fn test_stops_on_first_result() {
        let source = CountingSource {
            found_at: Some(4),
            found: json!({"transactionId": "abc", "logs": "{\"events\":[]}"}),
            ..CountingSource::never()
        };
        let calls = source.calls.clone();
        let confirmer = TransactionConfirmer::new(source, &fast_config());

        let result = confirmer.try_confirm_transaction("abc").await;
        assert!(result.confirmed);
        assert_eq!(result.error, None);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_reports_logged_error() {
        let source = CountingSource {
            found_at: Some(1),
            found: json!({"logs": "{\"errors\":[\"overdrawn balance\",\"second\"]}"}),
            ..CountingSource::never()
        };
        let confirmer = TransactionConfirmer::new(source, &fast_config());

        let result = confirmer.try_confirm_transaction("abc").await;
        assert!(result.confirmed);
        assert_eq!(result.error, Some(json!("overdrawn balance")));
    }

    #[tokio::test]
    async fn test_lookup_errors_count_as_pending() {
        let source = CountingSource {
            fail: true,
            ..CountingSource::never()
        };
        let calls = source.calls.clone();
        let confirmer = TransactionConfirmer::new(source, &fast_config());

        let result = confirmer.try_confirm_transaction("abc").await;
        assert!(!result.confirmed);
        assert_eq!(calls.load(Ordering::SeqCst), 20);
    }

    #[tokio::test]
    async fn test_cancellable_poll_stops_on_shutdown() {
        let source = CountingSource::never();
        let calls = source.calls.clone();
        let confirmer = TransactionConfirmer::new(
            source,
            &ConfirmationConfig {
                max_attempts: 10_000,
                interval_ms: 5,
            },
        );
        let (tx, rx) = broadcast::channel(1);
        tx.send(()).unwrap();

        let result = confirmer.try_confirm_until("abc", rx).await;
        assert!(!result.confirmed);
        assert!(calls.load(Ordering::SeqCst) < 10_000);
    }

    #[test]
    fn test_parse_logs_error() {
        assert_eq!(
            parse_logs_error(&json!({"logs": "{\"errors\":[\"symbol does not exist\"]}"})),
            Some(json!("symbol does not exist"))
        );
        assert_eq!(parse_logs_error(&json!({"logs": "{\"errors\":[]}"})), None);
        assert_eq!(parse_logs_error(&json!({"logs": "{}"})), None);
        assert_eq!(parse_logs_error(&json!({"logs": "not json"})), None);
        assert_eq!(parse_logs_error(&json!({})), None);
    }
}
