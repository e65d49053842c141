//! Fixed-interval polling.
//!
//! # Responsibilities
//! - Repeat a lookup a bounded number of times with a constant delay
//! - Stop at the first attempt that yields a value
//! - Optionally stop when a shutdown signal arrives

use std::future::Future;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::broadcast;
use tokio::time::sleep;

/// Result of a polling run.
#[derive(Debug, Clone, PartialEq)]
pub struct PollOutcome<T> {
    /// First value produced, if any.
    pub value: Option<T>,
    /// Lookups actually performed.
    pub attempts: u32,
    /// The run was interrupted by a shutdown signal.
    pub cancelled: bool,
}

/// Wait `interval`, call `lookup`, repeat up to `max_attempts` times.
pub async fn poll_fixed<T, F, Fut>(max_attempts: u32, interval: Duration, mut lookup: F) -> PollOutcome<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let mut attempts = 0;
    while attempts < max_attempts {
        sleep(interval).await;
        attempts += 1;
        if let Some(value) = lookup(attempts).await {
            return PollOutcome {
                value: Some(value),
                attempts,
                cancelled: false,
            };
        }
    }
    PollOutcome {
        value: None,
        attempts,
        cancelled: false,
    }
}

/// Same as [`poll_fixed`] but gives up as soon as `shutdown` fires.
pub async fn poll_fixed_until<T, F, Fut>(
    max_attempts: u32,
    interval: Duration,
    lookup: F,
    mut shutdown: broadcast::Receiver<()>,
) -> PollOutcome<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let attempts = std::sync::atomic::AtomicU32::new(0);
    let mut lookup = lookup;
    let counted = |n: u32| {
        attempts.store(n, std::sync::atomic::Ordering::Relaxed);
        lookup(n)
    };

    tokio::select! {
        outcome = poll_fixed(max_attempts, interval, counted) => outcome,
        _ = shutdown_requested(&mut shutdown) => {
            let attempts = attempts.load(std::sync::atomic::Ordering::Relaxed);
            tracing::debug!(attempts, "Polling cancelled");
            PollOutcome { value: None, attempts, cancelled: true }
        }
    }
}

/// Resolves once a shutdown is sent. A closed channel can never deliver one,
/// so it never resolves.
async fn shutdown_requested(shutdown: &mut broadcast::Receiver<()>) {
    match shutdown.recv().await {
        Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {}
        Err(broadcast::error::RecvError::Closed) => std::future::pending().await,
    }
}

const TIME_REFERENCE_MS: u128 = 1_643_236_071_000;

/// Delay before refreshing balances after a broadcast, at unix time `now_ms`.
pub fn refresh_delay_at(now_ms: u128) -> Duration {
    let ms = ((now_ms.saturating_sub(TIME_REFERENCE_MS) % 3) * 1000 + 100).min(3000);
    Duration::from_millis(ms as u64)
}

/// Sleep for [`refresh_delay_at`] the current time.
pub async fn delay_refresh() {
    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    sleep(refresh_delay_at(now_ms)).await;
}
