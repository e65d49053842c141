//! Metrics collection.
//!
//! # Metrics
//! - `wallet_api_requests_total` (counter): requests by `service`, `outcome`
//! - `wallet_registry_changes_total` (counter): registry mutations by `kind`, `action`
//! - `wallet_confirmation_polls_total` (counter): finished polls by `outcome`
//! - `wallet_confirmation_attempts_total` (counter): individual lookups performed

use metrics::counter;

/// Count one remote request. `outcome` is `ok`, `http_error` or `network_error`.
pub fn record_api_request(service: &'static str, outcome: &'static str) {
    counter!("wallet_api_requests_total", "service" => service, "outcome" => outcome).increment(1);
}

/// Count one registry mutation (`add`, `remove`, `select`).
pub fn record_registry_change(kind: &'static str, action: &'static str) {
    counter!("wallet_registry_changes_total", "kind" => kind, "action" => action).increment(1);
}

pub fn record_confirmation_attempts(attempts: u32, confirmed: bool) {
    let outcome = if confirmed { "confirmed" } else { "unconfirmed" };
    counter!("wallet_confirmation_polls_total", "outcome" => outcome).increment(1);
    counter!("wallet_confirmation_attempts_total").increment(u64::from(attempts));
}
