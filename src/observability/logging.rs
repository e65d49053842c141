//! Structured logging.
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured level
//! - Logs go to stderr so command output on stdout stays parseable

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default directive when neither `RUST_LOG` nor the config provide one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Build the filter: `RUST_LOG` if set, otherwise `hive_wallet=<level>`.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if level.trim().is_empty() {
            DEFAULT_LOG_LEVEL
        } else {
            level
        };
        EnvFilter::new(format!("hive_wallet={}", level))
    })
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(build_filter(level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
