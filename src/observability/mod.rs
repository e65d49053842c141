//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! api / rpc / tokens:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters via the metrics facade)
//!
//! Consumers:
//!     → stderr (fmt layer, filtered by RUST_LOG or config)
//!     → whichever metrics recorder the embedding process installs
//! ```
//!
//! # Design Decisions
//! - Structured fields, never formatted strings, for identifiers
//! - No recorder is installed here; counters are no-ops until one is

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
