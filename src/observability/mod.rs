//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! client / inventory services produce:
//!     → logging.rs (structured log events to stderr)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Operator terminal or log collector
//!     → Metrics endpoint (Prometheus scrape, refresher only)
//! ```

pub mod logging;
pub mod metrics;
