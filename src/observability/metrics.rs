//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define contract call and refresh metrics
//! - Optionally expose a Prometheus-compatible scrape endpoint
//!
//! # Metrics
//! - `contract_calls_total` (counter): calls by entry point and outcome
//! - `contract_call_duration_seconds` (histogram): submit-to-acceptance latency
//! - `inventory_refresh_total` (counter): refresh attempts by outcome
//! - `inventory_refresh_last_success_timestamp` (gauge): unix seconds
//!
//! Without an installed exporter every update is a no-op.

use std::net::SocketAddr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within the tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

fn outcome(success: bool) -> &'static str {
    if success {
        "success"
    } else {
        "failure"
    }
}

/// Record one contract call.
pub fn record_contract_call(entrypoint: &'static str, success: bool, elapsed: Duration) {
    metrics::counter!(
        "contract_calls_total",
        "entrypoint" => entrypoint,
        "outcome" => outcome(success)
    )
    .increment(1);
    metrics::histogram!("contract_call_duration_seconds", "entrypoint" => entrypoint)
        .record(elapsed.as_secs_f64());
}

/// Record one refresh attempt.
pub fn record_refresh(success: bool) {
    metrics::counter!("inventory_refresh_total", "outcome" => outcome(success)).increment(1);

    if success {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64();
        metrics::gauge!("inventory_refresh_last_success_timestamp").set(now);
    }
}
