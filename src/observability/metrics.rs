//! Metrics collection and exposition.
//!
//! # Metrics
//! - `error_pages_responses_total` (counter): served pages by status, page
//! - `error_pages_not_found_total` (counter): requests with no matching page
//! - `error_pages_fallbacks_total` (counter): format/status fallbacks by kind

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder with its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a served error page.
pub fn record_response(status: u16, page: &str) {
    counter!(
        "error_pages_responses_total",
        "status" => status.to_string(),
        "page" => page.to_string()
    )
    .increment(1);
}

/// Record a request answered with a bare 404.
pub fn record_not_found() {
    counter!("error_pages_not_found_total").increment(1);
}

/// Record a per-request fallback (`format` or `status`).
pub fn record_fallback(kind: &'static str) {
    counter!("error_pages_fallbacks_total", "kind" => kind).increment(1);
}
