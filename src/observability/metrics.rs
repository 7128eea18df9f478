//! Metrics collection and exposition.
//!
//! # Metrics
//! - `triage_requests_total` (counter): handled requests by method, status
//! - `triage_request_duration_seconds` (histogram): latency distribution
//! - `triage_rate_limited_total` (counter): admission rejections by scope
//! - `triage_geocoder_fallback_total` (counter): lookups served from fallback

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(error) => tracing::error!(error = %error, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    counter!(
        "triage_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("triage_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record an admission-control rejection.
pub fn record_rate_limited(scope: &'static str) {
    counter!("triage_rate_limited_total", "scope" => scope).increment(1);
}

/// Record a facility lookup served from the fallback list.
pub fn record_geocoder_fallback() {
    counter!("triage_geocoder_fallback_total").increment(1);
}
