//! Metrics collection and exposition.
//!
//! # Metrics
//! - `forwarder_requests_total` (counter): requests seen by the forwarder, by outcome
//! - `forwarder_http_requests_total` (counter): requests served in `serve` mode, by status
//!
//! Without an installed recorder every update is a no-op, which is the case
//! for `handle` mode.

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::forwarder::ForwardOutcome;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_forward(outcome: ForwardOutcome) {
    counter!("forwarder_requests_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_http_request(status: u16) {
    counter!("forwarder_http_requests_total", "status" => status.to_string()).increment(1);
}
