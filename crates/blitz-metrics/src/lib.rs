//! Metrics collection and Prometheus exporter for blitz-gate.
//!
//! Counts authorization outcomes and decision latency. Rejection causes are
//! deliberately not exported: the engine collapses them before they reach
//! the transport, and a per-cause counter would undo that.

use std::net::SocketAddr;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Initialize Prometheus metrics exporter.
///
/// Starts an HTTP server on the given address to expose metrics.
/// Returns an error message if binding fails.
pub fn init_prometheus(listen: &str) -> Result<(), String> {
    let addr: SocketAddr = listen
        .parse()
        .map_err(|e| format!("invalid metrics listen address: {}", e))?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("failed to install prometheus exporter: {}", e))?;

    Ok(())
}

// ============================================================================
// Metric Names
// ============================================================================

/// Total number of authorization requests received.
pub const AUTH_REQUESTS_TOTAL: &str = "blitz_auth_requests_total";
/// Total number of accepted requests.
pub const AUTH_ACCEPTED_TOTAL: &str = "blitz_auth_accepted_total";
/// Total number of rejected requests.
pub const AUTH_REJECTED_TOTAL: &str = "blitz_auth_rejected_total";
/// Number of requests currently in flight.
pub const AUTH_ACTIVE_REQUESTS: &str = "blitz_auth_active_requests";
/// Decision duration histogram in seconds (includes the mismatch delay,
/// which shows up as a distinct hump at the configured interval).
pub const DECISION_DURATION_SECONDS: &str = "blitz_decision_duration_seconds";
/// Total number of errors by type.
pub const ERRORS_TOTAL: &str = "blitz_errors_total";

// ============================================================================
// Error Type Constants
// ============================================================================

pub const ERROR_IO: &str = "io";
pub const ERROR_CONFIG: &str = "config";
pub const ERROR_AUTH: &str = "auth";

// ============================================================================
// Metric Recording Functions
// ============================================================================

/// Record an authorization request received.
#[inline]
pub fn record_auth_request() {
    counter!(AUTH_REQUESTS_TOTAL).increment(1);
    gauge!(AUTH_ACTIVE_REQUESTS).increment(1.0);
}

/// Record an accepted request.
#[inline]
pub fn record_auth_accepted() {
    counter!(AUTH_ACCEPTED_TOTAL).increment(1);
    gauge!(AUTH_ACTIVE_REQUESTS).decrement(1.0);
}

/// Record a rejected request.
#[inline]
pub fn record_auth_rejected() {
    counter!(AUTH_REJECTED_TOTAL).increment(1);
    gauge!(AUTH_ACTIVE_REQUESTS).decrement(1.0);
}

/// Record decision duration.
#[inline]
pub fn record_decision_duration(duration_secs: f64) {
    histogram!(DECISION_DURATION_SECONDS).record(duration_secs);
}

/// Record an error by type.
#[inline]
pub fn record_error(error_type: &'static str) {
    counter!(ERRORS_TOTAL, "type" => error_type).increment(1);
}
