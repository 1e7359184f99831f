//! Gateway metric recording
//!
//! Counters are recorded unconditionally; they are dropped unless the
//! Prometheus exporter (`observability::init_metrics`) is installed.

use metrics::counter;

use crate::types::BackendChoice;

/// Record one routed request and the backend it was sent to
pub fn record_routed(group: &str, backend: BackendChoice) {
    counter!(
        "gateway_routed_requests_total",
        "group" => group.to_string(),
        "backend" => backend.as_str()
    )
    .increment(1);
}

/// Record an upstream response that failed the route's status gate
pub fn record_rejected_status(group: &str, status: u16) {
    counter!(
        "gateway_rejected_upstream_statuses_total",
        "group" => group.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}
