//! Prometheus metrics exporter
//!
//! Service-specific metric sets live next to the code that records them
//! (see `gateway::metrics`); this module only owns the exporter itself.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Start the Prometheus exporter on the given port.
///
/// Metrics become available at `http://0.0.0.0:{port}/metrics`. Calling
/// this is optional; recorded metrics are dropped when no exporter is
/// installed.
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    tracing::info!(%addr, "Metrics exporter listening");
    Ok(())
}
