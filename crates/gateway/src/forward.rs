//! The forwarding engine
//!
//! Full pipeline for one proxied call: routing decision, outbound request,
//! status gate, header sanitization. No retries, no caching, no timeout
//! beyond the transport default.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::counters::CutoverCounters;
use crate::decision::decide;
use crate::error::{GatewayError, Result};
use crate::metrics;
use crate::table::{RouteSpec, RouteTable};
use crate::types::{BackendChoice, ProxiedRequest, ProxiedResponse};
use crate::upstream::UpstreamClient;

/// Routes one request to exactly one backend and relays the result.
///
/// Owns the cutover counters: constructing a fresh `Forwarder` (one per
/// process, or one per test) resets every cadence to zero.
pub struct Forwarder {
    monolith_url: String,
    counters: CutoverCounters,
    upstream: Arc<dyn UpstreamClient>,
}

impl Forwarder {
    pub fn new(table: &RouteTable, upstream: Arc<dyn UpstreamClient>) -> Self {
        Self {
            monolith_url: table.monolith_url().to_string(),
            counters: CutoverCounters::new(table.groups()),
            upstream,
        }
    }

    /// The counters this forwarder owns, for inspection in tests
    pub fn counters(&self) -> &CutoverCounters {
        &self.counters
    }

    /// Forward `request` along the given route.
    ///
    /// The routing decision (and its counter mutation) happens before the
    /// network call, so a failed forward still consumes a cadence slot: the
    /// counter is never rolled back.
    pub async fn forward(
        &self,
        spec: &RouteSpec,
        request: ProxiedRequest,
    ) -> Result<ProxiedResponse> {
        let choice = decide(&self.counters, &spec.group, &spec.policy);

        let base_url = match choice {
            BackendChoice::NewBackend => {
                spec.policy.new_backend_url.as_deref().ok_or_else(|| {
                    GatewayError::Config(format!(
                        "group '{}' is enabled for migration but has no backend URL",
                        spec.group
                    ))
                })?
            }
            BackendChoice::Monolith => self.monolith_url.as_str(),
        };

        let url = format!("{}{}", base_url, request.path_and_query);

        debug!(
            group = %spec.group,
            backend = choice.as_str(),
            method = %request.method,
            %url,
            "Forwarding request"
        );
        metrics::record_routed(&spec.group, choice);

        let response = self
            .upstream
            .request(request.method, &url, request.json_body.as_ref())
            .await?;

        if !spec.ok_statuses.contains(&response.status) {
            let body = String::from_utf8_lossy(&response.body).into_owned();
            warn!(
                group = %spec.group,
                status = response.status.as_u16(),
                "Upstream status outside allowed set"
            );
            metrics::record_rejected_status(&spec.group, response.status.as_u16());
            return Err(GatewayError::UpstreamStatus {
                status: response.status,
                body,
            });
        }

        Ok(ProxiedResponse::from_upstream(response))
    }
}
