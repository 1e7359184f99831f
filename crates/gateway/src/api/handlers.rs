//! Generic dispatch handlers
//!
//! Each registered route carries its index into the route table; the
//! handlers look the row up and hand the call to the forwarding engine.

use axum::body::Bytes;
use axum::extract::{Query, State};
use std::sync::Arc;

use crate::api::models::IdParams;
use crate::api::GatewayState;
use crate::error::{GatewayError, Result};
use crate::types::{ProxiedRequest, ProxiedResponse};

/// Dispatch a GET route. The `id` query parameter is appended only when the
/// route accepts it and the caller supplied one; on other routes stray
/// query input is ignored. A non-numeric `id` on an accepting route is
/// rejected with 400 before any routing state is touched.
pub async fn dispatch_get(
    State(state): State<Arc<GatewayState>>,
    route: usize,
    Query(params): Query<IdParams>,
) -> Result<ProxiedResponse> {
    let spec = &state.table.routes()[route];

    let path_and_query = match params.id.filter(|_| spec.accepts_id) {
        Some(raw) => {
            let id: u64 = raw
                .parse()
                .map_err(|_| GatewayError::InvalidQuery(format!("id must be numeric: {}", raw)))?;
            format!("{}?id={}", spec.path, id)
        }
        None => spec.path.clone(),
    };

    let request = ProxiedRequest {
        method: spec.method.clone(),
        path_and_query,
        json_body: None,
    };

    state.forwarder.forward(spec, request).await
}

/// Dispatch a creation POST route. The body must parse as JSON before any
/// routing state is touched; a malformed body never consumes a cadence slot.
pub async fn dispatch_create(
    State(state): State<Arc<GatewayState>>,
    route: usize,
    body: Bytes,
) -> Result<ProxiedResponse> {
    let payload: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| GatewayError::MalformedBody(e.to_string()))?;

    let spec = &state.table.routes()[route];

    let request = ProxiedRequest {
        method: spec.method.clone(),
        path_and_query: spec.path.clone(),
        json_body: Some(payload),
    };

    state.forwarder.forward(spec, request).await
}
