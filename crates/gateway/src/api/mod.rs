//! HTTP surface of the routing gateway
//!
//! One generic dispatcher serves every row of the route table; there are no
//! per-resource handlers. This module is also the top-level fault boundary:
//! `GatewayError` decides here what the client sees.

pub mod handlers;
pub mod models;
pub mod routes;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::error::GatewayError;
use crate::forward::Forwarder;
use crate::table::RouteTable;
use crate::types::ProxiedResponse;

pub use routes::create_router;

/// Shared state behind the dispatcher
pub struct GatewayState {
    pub table: RouteTable,
    pub forwarder: Forwarder,
}

impl GatewayState {
    pub fn new(table: RouteTable, upstream: Arc<dyn crate::upstream::UpstreamClient>) -> Self {
        let forwarder = Forwarder::new(&table, upstream);
        Self { table, forwarder }
    }
}

impl IntoResponse for ProxiedResponse {
    fn into_response(self) -> Response {
        (self.status, self.headers, self.body).into_response()
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            // Relay the upstream's status and body as-is, no translation
            GatewayError::UpstreamStatus { status, body } => (status, body).into_response(),
            GatewayError::MalformedBody(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            GatewayError::InvalidQuery(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            GatewayError::Transport(e) => {
                tracing::error!(error = %e, "Upstream transport failure");
                (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response()
            }
            GatewayError::Config(msg) => {
                tracing::error!(%msg, "Gateway misconfiguration");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
        }
    }
}
