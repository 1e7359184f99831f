//! Gateway error taxonomy

use axum::http::StatusCode;
use thiserror::Error;

/// Errors raised while routing and forwarding a request
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Required setting missing or malformed; fatal at startup
    #[error("Configuration error: {0}")]
    Config(String),

    /// Upstream answered with a status outside the route's allowed set.
    /// The body is the upstream's response text, relayed verbatim.
    #[error("Upstream returned status {status}")]
    UpstreamStatus { status: StatusCode, body: String },

    /// Connection, DNS or timeout failure reaching an upstream. Never
    /// caught in the forwarding engine; the serving layer maps it to a
    /// generic server error.
    #[error("Upstream transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Inbound JSON body could not be parsed; rejected before any upstream
    /// call or counter mutation
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Query parameter failed validation on a route that interprets it;
    /// rejected before any upstream call or counter mutation
    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),
}

/// Result type for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;
