//! Core data types for the routing engine

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode};
use serde_json::Value;

use crate::upstream::UpstreamResponse;

/// Which backend a routing decision selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendChoice {
    /// The legacy monolith
    Monolith,
    /// The resource's replacement service
    NewBackend,
}

impl BackendChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendChoice::Monolith => "monolith",
            BackendChoice::NewBackend => "new_backend",
        }
    }
}

/// Migration parameters attached to a resource group at route-registration
/// time. Immutable after startup.
#[derive(Debug, Clone)]
pub struct MigrationPolicy {
    pub enabled: bool,
    /// Share of traffic to divert, 0-100
    pub percent: u32,
    /// Base URL of the replacement service; required when enabled
    pub new_backend_url: Option<String>,
}

impl MigrationPolicy {
    /// A policy that routes everything to the monolith
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            percent: 0,
            new_backend_url: None,
        }
    }

    /// A live policy diverting `percent` of traffic to `new_backend_url`.
    /// A trailing slash on the URL is trimmed; the request path supplies
    /// its own leading slash.
    pub fn live(new_backend_url: impl Into<String>, percent: u32) -> Self {
        Self {
            enabled: true,
            percent,
            new_backend_url: Some(new_backend_url.into().trim_end_matches('/').to_string()),
        }
    }
}

/// One outbound call, built once per inbound request
#[derive(Debug, Clone)]
pub struct ProxiedRequest {
    pub method: Method,
    /// Path plus any query string, appended verbatim to the base URL
    pub path_and_query: String,
    pub json_body: Option<Value>,
}

/// Headers meaningful only for one transport leg. The serving layer
/// recomputes framing, so forwarding these would corrupt it.
const HOP_BY_HOP_HEADERS: [&str; 3] = ["content-length", "transfer-encoding", "connection"];

/// A sanitized upstream response, ready to serve to the client
#[derive(Debug)]
pub struct ProxiedResponse {
    pub status: StatusCode,
    /// Upstream headers with hop-by-hop entries stripped
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ProxiedResponse {
    /// Build from an upstream response, stripping hop-by-hop headers
    pub fn from_upstream(response: UpstreamResponse) -> Self {
        let mut headers = response.headers;
        for name in HOP_BY_HOP_HEADERS {
            headers.remove(name);
        }

        Self {
            status: response.status,
            headers,
            body: response.body,
        }
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_hop_by_hop_headers_stripped() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        headers.insert("content-length", HeaderValue::from_static("42"));
        headers.insert("transfer-encoding", HeaderValue::from_static("chunked"));
        headers.insert("connection", HeaderValue::from_static("keep-alive"));
        headers.insert("x-request-id", HeaderValue::from_static("abc-123"));

        let response = ProxiedResponse::from_upstream(UpstreamResponse {
            status: StatusCode::OK,
            headers,
            body: Bytes::from_static(b"{}"),
        });

        assert!(response.headers.get("content-length").is_none());
        assert!(response.headers.get("transfer-encoding").is_none());
        assert!(response.headers.get("connection").is_none());
        // Everything else survives
        assert_eq!(response.content_type(), Some("application/json"));
        assert_eq!(
            response.headers.get("x-request-id").unwrap(),
            &HeaderValue::from_static("abc-123")
        );
    }

    #[test]
    fn test_live_policy_trims_trailing_slash() {
        let policy = MigrationPolicy::live("http://movies:9001/", 20);
        assert_eq!(
            policy.new_backend_url.as_deref(),
            Some("http://movies:9001")
        );
    }

    #[test]
    fn test_disabled_policy_shape() {
        let policy = MigrationPolicy::disabled();
        assert!(!policy.enabled);
        assert_eq!(policy.percent, 0);
        assert!(policy.new_backend_url.is_none());
    }
}
