//! Upstream client - trait and implementations
//!
//! The outbound HTTP call sits behind a trait so the forwarding engine can
//! be tested against scripted statuses and bodies without network I/O.

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use serde_json::Value;

use crate::error::Result;

/// Raw upstream response: status, headers and the full body
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Client for one outbound HTTP request
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Issue a single request and return the upstream's full response.
    ///
    /// Transport failures (connection refused, DNS) surface as
    /// [`GatewayError::Transport`](crate::GatewayError::Transport); upstream
    /// status codes are NOT interpreted here.
    async fn request(
        &self,
        method: Method,
        url: &str,
        json: Option<&Value>,
    ) -> Result<UpstreamResponse>;
}

// ==================== HTTP Implementation ====================

/// Reqwest-backed upstream client.
///
/// The inner client pools connections across calls; the contract does not
/// require it, but there is no reason to rebuild a session per request.
pub struct HttpUpstreamClient {
    client: reqwest::Client,
}

impl HttpUpstreamClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpUpstreamClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    async fn request(
        &self,
        method: Method,
        url: &str,
        json: Option<&Value>,
    ) -> Result<UpstreamResponse> {
        let mut request = self.client.request(method, url);
        if let Some(body) = json {
            request = request.json(body);
        }

        let response = request.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}

// ==================== Mock Implementation ====================

/// One recorded call made through the mock
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub url: String,
    pub json: Option<Value>,
}

/// Mock upstream client for testing.
///
/// Responses are scripted with `push_response`; when the script runs out,
/// the mock answers 200 with an empty JSON object. Every call is recorded.
pub struct MockUpstreamClient {
    responses: std::sync::Mutex<std::collections::VecDeque<UpstreamResponse>>,
    calls: std::sync::Mutex<Vec<RecordedCall>>,
}

impl MockUpstreamClient {
    pub fn new() -> Self {
        Self {
            responses: std::sync::Mutex::new(std::collections::VecDeque::new()),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Queue a response with the given status and body
    pub fn push_response(&self, status: StatusCode, body: &str) {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        self.push_raw(UpstreamResponse {
            status,
            headers,
            body: Bytes::copy_from_slice(body.as_bytes()),
        });
    }

    /// Queue a fully specified response
    pub fn push_raw(&self, response: UpstreamResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Calls recorded so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn default_response() -> UpstreamResponse {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        UpstreamResponse {
            status: StatusCode::OK,
            headers,
            body: Bytes::from_static(b"{}"),
        }
    }
}

impl Default for MockUpstreamClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamClient for MockUpstreamClient {
    async fn request(
        &self,
        method: Method,
        url: &str,
        json: Option<&Value>,
    ) -> Result<UpstreamResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            url: url.to_string(),
            json: json.cloned(),
        });

        let scripted = self.responses.lock().unwrap().pop_front();
        Ok(scripted.unwrap_or_else(Self::default_response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_calls_in_order() {
        let mock = MockUpstreamClient::new();

        mock.request(Method::GET, "http://mono:9000/api/movies", None)
            .await
            .unwrap();
        mock.request(
            Method::POST,
            "http://mono:9000/api/movies",
            Some(&serde_json::json!({"title": "Alien"})),
        )
        .await
        .unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].method, Method::GET);
        assert_eq!(calls[1].json, Some(serde_json::json!({"title": "Alien"})));
    }

    #[tokio::test]
    async fn test_mock_scripted_then_default() {
        let mock = MockUpstreamClient::new();
        mock.push_response(StatusCode::CREATED, r#"{"id": 7}"#);

        let first = mock
            .request(Method::POST, "http://mono:9000/api/movies", None)
            .await
            .unwrap();
        assert_eq!(first.status, StatusCode::CREATED);
        assert_eq!(&first.body[..], br#"{"id": 7}"#);

        let second = mock
            .request(Method::GET, "http://mono:9000/api/movies", None)
            .await
            .unwrap();
        assert_eq!(second.status, StatusCode::OK);
    }
}
