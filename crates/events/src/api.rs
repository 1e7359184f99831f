//! HTTP surface of the event gateway

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;

use crate::error::EventError;
use crate::publisher::{publish_event, EventPublisher};
use crate::types::EventKind;

/// Shared state behind the event endpoints
pub struct EventsApiState {
    pub publisher: Arc<dyn EventPublisher>,
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Event gateway failure");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"status": "error"})),
        )
            .into_response()
    }
}

/// Build the event gateway router
pub fn create_router(state: Arc<EventsApiState>) -> Router {
    Router::new()
        .route("/api/events/health", get(health))
        .route("/api/events/movie", post(publish_movie))
        .route("/api/events/user", post(publish_user))
        .route("/api/events/payment", post(publish_payment))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": true}))
}

async fn publish_kind(
    state: Arc<EventsApiState>,
    kind: EventKind,
) -> Result<Response, EventError> {
    publish_event(state.publisher.as_ref(), kind).await?;
    Ok((StatusCode::CREATED, Json(json!({"status": "success"}))).into_response())
}

async fn publish_movie(State(state): State<Arc<EventsApiState>>) -> Result<Response, EventError> {
    publish_kind(state, EventKind::Movie).await
}

async fn publish_user(State(state): State<Arc<EventsApiState>>) -> Result<Response, EventError> {
    publish_kind(state, EventKind::User).await
}

async fn publish_payment(State(state): State<Arc<EventsApiState>>) -> Result<Response, EventError> {
    publish_kind(state, EventKind::Payment).await
}
