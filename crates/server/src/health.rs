//! Liveness handler for infrastructure surfaces
//!
//! The routing gateway's own `/health` is a proxied route (see
//! `gateway::table`); this handler is for servers that answer locally, such
//! as the event gateway.

use axum::response::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// Simple health handler without state
pub async fn simple_health_handler() -> Json<Value> {
    Json(json!({
        "status": true,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
