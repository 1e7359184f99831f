//! Event kinds, topics and the wire envelope

use chrono::{SecondsFormat, Utc};
use serde_json::Value;

/// Domain events published through the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Movie,
    User,
    Payment,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Movie, EventKind::User, EventKind::Payment];

    /// Topic the event is published onto
    pub fn topic(&self) -> &'static str {
        match self {
            EventKind::Movie => "events.movie",
            EventKind::User => "events.user",
            EventKind::Payment => "events.payment",
        }
    }

    /// Tag used in payloads and worker logs
    pub fn tag(&self) -> &'static str {
        match self {
            EventKind::Movie => "MOVIE",
            EventKind::User => "USER",
            EventKind::Payment => "PAYMENT",
        }
    }

    /// Consumer group name for this kind's workers
    pub fn consumer_group(&self) -> &'static str {
        match self {
            EventKind::Movie => "movie-workers",
            EventKind::User => "user-workers",
            EventKind::Payment => "payment-workers",
        }
    }
}

/// Stamp a payload with an ISO-8601 timestamp (seconds precision).
///
/// Non-object payloads are wrapped under a `payload` key so the stamp
/// always has somewhere to live.
pub fn envelope(payload: &Value) -> Value {
    let ts = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    let mut message = match payload {
        Value::Object(map) => map.clone(),
        other => {
            let mut map = serde_json::Map::new();
            map.insert("payload".to_string(), other.clone());
            map
        }
    };
    message.insert("ts".to_string(), Value::String(ts));
    Value::Object(message)
}
