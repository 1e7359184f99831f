//! Event publisher - trait and implementations

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::info;

use crate::error::Result;
use crate::types::{envelope, EventKind};

/// Acknowledged publish onto a named topic.
///
/// `publish` returns only once the message is durably accepted by the
/// backing log; callers may treat a returned `Ok` as a delivery guarantee.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, topic: &str, payload: Value) -> Result<()>;
}

/// Publish one domain event: stamp the envelope, send, log.
pub async fn publish_event(publisher: &dyn EventPublisher, kind: EventKind) -> Result<()> {
    let payload = envelope(&json!({ "event": kind.tag() }));
    publisher.publish(kind.topic(), payload.clone()).await?;
    info!(topic = kind.topic(), %payload, "Published event");
    Ok(())
}

// ==================== Mock Implementation ====================

/// Mock publisher for testing; records every send
pub struct MockEventPublisher {
    sent: parking_lot::Mutex<Vec<(String, Value)>>,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self {
            sent: parking_lot::Mutex::new(Vec::new()),
        }
    }

    /// Messages sent so far as (topic, payload) pairs
    pub fn sent(&self) -> Vec<(String, Value)> {
        self.sent.lock().clone()
    }
}

impl Default for MockEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, topic: &str, payload: Value) -> Result<()> {
        self.sent.lock().push((topic.to_string(), payload));
        Ok(())
    }
}
