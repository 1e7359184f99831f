//! In-process event bus
//!
//! A stand-in for the durably replicated log behind the publisher/consumer
//! traits: an append-only per-topic log with committed offsets per
//! (consumer group, topic). Messages are retained for the process lifetime,
//! so a consumer recreated from the same bus resumes from its group's last
//! committed offset and uncommitted messages are redelivered.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::consumer::{ConsumedMessage, EventConsumer};
use crate::error::Result;
use crate::publisher::EventPublisher;

#[derive(Default)]
struct BusInner {
    topics: HashMap<String, Vec<Value>>,
    // (group, topic) -> offset of the next uncommitted message
    committed: HashMap<(String, String), u64>,
}

/// Shared in-process bus; cheap to clone
#[derive(Clone, Default)]
pub struct InProcessBus {
    inner: Arc<Mutex<BusInner>>,
}

impl InProcessBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a consumer for `topic` under `group`, positioned at the
    /// group's committed offset (0 for a new group - earliest retained).
    pub fn consumer(&self, group: &str, topic: &str) -> BusConsumer {
        let position = self.committed_offset(group, topic);
        BusConsumer {
            bus: self.clone(),
            group: group.to_string(),
            topic: topic.to_string(),
            position,
        }
    }

    /// The committed offset for a (group, topic) pair
    pub fn committed_offset(&self, group: &str, topic: &str) -> u64 {
        self.inner
            .lock()
            .committed
            .get(&(group.to_string(), topic.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Number of messages retained for a topic
    pub fn topic_len(&self, topic: &str) -> usize {
        self.inner
            .lock()
            .topics
            .get(topic)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl EventPublisher for InProcessBus {
    async fn publish(&self, topic: &str, payload: Value) -> Result<()> {
        self.inner
            .lock()
            .topics
            .entry(topic.to_string())
            .or_default()
            .push(payload);
        Ok(())
    }
}

/// Consumer over one topic of an [`InProcessBus`]
pub struct BusConsumer {
    bus: InProcessBus,
    group: String,
    topic: String,
    position: u64,
}

#[async_trait]
impl EventConsumer for BusConsumer {
    async fn poll(&mut self) -> Result<Option<ConsumedMessage>> {
        let inner = self.bus.inner.lock();
        let next = inner
            .topics
            .get(&self.topic)
            .and_then(|log| log.get(self.position as usize));

        match next {
            Some(payload) => {
                let message = ConsumedMessage {
                    topic: self.topic.clone(),
                    partition: 0,
                    offset: self.position,
                    payload: payload.clone(),
                };
                self.position += 1;
                Ok(Some(message))
            }
            None => Ok(None),
        }
    }

    async fn commit(&mut self) -> Result<()> {
        self.bus
            .inner
            .lock()
            .committed
            .insert((self.group.clone(), self.topic.clone()), self.position);
        Ok(())
    }
}
