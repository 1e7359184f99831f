//! Event consumer - trait and the worker loop

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::Result;

/// One message delivered from a topic
#[derive(Debug, Clone)]
pub struct ConsumedMessage {
    pub topic: String,
    pub partition: u32,
    pub offset: u64,
    pub payload: Value,
}

/// Reads messages for one topic under a named consumer group, starting from
/// the earliest retained offset.
///
/// Offsets are committed explicitly, after processing. A crash between
/// delivery and commit causes redelivery on the next start - at-least-once,
/// not exactly-once.
#[async_trait]
pub trait EventConsumer: Send {
    /// Next undelivered message, or `None` when the log is exhausted
    async fn poll(&mut self) -> Result<Option<ConsumedMessage>>;

    /// Commit everything delivered so far
    async fn commit(&mut self) -> Result<()>;
}

/// Worker loop: poll, process (log), then commit, until shutdown.
pub async fn run_consumer<C: EventConsumer>(
    mut consumer: C,
    tag: &str,
    shutdown: CancellationToken,
) -> Result<()> {
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!(tag, "Consumer worker stopping");
                return Ok(());
            }
            message = consumer.poll() => match message? {
                Some(message) => {
                    info!(
                        tag,
                        topic = %message.topic,
                        partition = message.partition,
                        offset = message.offset,
                        payload = %message.payload,
                        "Consumed event"
                    );
                    // Commit strictly after processing
                    consumer.commit().await?;
                }
                None => tokio::time::sleep(Duration::from_millis(50)).await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::InProcessBus;
    use crate::publisher::EventPublisher;
    use serde_json::json;

    #[tokio::test]
    async fn test_run_consumer_drains_and_commits() {
        let bus = InProcessBus::new();
        bus.publish("events.movie", json!({"event": "MOVIE"}))
            .await
            .unwrap();
        bus.publish("events.movie", json!({"event": "MOVIE"}))
            .await
            .unwrap();

        let consumer = bus.consumer("movie-workers", "events.movie");
        let shutdown = CancellationToken::new();

        let handle = tokio::spawn(run_consumer(consumer, "MOVIE", shutdown.clone()));

        // Let the worker drain the log, then stop it
        tokio::time::sleep(Duration::from_millis(100)).await;
        shutdown.cancel();
        handle.await.unwrap().unwrap();

        assert_eq!(bus.committed_offset("movie-workers", "events.movie"), 2);
    }
}
