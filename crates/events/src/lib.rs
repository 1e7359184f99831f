//! Event gateway for figgate
//!
//! HTTP endpoints publish domain events onto named topics; background
//! workers consume them with commit-after-process semantics (at-least-once,
//! not exactly-once). The broker itself stays behind the
//! [`EventPublisher`]/[`EventConsumer`] traits; [`InProcessBus`] is the
//! in-tree implementation.

pub mod api;
pub mod bus;
pub mod consumer;
pub mod error;
pub mod publisher;
pub mod types;

pub use bus::{BusConsumer, InProcessBus};
pub use consumer::{run_consumer, ConsumedMessage, EventConsumer};
pub use error::{EventError, Result};
pub use publisher::{publish_event, EventPublisher, MockEventPublisher};
pub use types::{envelope, EventKind};
