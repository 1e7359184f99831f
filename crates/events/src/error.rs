//! Event gateway error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EventError {
    #[error("Publish failed: {0}")]
    Publish(String),

    #[error("Consume failed: {0}")]
    Consume(String),
}

/// Result type for event gateway operations
pub type Result<T> = std::result::Result<T, EventError>;
