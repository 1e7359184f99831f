//! Graceful shutdown coordination using CancellationToken
//!
//! Tokens can be cloned and shared across tasks, and child tokens are
//! cancelled when the parent is cancelled, so one controller can drive the
//! shutdown of servers and background workers alike.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Coordinates graceful shutdown across multiple components.
///
/// # Example
///
/// ```ignore
/// let shutdown = ShutdownController::with_ctrl_c();
///
/// let (server_handle, _) = tokio::spawn(server.run(shutdown.child_token()));
/// tokio::spawn(worker(shutdown.child_token()));
///
/// shutdown.wait_for_shutdown().await;
/// ```
#[derive(Clone)]
pub struct ShutdownController {
    token: CancellationToken,
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownController {
    /// Create a new shutdown controller
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Create a controller that cancels its token when Ctrl+C is received
    pub fn with_ctrl_c() -> Self {
        let controller = Self::new();
        let token = controller.token.clone();

        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C, initiating graceful shutdown...");
                    token.cancel();
                }
                Err(e) => {
                    warn!("Failed to listen for Ctrl+C: {}", e);
                }
            }
        });

        controller
    }

    /// Get a child token, cancelled when this controller is cancelled.
    /// Child tokens can also be cancelled independently.
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }

    /// Get a clone of the main token
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Trigger shutdown manually
    pub fn shutdown(&self) {
        info!("Manual shutdown triggered");
        self.token.cancel();
    }

    /// Check if shutdown has been triggered
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait for shutdown to be triggered (either Ctrl+C or manual)
    pub async fn wait_for_shutdown(&self) {
        self.token.cancelled().await;
    }
}

/// Create a shutdown signal that listens for Ctrl+C
pub fn shutdown_signal() -> CancellationToken {
    ShutdownController::with_ctrl_c().token()
}
