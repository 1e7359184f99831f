//! HTTP server infrastructure for figgate
//!
//! Servers implement the [`Server`] trait, which provides a consistent
//! interface for running and monitoring them. The [`ServerExt`] trait adds
//! convenience methods like `spawn()` and `run_with_ctrl_c()`.
//!
//! Shutdown coordination uses `CancellationToken` from `tokio_util`;
//! cancelling a parent token cancels all child tokens, so one
//! [`ShutdownController`] can drain an arbitrary set of servers and workers.
//!
//! # Quick Start
//!
//! ```ignore
//! use server::{HttpServer, ServerConfig, ServerExt};
//!
//! let config = ServerConfig::new("0.0.0.0", 8080);
//! let server = HttpServer::new(config, my_router);
//! server.run_with_ctrl_c().await?;
//! ```

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod shutdown;
pub mod traits;

pub use config::{ports, ServerConfig};
pub use error::{Result, ServerError};
pub use health::simple_health_handler;
pub use http::HttpServer;
pub use shutdown::{shutdown_signal, ShutdownController};
pub use traits::{Server, ServerExt};
