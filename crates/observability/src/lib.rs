//! Observability infrastructure for figgate
//!
//! This crate provides:
//! - Structured logging via tracing
//! - An optional Prometheus metrics exporter
//!
//! # Quick Start
//!
//! ```ignore
//! use observability::{init_logging, LogFormat};
//!
//! init_logging("gateway", LogFormat::Pretty)?;
//! tracing::info!("Service started");
//! ```

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LogFormat};
pub use metrics::init_metrics;
