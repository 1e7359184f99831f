//! Strangler-fig routing and forwarding engine
//!
//! A routing layer sits in front of a legacy monolith and its replacement
//! services. For resources under migration, a deterministic counter cadence
//! diverts a configured percentage of traffic to the new service; everything
//! else reaches the monolith unchanged. Clients see one stable API.
//!
//! # Architecture
//!
//! - [`table`] - declarative route table: data, not behavior
//! - [`counters`] - per-group cutover counters owned by the forwarder
//! - [`decision`] - the counter-cadence backend choice
//! - [`upstream`] - the outbound HTTP client behind a trait
//! - [`forward`] - forwarding engine: decide, call, sanitize
//! - [`api`] - one generic axum dispatcher consuming the table

pub mod api;
pub mod counters;
pub mod decision;
pub mod error;
pub mod forward;
pub mod metrics;
pub mod table;
pub mod types;
pub mod upstream;

pub use counters::CutoverCounters;
pub use decision::decide;
pub use error::{GatewayError, Result};
pub use forward::Forwarder;
pub use table::{RouteSpec, RouteTable};
pub use types::{BackendChoice, MigrationPolicy, ProxiedRequest, ProxiedResponse};
pub use upstream::{HttpUpstreamClient, MockUpstreamClient, UpstreamClient, UpstreamResponse};
