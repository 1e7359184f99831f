//! Configuration for figgate
//!
//! The configuration is a single YAML file, loaded once at startup and never
//! reloaded. `${VAR}` / `$VAR` placeholders are substituted from the
//! environment before parsing. Unknown keys are ignored, not rejected, so a
//! config file can be shared between gateway versions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod defaults;
pub mod parser;
pub mod substitution;
pub mod validator;

pub use defaults::*;
pub use parser::*;
pub use substitution::*;
pub use validator::*;

/// Top-level configuration file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FiggateConfig {
    pub gateway: GatewaySection,
    #[serde(default)]
    pub events: EventsSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Routing gateway settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewaySection {
    /// Listening port for the gateway HTTP surface
    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// Base URL of the legacy monolith; every route can reach it
    pub monolith_url: String,

    /// Global switch for gradual migration. When off, every resource is
    /// routed to the monolith regardless of the per-resource entries below.
    #[serde(default)]
    pub gradual_migration: bool,

    /// Per-resource migration targets, keyed by resource group name.
    /// Resources absent from this map always go to the monolith.
    #[serde(default)]
    pub migrations: BTreeMap<String, MigrationTarget>,
}

/// Migration parameters for one resource group
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MigrationTarget {
    /// Base URL of the replacement service
    pub service_url: String,

    /// Share of traffic to divert, 0-100
    #[serde(default)]
    pub percent: u32,
}

/// Event gateway settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventsSection {
    /// Listening port for the event gateway HTTP surface
    #[serde(default = "default_events_port")]
    pub port: u16,

    /// Broker bootstrap address, passed through to the publisher/consumer
    /// implementation
    #[serde(default = "default_brokers")]
    pub brokers: String,
}

impl Default for EventsSection {
    fn default() -> Self {
        Self {
            port: default_events_port(),
            brokers: default_brokers(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSection {
    /// Output format: pretty, json or compact
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            format: default_log_format(),
        }
    }
}
