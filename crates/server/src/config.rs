//! Server configuration and default port constants

use crate::error::{Result, ServerError};
use std::net::SocketAddr;

/// Default port assignments for each figgate service
pub mod ports {
    /// Routing gateway HTTP port
    pub const GATEWAY_HTTP: u16 = 8080;
    /// Event gateway HTTP port
    pub const EVENTS_HTTP: u16 = 8081;
    /// Prometheus metrics exporter port
    pub const METRICS: u16 = 9090;

    /// Get the default HTTP port for a service by name
    pub fn for_service(name: &str) -> u16 {
        match name.to_lowercase().as_str() {
            "events" => EVENTS_HTTP,
            _ => GATEWAY_HTTP,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Default configuration for a named service, bound on all interfaces
    pub fn for_service(name: &str) -> Self {
        Self::new("0.0.0.0", ports::for_service(name))
    }

    /// Resolve the bind address
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ServerError::InvalidAddress(format!("{}:{}", self.host, self.port)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr() {
        let config = ServerConfig::new("127.0.0.1", 8080);
        assert_eq!(config.bind_addr().unwrap().port(), 8080);

        let bad = ServerConfig::new("not a host", 8080);
        assert!(bad.bind_addr().is_err());
    }

    #[test]
    fn test_service_defaults() {
        assert_eq!(ServerConfig::for_service("gateway").port, ports::GATEWAY_HTTP);
        assert_eq!(ServerConfig::for_service("events").port, ports::EVENTS_HTTP);
    }
}
