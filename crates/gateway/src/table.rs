//! The route table: inbound API surface as plain data
//!
//! Routing rules live in an inspectable table consumed by one generic
//! dispatcher (see [`crate::api`]), so they can be tested without spinning
//! up an HTTP server. The table is built once at startup and never changes.

use axum::http::{Method, StatusCode};
use std::collections::BTreeSet;

use crate::types::MigrationPolicy;
use config::GatewaySection;

/// The resources exposed through the gateway. Each gets a GET and a
/// creation POST route; migration is opt-in per resource through the
/// configuration's migration map.
pub const RESOURCES: [&str; 4] = ["movies", "users", "payments", "subscriptions"];

/// One row of the route table
#[derive(Debug, Clone)]
pub struct RouteSpec {
    pub method: Method,
    /// Inbound path, also the upstream path
    pub path: String,
    /// Resource group owning the cutover counter for this route
    pub group: String,
    /// Whether an `?id=` query parameter is accepted and appended
    pub accepts_id: bool,
    /// Upstream statuses considered successful for this route
    pub ok_statuses: Vec<StatusCode>,
    pub policy: MigrationPolicy,
}

impl RouteSpec {
    fn get(path: impl Into<String>, group: impl Into<String>, policy: MigrationPolicy) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            group: group.into(),
            accepts_id: true,
            ok_statuses: vec![StatusCode::OK],
            policy,
        }
    }

    fn create(path: impl Into<String>, group: impl Into<String>, policy: MigrationPolicy) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            group: group.into(),
            accepts_id: false,
            ok_statuses: vec![StatusCode::OK, StatusCode::CREATED],
            policy,
        }
    }
}

/// Static mapping from (verb, path) to resource group, allowed statuses and
/// migration parameters
#[derive(Debug)]
pub struct RouteTable {
    monolith_url: String,
    routes: Vec<RouteSpec>,
}

impl RouteTable {
    /// Build the gateway's full surface from configuration.
    ///
    /// `/health` is always proxied to the monolith. A resource gets a live
    /// policy only when the global migration switch is on and the resource
    /// appears in the migration map; everything else is wired disabled.
    pub fn from_config(config: &GatewaySection) -> Self {
        let mut routes = Vec::with_capacity(RESOURCES.len() * 2 + 1);

        let mut health = RouteSpec::get("/health", "health", MigrationPolicy::disabled());
        health.accepts_id = false;
        routes.push(health);

        for resource in RESOURCES {
            let policy = if config.gradual_migration {
                config
                    .migrations
                    .get(resource)
                    .map(|target| MigrationPolicy::live(&target.service_url, target.percent))
                    .unwrap_or_else(MigrationPolicy::disabled)
            } else {
                MigrationPolicy::disabled()
            };

            let path = format!("/api/{}", resource);
            routes.push(RouteSpec::get(&path, resource, policy.clone()));
            routes.push(RouteSpec::create(&path, resource, policy));
        }

        Self {
            monolith_url: config.monolith_url.trim_end_matches('/').to_string(),
            routes,
        }
    }

    pub fn monolith_url(&self) -> &str {
        &self.monolith_url
    }

    pub fn routes(&self) -> &[RouteSpec] {
        &self.routes
    }

    /// All resource groups named by the table, for counter construction
    pub fn groups(&self) -> BTreeSet<String> {
        self.routes.iter().map(|r| r.group.clone()).collect()
    }

    /// Look up the route for an inbound (verb, path) pair
    pub fn find(&self, method: &Method, path: &str) -> Option<&RouteSpec> {
        self.routes
            .iter()
            .find(|r| r.method == *method && r.path == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::MigrationTarget;
    use std::collections::BTreeMap;

    fn section(gradual_migration: bool) -> GatewaySection {
        GatewaySection {
            port: 8080,
            monolith_url: "http://localhost:9000/".to_string(),
            gradual_migration,
            migrations: BTreeMap::from([(
                "movies".to_string(),
                MigrationTarget {
                    service_url: "http://localhost:9001".to_string(),
                    percent: 20,
                },
            )]),
        }
    }

    #[test]
    fn test_only_designated_resource_is_live() {
        let table = RouteTable::from_config(&section(true));

        let movies = table.find(&Method::GET, "/api/movies").unwrap();
        assert!(movies.policy.enabled);
        assert_eq!(movies.policy.percent, 20);
        assert_eq!(
            movies.policy.new_backend_url.as_deref(),
            Some("http://localhost:9001")
        );

        for resource in ["users", "payments", "subscriptions"] {
            let spec = table.find(&Method::GET, &format!("/api/{}", resource)).unwrap();
            assert!(!spec.policy.enabled, "{} should be disabled", resource);
        }
    }

    #[test]
    fn test_global_switch_off_disables_everything() {
        let table = RouteTable::from_config(&section(false));
        assert!(table.routes().iter().all(|r| !r.policy.enabled));
    }

    #[test]
    fn test_success_codes_per_verb() {
        let table = RouteTable::from_config(&section(true));

        let get = table.find(&Method::GET, "/api/movies").unwrap();
        assert_eq!(get.ok_statuses, vec![StatusCode::OK]);
        assert!(get.accepts_id);

        let post = table.find(&Method::POST, "/api/movies").unwrap();
        assert_eq!(post.ok_statuses, vec![StatusCode::OK, StatusCode::CREATED]);
        assert!(!post.accepts_id);
    }

    #[test]
    fn test_health_is_plain_monolith_row() {
        let table = RouteTable::from_config(&section(true));
        let health = table.find(&Method::GET, "/health").unwrap();
        assert!(!health.policy.enabled);
        assert!(!health.accepts_id);
    }

    #[test]
    fn test_monolith_url_trailing_slash_trimmed() {
        let table = RouteTable::from_config(&section(true));
        assert_eq!(table.monolith_url(), "http://localhost:9000");
    }

    #[test]
    fn test_groups_cover_all_resources() {
        let table = RouteTable::from_config(&section(true));
        let groups = table.groups();
        for resource in RESOURCES {
            assert!(groups.contains(resource));
        }
        assert!(groups.contains("health"));
    }
}
