use crate::*;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    #[error("gateway.monolith_url is not a valid URL: {0}")]
    InvalidMonolithUrl(String),

    #[error("Migration target '{group}': service_url is not a valid URL: {url}")]
    InvalidServiceUrl { group: String, url: String },

    #[error("Migration target '{group}': percent must be 0-100, got {percent}")]
    InvalidPercent { group: String, percent: u32 },

    #[error("Invalid log format: {0}. Must be one of: pretty, json, compact")]
    InvalidLogFormat(String),

    #[error("events.brokers must not be empty")]
    EmptyBrokers,

    #[error("Unresolved environment variable placeholder in '{field}': {value}")]
    UnresolvedEnvVar { field: String, value: String },
}

#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationWarning {
            field: field.to_string(),
            message: message.to_string(),
        });
    }
}

pub fn validate_config(config: &FiggateConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_gateway(&config.gateway, &mut report);
    validate_events(&config.events, &mut report);
    validate_logging(&config.logging, &mut report);

    report
}

/// Validate a URL field. Unresolved `${VAR}` placeholders get their own
/// error; anything else that fails to parse gets `on_invalid`.
fn validate_url_field(
    field: &str,
    value: &str,
    report: &mut ValidationReport,
    on_invalid: impl FnOnce(String) -> ValidationError,
) {
    if substitution::has_unresolved_env_vars(value) {
        report.add_error(ValidationError::UnresolvedEnvVar {
            field: field.to_string(),
            value: value.to_string(),
        });
    } else if Url::parse(value).is_err() {
        report.add_error(on_invalid(value.to_string()));
    }
}

fn validate_gateway(gateway: &GatewaySection, report: &mut ValidationReport) {
    validate_url_field(
        "gateway.monolith_url",
        &gateway.monolith_url,
        report,
        ValidationError::InvalidMonolithUrl,
    );

    for (group, target) in &gateway.migrations {
        let field = format!("gateway.migrations.{}.service_url", group);
        let group_name = group.clone();
        validate_url_field(&field, &target.service_url, report, |url| {
            ValidationError::InvalidServiceUrl {
                group: group_name,
                url,
            }
        });

        if target.percent > 100 {
            report.add_error(ValidationError::InvalidPercent {
                group: group.clone(),
                percent: target.percent,
            });
        }

        if gateway.gradual_migration && target.percent == 0 {
            report.add_warning(
                &format!("gateway.migrations.{}", group),
                "percent is 0; all traffic stays on the monolith",
            );
        }
    }

    if !gateway.gradual_migration && !gateway.migrations.is_empty() {
        report.add_warning(
            "gateway.gradual_migration",
            "migration targets are configured but the global switch is off",
        );
    }
}

fn validate_events(events: &EventsSection, report: &mut ValidationReport) {
    if events.brokers.trim().is_empty() {
        report.add_error(ValidationError::EmptyBrokers);
    }
}

fn validate_logging(logging: &LoggingSection, report: &mut ValidationReport) {
    match logging.format.to_lowercase().as_str() {
        "pretty" | "json" | "compact" => {}
        other => report.add_error(ValidationError::InvalidLogFormat(other.to_string())),
    }
}
