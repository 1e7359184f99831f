use crate::*;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

#[instrument(skip(path))]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FiggateConfig> {
    let path = path.as_ref();
    info!("Loading configuration from: {:?}", path);

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    debug!("Config file content length: {} bytes", content.len());

    let substituted = substitution::substitute_env_vars(&content)?;

    let config: FiggateConfig = serde_yaml::from_str(&substituted)
        .with_context(|| "Failed to parse YAML configuration")?;

    info!("Configuration loaded successfully");
    Ok(config)
}

#[instrument]
pub fn generate_default_config() -> FiggateConfig {
    let mut migrations = std::collections::BTreeMap::new();
    migrations.insert(
        "movies".to_string(),
        MigrationTarget {
            service_url: "http://localhost:9001".to_string(),
            percent: 20,
        },
    );

    FiggateConfig {
        gateway: GatewaySection {
            port: default_gateway_port(),
            monolith_url: "http://localhost:9000".to_string(),
            gradual_migration: false,
            migrations,
        },
        events: EventsSection::default(),
        logging: LoggingSection::default(),
    }
}

pub fn save_config<P: AsRef<Path> + std::fmt::Debug>(
    config: &FiggateConfig,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    info!("Saving configuration to: {:?}", path);

    let yaml = serde_yaml::to_string(config)
        .with_context(|| "Failed to serialize configuration to YAML")?;

    fs::write(path, yaml).with_context(|| format!("Failed to write config file: {:?}", path))?;

    info!("Configuration saved successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
gateway:
  port: 8088
  monolith_url: http://localhost:9000
  gradual_migration: true
  migrations:
    movies:
      service_url: http://localhost:9001
      percent: 20
events:
  port: 8089
unknown_top_level_key: ignored
"#;

    #[test]
    fn test_parse_sample() {
        let config: FiggateConfig = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(config.gateway.port, 8088);
        assert!(config.gateway.gradual_migration);
        let movies = &config.gateway.migrations["movies"];
        assert_eq!(movies.service_url, "http://localhost:9001");
        assert_eq!(movies.percent, 20);
        assert_eq!(config.events.port, 8089);
        // Defaults kick in for untouched sections
        assert_eq!(config.events.brokers, "localhost:9092");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let yaml = r#"
gateway:
  monolith_url: http://localhost:9000
  shiny_new_toggle: true
"#;
        let config: FiggateConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.gateway.port, 8080);
        assert!(!config.gateway.gradual_migration);
        assert!(config.gateway.migrations.is_empty());
    }

    #[test]
    fn test_missing_monolith_url_is_a_parse_error() {
        let yaml = "gateway:\n  port: 8080\n";
        assert!(serde_yaml::from_str::<FiggateConfig>(yaml).is_err());
    }

    #[test]
    fn test_save_and_reload_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figgate.yaml");

        let config = generate_default_config();
        save_config(&config, &path).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.gateway.port, config.gateway.port);
        assert_eq!(loaded.gateway.monolith_url, config.gateway.monolith_url);
        assert_eq!(
            loaded.gateway.migrations["movies"].percent,
            config.gateway.migrations["movies"].percent
        );
    }
}
