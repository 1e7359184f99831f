use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "figgate")]
#[command(about = "figgate - strangler-fig migration gateway")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a service with the given configuration
    Start {
        /// Which service to run in this process
        #[arg(short, long, value_enum, default_value = "gateway")]
        service: ServiceMode,

        /// Path to the configuration file
        #[arg(short, long, default_value = "figgate.yaml")]
        config: PathBuf,

        /// Override the listening port
        #[arg(long)]
        port: Option<u16>,

        /// Expose Prometheus metrics on this port
        #[arg(long)]
        metrics_port: Option<u16>,
    },

    /// Validate configuration without starting anything
    Validate {
        /// Path to the configuration file
        #[arg(short, long, default_value = "figgate.yaml")]
        config: PathBuf,
    },

    /// Write a default configuration file
    Init {
        /// Output path for the new configuration file
        #[arg(short, long, default_value = "figgate.yaml")]
        output: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceMode {
    /// Routing gateway in front of the monolith and the new services
    Gateway,

    /// Event gateway - publish endpoints plus consumer workers
    Events,
}

impl ServiceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceMode::Gateway => "gateway",
            ServiceMode::Events => "events",
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_defaults() {
        let cli = Cli::try_parse_from(["figgate", "start"]).unwrap();
        match cli.command {
            Commands::Start {
                service,
                config,
                port,
                metrics_port,
            } => {
                assert_eq!(service, ServiceMode::Gateway);
                assert_eq!(config, PathBuf::from("figgate.yaml"));
                assert_eq!(port, None);
                assert_eq!(metrics_port, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_start_events_with_port() {
        let cli =
            Cli::try_parse_from(["figgate", "start", "--service", "events", "--port", "9090"])
                .unwrap();
        match cli.command {
            Commands::Start { service, port, .. } => {
                assert_eq!(service, ServiceMode::Events);
                assert_eq!(port, Some(9090));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_validate_command() {
        let cli = Cli::try_parse_from(["figgate", "validate", "-c", "/tmp/cfg.yaml"]).unwrap();
        match cli.command {
            Commands::Validate { config } => assert_eq!(config, PathBuf::from("/tmp/cfg.yaml")),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
