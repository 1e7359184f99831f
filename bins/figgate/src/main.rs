//! figgate CLI and server binary
//!
//! Entry point for both figgate processes: the routing gateway in front of
//! the monolith, and the event gateway with its consumer workers.

use anyhow::{bail, Context, Result};
use cli::{Cli, Commands, ServiceMode};
use config::{
    generate_default_config, load_config, save_config, validate_config, FiggateConfig,
};
use events::api::EventsApiState;
use events::{run_consumer, EventKind, InProcessBus};
use gateway::api::GatewayState;
use gateway::{HttpUpstreamClient, RouteTable};
use observability::{init_logging, LogFormat};
use server::{HttpServer, Server, ServerConfig, ServerExt, ShutdownController};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Start {
            service,
            config,
            port,
            metrics_port,
        } => start(service, config, port, metrics_port).await,
        Commands::Validate { config } => {
            init_logging("figgate", LogFormat::Pretty)?;
            validate_command(config)
        }
        Commands::Init { output } => {
            init_logging("figgate", LogFormat::Pretty)?;
            init_command(output)
        }
    }
}

async fn start(
    service: ServiceMode,
    config_path: PathBuf,
    port_override: Option<u16>,
    metrics_port: Option<u16>,
) -> Result<()> {
    // Config decides the log format, so it is loaded before the subscriber
    // is installed; startup traces before this point are dropped.
    let config = load_config(&config_path)
        .with_context(|| format!("Cannot load configuration from {:?}", config_path))?;

    let format: LogFormat = config
        .logging
        .format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    init_logging(service.as_str(), format)?;

    info!(service = service.as_str(), config = ?config_path, "figgate starting");

    ensure_valid(&config)?;

    if let Some(metrics_port) = metrics_port {
        observability::init_metrics(metrics_port)?;
    }

    match service {
        ServiceMode::Gateway => run_gateway(config, port_override).await,
        ServiceMode::Events => run_events(config, port_override).await,
    }
}

async fn run_gateway(config: FiggateConfig, port_override: Option<u16>) -> Result<()> {
    let table = RouteTable::from_config(&config.gateway);
    for spec in table.routes() {
        if spec.policy.enabled {
            info!(
                group = %spec.group,
                method = %spec.method,
                path = %spec.path,
                percent = spec.policy.percent,
                "Migration live"
            );
        }
    }

    let upstream = Arc::new(HttpUpstreamClient::new());
    let state = Arc::new(GatewayState::new(table, upstream));
    let router = gateway::api::create_router(state);

    let port = port_override.unwrap_or(config.gateway.port);
    let server = HttpServer::new(ServerConfig::new("0.0.0.0", port), router);

    info!(port, monolith = %config.gateway.monolith_url, "Routing gateway ready");
    server.run_with_ctrl_c().await?;
    Ok(())
}

async fn run_events(config: FiggateConfig, port_override: Option<u16>) -> Result<()> {
    info!(brokers = %config.events.brokers, "Event gateway starting");

    let bus = InProcessBus::new();
    let shutdown = ShutdownController::with_ctrl_c();

    for kind in EventKind::ALL {
        let consumer = bus.consumer(kind.consumer_group(), kind.topic());
        let token = shutdown.child_token();
        tokio::spawn(async move {
            if let Err(e) = run_consumer(consumer, kind.tag(), token).await {
                error!(tag = kind.tag(), error = %e, "Consumer worker failed");
            }
        });
    }

    let state = Arc::new(EventsApiState {
        publisher: Arc::new(bus),
    });
    let router = events::api::create_router(state);

    let port = port_override.unwrap_or(config.events.port);
    let server = HttpServer::new(ServerConfig::new("0.0.0.0", port), router);

    info!(port, "Event gateway ready");
    server.run(shutdown.token()).await?;
    Ok(())
}

fn ensure_valid(config: &FiggateConfig) -> Result<()> {
    let report = validate_config(config);

    for warning in &report.warnings {
        warn!(field = %warning.field, "{}", warning.message);
    }

    if !report.is_valid() {
        for error in &report.errors {
            error!("Configuration error: {}", error);
        }
        bail!("Configuration invalid ({} error(s))", report.errors.len());
    }

    Ok(())
}

fn validate_command(config_path: PathBuf) -> Result<()> {
    let config = load_config(&config_path)
        .with_context(|| format!("Cannot load configuration from {:?}", config_path))?;

    ensure_valid(&config)?;
    info!(config = ?config_path, "Configuration is valid");
    Ok(())
}

fn init_command(output: PathBuf) -> Result<()> {
    if Path::new(&output).exists() {
        bail!("{:?} already exists; refusing to overwrite", output);
    }

    let config = generate_default_config();
    save_config(&config, &output)?;
    info!(output = ?output, "Default configuration written");
    Ok(())
}
