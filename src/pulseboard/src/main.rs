//! Pulseboard — Marketing analytics dashboard backend.
//!
//! Main entry point that seeds the demo dataset and starts the server.

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use pulse_api::ApiServer;
use pulse_core::AppConfig;
use pulse_data::seed::seeded_store;

#[derive(Parser, Debug)]
#[command(name = "pulseboard")]
#[command(about = "Marketing analytics dashboard backend")]
#[command(version)]
struct Cli {
    /// HTTP port (overrides config)
    #[arg(long, env = "PULSEBOARD__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Metrics port (overrides config)
    #[arg(long, env = "PULSEBOARD__METRICS__PORT")]
    metrics_port: Option<u16>,

    /// Demo data seed (overrides config)
    #[arg(long, env = "PULSEBOARD__DATA__SEED")]
    seed: Option<u64>,

    /// Demo conversion count (overrides config)
    #[arg(long, env = "PULSEBOARD__DATA__CONVERSIONS")]
    conversions: Option<usize>,

    /// Default attribution model (overrides config)
    #[arg(long, env = "PULSEBOARD__ATTRIBUTION__DEFAULT_MODEL")]
    default_model: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulseboard=info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("Pulseboard starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }
    if let Some(port) = cli.metrics_port {
        config.metrics.port = port;
    }
    if let Some(seed) = cli.seed {
        config.data.seed = seed;
    }
    if let Some(count) = cli.conversions {
        config.data.conversions = count;
    }
    if let Some(model) = cli.default_model {
        config.attribution.default_model = model;
    }

    info!(
        http_port = config.api.http_port,
        metrics_port = config.metrics.port,
        seed = config.data.seed,
        conversions = config.data.conversions,
        default_model = %config.attribution.default_model,
        "Configuration loaded"
    );

    // Seed the in-memory store before the listener binds so the readiness
    // probe reports accurately.
    let store = Arc::new(seeded_store(config.data.seed, config.data.conversions));

    let api_server = ApiServer::new(config, store);

    // Start metrics exporter
    if let Err(e) = api_server.start_metrics().await {
        error!(error = %e, "Failed to start metrics exporter");
    }

    info!("Pulseboard is ready to serve traffic");

    // Start HTTP server (blocks until shutdown)
    api_server.start_http().await?;

    Ok(())
}
