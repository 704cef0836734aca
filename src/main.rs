//! Rarity Service: item rarity over HTTP.
//!
//! This is the application entry point. It initializes tracing, loads
//! configuration from TOML, creates the shared randomness source, sets up the
//! Axum router, and starts the HTTP server.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rarity_service::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use rarity_service::http::start_server;
use rarity_service::rng::{RandomSource, SharedRng};
use rarity_service::{create_router, AppState};

/// Rarity Service: assigns rarity levels to marketplace items
#[derive(Parser, Debug)]
#[command(name = "rarity-service", version, about)]
struct Args {
    /// Path to configuration file (built-in defaults apply if the default path is absent)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level filter (e.g., "rarity_service=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Port to listen on, overriding http.port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Config is loaded before tracing so the log format can come from it
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::load_or_default(DEFAULT_CONFIG_PATH)?,
    };
    if let Some(port) = args.port {
        config.http.port = port;
        config.validate()?;
    }

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        host = %config.http.host,
        port = config.http.port,
        origins = ?config.cors.allowed_origins,
        "Loaded configuration"
    );

    let source: Arc<dyn RandomSource> = match config.rarity.seed {
        Some(seed) => {
            tracing::warn!(seed, "Using fixed RNG seed - rarity draws are reproducible");
            Arc::new(SharedRng::seeded(seed))
        }
        None => Arc::new(SharedRng::from_entropy()),
    };

    let state = AppState::new(config.clone(), source);
    let app = create_router(state);

    start_server(app, &config).await?;

    tracing::info!("Server stopped");
    Ok(())
}
