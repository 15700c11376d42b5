//! halaman-api - Plant Encyclopedia API service
//!
//! Stateless HTTP API over several botanical data providers (Trefle,
//! GBIF, Tropicos, Perenual, Wikipedia) plus a forestry-news aggregator.
//! Every record is synthesized per request from live provider responses;
//! nothing persists server-side.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use halaman_api::{build_router, AppState};
use halaman_api::news::NewsAggregator;
use halaman_api::providers::Providers;
use halaman_common::config::Settings;

/// Command-line arguments for halaman-api
#[derive(Parser, Debug)]
#[command(name = "halaman-api")]
#[command(about = "Plant encyclopedia API service")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides HALAMAN_PORT and the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to a TOML config file
    #[arg(short, long, env = "HALAMAN_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "halaman_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let settings = Settings::resolve(args.config.as_deref())
        .context("Failed to resolve configuration")?;
    let port = args.port.unwrap_or(settings.port);

    info!("Starting halaman-api (Plant Encyclopedia)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let providers = Providers::from_settings(&settings)
        .context("Failed to initialize provider clients")?;
    let news = NewsAggregator::new(settings.gnews_key.clone())
        .context("Failed to initialize news aggregator")?;

    let state = AppState::new(providers, news);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
