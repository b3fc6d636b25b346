//! Furnace Service - temperature endpoint and heater control.
//!
//! Run with: `cargo run -p furnace-service`

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use clap::Parser;
use furnace_core::{SourceKind, build_source};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use furnace_service::{AppState, Config, Controller, api};

/// Furnace Service - temperature endpoint and heater control.
#[derive(Parser, Debug)]
#[command(name = "furnace-service")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address (overrides config).
    #[arg(short, long)]
    bind: Option<String>,

    /// Temperature source (overrides config).
    #[arg(long)]
    source: Option<SourceKind>,

    /// Initial setpoint in °C (overrides config).
    #[arg(long)]
    setpoint: Option<f64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("furnace_service=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default().unwrap_or_default(),
    };

    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(source) = args.source {
        config.sensor.source = source;
    }
    if let Some(setpoint) = args.setpoint {
        config.control.setpoint = setpoint;
    }
    config.validate()?;

    let source = build_source(
        config.sensor.source,
        &config.sensor.url,
        config.sensor.mock_sensor(),
    )
    .context("Failed to create temperature source")?;
    info!("Reading temperatures from {}", source.name());

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;

    let state = AppState::new(source, config);
    let _control = Controller::new(Arc::clone(&state)).start();

    let app = Router::new()
        .merge(api::router())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
