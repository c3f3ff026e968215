//! Boundary query server.
//!
//! Serves merged province shapes, province cantons and single cantons as
//! GeoJSON for map rendering.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use clap::Parser;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use limites::config::Config;
use limites::{BoundaryAggregator, BoundaryError, FeatureCollection};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Administrative boundary query server")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Boundary GeoJSON URL or path (overrides the config file)
    #[arg(short, long)]
    resource: Option<String>,

    /// Listen address (overrides the config file)
    #[arg(short, long)]
    listen: Option<String>,
}

/// Application state shared across handlers
struct AppState {
    aggregator: BoundaryAggregator,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = resolve_config(&args)?;

    info!("Limites Boundary Server");
    info!(
        "Boundary dataset: {} (timeout {:?})",
        config.source.resource,
        config.source.timeout()
    );

    let aggregator = BoundaryAggregator::from_config(&config)?;
    let state = Arc::new(AppState { aggregator });

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/cantons", get(known_cantons_handler))
        .route("/v1/provinces/{name}", get(province_handler))
        .route("/v1/provinces/{name}/cantons", get(province_cantons_handler))
        .route(
            "/v1/provinces/{province}/cantons/{name}",
            get(canton_handler),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting server on {}", config.server.listen);

    let listener = tokio::net::TcpListener::bind(&config.server.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = match (&args.config, &args.resource) {
        (Some(path), _) => Config::load_from_file(path)?,
        (None, Some(resource)) => Config::from_resource(resource.clone()),
        (None, None) => anyhow::bail!("either --config or --resource is required"),
    };

    if let Some(resource) = &args.resource {
        config.source.resource = resource.clone();
    }
    if let Some(listen) = &args.listen {
        config.server.listen = listen.clone();
    }

    Ok(config)
}

/// Map aggregator errors onto HTTP responses
fn error_response(context: &str, e: BoundaryError) -> (StatusCode, String) {
    let status = match e {
        BoundaryError::Load(_) => StatusCode::BAD_GATEWAY,
        BoundaryError::NoBoundariesFound { .. } | BoundaryError::CantonNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
    };

    if status.is_server_error() {
        tracing::error!("{} failed: {}", context, e);
    }

    (status, e.to_string())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    loaded: bool,
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        loaded: state.aggregator.is_loaded().await,
    })
}

/// Known canton names (no dataset access)
async fn known_cantons_handler(State(state): State<Arc<AppState>>) -> Json<Vec<&'static str>> {
    Json(state.aggregator.known_cantons().to_vec())
}

/// Merged province outline
async fn province_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<FeatureCollection>, (StatusCode, String)> {
    state
        .aggregator
        .province(&name)
        .await
        .map(Json)
        .map_err(|e| error_response("Province lookup", e))
}

/// Cantons of a province
async fn province_cantons_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<FeatureCollection>, (StatusCode, String)> {
    state
        .aggregator
        .province_cantons(&name)
        .await
        .map(Json)
        .map_err(|e| error_response("Province cantons", e))
}

/// Single canton by name
async fn canton_handler(
    State(state): State<Arc<AppState>>,
    Path((province, name)): Path<(String, String)>,
) -> Result<Json<FeatureCollection>, (StatusCode, String)> {
    state
        .aggregator
        .canton(&province, &name)
        .await
        .map(Json)
        .map_err(|e| error_response("Canton lookup", e))
}
