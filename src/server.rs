//! Axum server setup

use crate::{api, state::AppState, validate};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the dashboard API router. The start endpoint is wrapped by the
/// validation guard; everything else is a plain GET.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/config", get(api::get_config))
        .route("/api/status", get(api::get_status))
        .route("/api/resources", get(api::get_resources))
        .route("/api/stats", get(api::get_stats))
        .route(
            "/api/start",
            post(api::start_demo).route_layer(middleware::from_fn(|req, next| {
                validate::enforce_schema(&api::START_DEMO_SCHEMA, req, next)
            })),
        )
        .route("/health", get(api::get_health))
        // The dashboard is served from file:// or another origin in the demo
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn run_server(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state);

    tracing::info!("Omics dashboard API listening on http://{}", addr);
    tracing::info!("   Status:  http://{}/api/status", addr);
    tracing::info!("   Health:  http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
