use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::recommend::{Recommender, RecommenderStats};
use axum::{
    extract::State,
    http::HeaderValue,
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use super::metrics::metrics_handler;
use super::{log_requests, make_recommend_routes, state::*, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub catalog: RecommenderStats,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        catalog: state.recommender.stats(),
    };
    Json(stats)
}

/// Browser access for the configured front end origins, credentials included.
fn make_cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid CORS origin: {:?}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

pub fn make_app(config: ServerConfig, recommender: GuardedRecommender) -> Result<Router> {
    let cors = make_cors_layer(&config.cors_origins)?;
    let state = ServerState::new(config, recommender);

    let home_router: Router = Router::new()
        .route("/", get(home))
        .with_state(state.clone());

    let app: Router = home_router
        .merge(make_recommend_routes(state.clone()))
        .layer(middleware::from_fn_with_state(state, log_requests))
        .layer(cors);

    Ok(app)
}

fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

pub async fn run_server(recommender: Recommender, config: ServerConfig) -> Result<()> {
    let port = config.port;
    let metrics_port = config.metrics_port;
    let app = make_app(config, Arc::new(recommender))?;

    let metrics_listener = TcpListener::bind(format!("127.0.0.1:{}", metrics_port))
        .await
        .with_context(|| format!("Failed to bind metrics port {}", metrics_port))?;
    tokio::spawn(async move {
        if let Err(err) = axum::serve(metrics_listener, make_metrics_app()).await {
            error!("Metrics server stopped: {}", err);
        }
    });

    let listener = TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}
