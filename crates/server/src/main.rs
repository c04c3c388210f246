use std::sync::Arc;

use anyhow::Context;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, info_span};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod config;
mod routes;

use config::ServerConfig;
use routes::{AppState, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "siterate_server=info,siterate_core=info,tower_http=info".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let state = Arc::new(AppState { analyzer: config.analyzer.clone(), judge: config.judge()? });

    let app = router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                info_span!(
                    "request",
                    request_id = %Uuid::new_v4(),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }))
            .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, config.request_timeout))
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive()),
    );

    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    info!(addr = %config.addr, fetch_timeout = config.analyzer.fetch.timeout, "siterate server listening");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
