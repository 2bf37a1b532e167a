use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::Json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::domain::{ChatRequest, ChatResponse, HealthStatus};

use super::container::Container;
use super::controller::{
    ChatController, EndpointDoc, HealthController, RootController, ServiceInfo,
};
use super::error::ApiError;

/// HTTP surface consumed by the dashboard.
pub fn build_router(container: Arc<Container>) -> axum::Router {
    axum::Router::new()
        .route("/", get(root))
        .route("/docs", get(docs))
        .route("/health", get(health))
        .route("/chat", post(chat))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(container)
}

/// Serve until Ctrl-C.
pub async fn serve(container: Arc<Container>, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "Listening on http://{} (backend {}, model {})",
        listener.local_addr()?,
        container.backend_url(),
        container.model()
    );

    axum::serve(listener, build_router(container))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

async fn root() -> Json<ServiceInfo> {
    Json(RootController::info())
}

async fn docs() -> Json<Vec<EndpointDoc>> {
    Json(RootController::docs())
}

async fn health(State(container): State<Arc<Container>>) -> Json<HealthStatus> {
    Json(HealthController::new(&container).health().await)
}

async fn chat(
    State(container): State<Arc<Container>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload?;
    let response = ChatController::new(&container).chat(request).await?;
    Ok(Json(response))
}
