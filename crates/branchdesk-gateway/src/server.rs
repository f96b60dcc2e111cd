//! HTTP server implementation using Axum.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use branchdesk_agent::Assistant;
use branchdesk_core::config::BranchdeskConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::session::SessionStore;

/// Shared state for the gateway server.
pub struct AppState {
    pub assistant: Assistant,
    pub sessions: SessionStore,
    pub start_time: std::time::Instant,
}

/// Build the Axum router with all routes.
pub fn build_router(shared: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/api/v1/login", post(crate::routes::login))
        .route("/api/v1/logout", post(crate::routes::logout))
        .route("/api/v1/chat", post(crate::routes::chat))
        .route("/api/v1/search", post(crate::routes::search))
        .route("/api/v1/info", get(crate::routes::system_info));

    // Public routes — no session required
    let public = Router::new().route("/health", get(crate::routes::health_check));

    api.merge(public)
        .layer(
            CorsLayer::new()
                .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
                .allow_headers(Any)
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Start the HTTP server.
pub async fn start(config: &BranchdeskConfig) -> anyhow::Result<()> {
    let assistant = Assistant::new(config.clone())?;
    tracing::info!(
        "✅ Assistant initialized (provider={}, sheet='{}')",
        assistant.generator_name(),
        config.sheets.guideline_sheet
    );

    let state = AppState {
        assistant,
        sessions: SessionStore::new(config.gateway.session_ttl_secs),
        start_time: std::time::Instant::now(),
    };
    let app = build_router(Arc::new(state));

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("🌐 Gateway listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
