pub mod config;
pub mod context;
pub mod correction;
pub mod errors;
pub mod ocr;
pub mod pipeline;
pub mod routes;
pub mod swagger;
pub mod upload;

#[cfg(test)]
mod tests;

use axum::{extract::DefaultBodyLimit, routing::get, Json, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use config::Config;
use upload::UploadGate;

/// Room for multipart boundaries and part headers on top of the file limit.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Config,
    pub upload_gate: UploadGate,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let upload_gate = UploadGate::new(config.max_file_size_mb);
        Self { config, upload_gate }
    }
}

/// Health check endpoint for monitoring
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Full application router, shared by the server binary and the tests.
pub fn app(state: Arc<AppState>) -> Router {
    let body_limit = state
        .config
        .max_file_size_bytes()
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/api/health", get(health_check))
        .merge(routes::router())
        .merge(swagger::create_swagger_router())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
