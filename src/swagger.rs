use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use axum::Router;
use std::sync::Arc;

use crate::{upload::ScanMetadata, AppState};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::scan::scan,
        crate::health_check,
    ),
    components(
        schemas(ScanMetadata)
    ),
    tags(
        (name = "scan", description = "Document upload endpoints"),
        (name = "health", description = "Service health"),
    ),
    info(
        title = "docscan API",
        version = "0.1.0",
        description = "Upload validation in front of remote OCR and text correction"
    )
)]
pub struct ApiDoc;

pub fn create_swagger_router() -> Router<Arc<AppState>> {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}
