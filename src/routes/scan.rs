use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::{errors::UploadError, upload::ScanMetadata, AppState};

/// Receive a document for scanning
///
/// Validates size and extension and echoes back the upload metadata.
#[utoipa::path(
    post,
    path = "/scan",
    tag = "scan",
    request_body(content = String, description = "Multipart form data with a `file` part. Supported extensions: txt, pdf, png, jpg, jpeg, tif, tiff, bmp, webp.", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File accepted", body = ScanMetadata),
        (status = 400, description = "Malformed multipart body or missing file part"),
        (status = 413, description = "File too large"),
        (status = 415, description = "File extension not allowed")
    )
)]
pub async fn scan(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ScanMetadata>, UploadError> {
    let max_mb = state.config.max_file_size_mb;
    let mut uploaded_file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_mb))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(|e| multipart_error(e, max_mb))?;

        uploaded_file = Some((filename, content_type, data));
        break;
    }

    let (filename, content_type, data) = uploaded_file.ok_or_else(|| {
        warn!("Scan request without a file part");
        UploadError::MissingFile
    })?;

    match state.upload_gate.validate(&filename, content_type.as_deref(), &data) {
        Ok(metadata) => {
            info!("Accepted upload '{}' ({} bytes)", filename, data.len());
            Ok(Json(metadata))
        }
        Err(e) => {
            warn!("Rejected upload '{}' ({} bytes): {}", filename, data.len(), e);
            Err(e)
        }
    }
}

fn multipart_error(e: axum::extract::multipart::MultipartError, max_mb: u64) -> UploadError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("Upload exceeded the request body limit: {}", e);
        UploadError::PayloadTooLarge { max_mb }
    } else {
        warn!("Failed to read multipart body: {}", e);
        UploadError::InvalidMultipart { details: e.body_text() }
    }
}
