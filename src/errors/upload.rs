use axum::http::StatusCode;
use thiserror::Error;

use super::{impl_into_response, AppError};

/// Rejections produced by the upload gate and its multipart plumbing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("File too large (>{max_mb}MB)")]
    PayloadTooLarge { max_mb: u64 },

    #[error("File extension not allowed: {ext}")]
    UnsupportedExtension { ext: String },

    #[error("No file part named 'file' in upload")]
    MissingFile,

    #[error("Invalid multipart body: {details}")]
    InvalidMultipart { details: String },
}

impl AppError for UploadError {
    fn status_code(&self) -> StatusCode {
        match self {
            UploadError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            UploadError::UnsupportedExtension { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            UploadError::MissingFile => StatusCode::BAD_REQUEST,
            UploadError::InvalidMultipart { .. } => StatusCode::BAD_REQUEST,
        }
    }

    fn user_message(&self) -> String {
        match self {
            UploadError::InvalidMultipart { .. } => "Invalid multipart body".to_string(),
            _ => self.to_string(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            UploadError::PayloadTooLarge { .. } => "UPLOAD_TOO_LARGE",
            UploadError::UnsupportedExtension { .. } => "UPLOAD_UNSUPPORTED_EXTENSION",
            UploadError::MissingFile => "UPLOAD_MISSING_FILE",
            UploadError::InvalidMultipart { .. } => "UPLOAD_INVALID_MULTIPART",
        }
    }
}

impl_into_response!(UploadError);
