use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OcrError {
    #[error("UPSTAGE_API_KEY is not configured")]
    MissingApiKey,

    #[error("OCR response contained no text")]
    NoTextFound,

    #[error("OCR API call failed with status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("OCR request failed: {details}")]
    Request { details: String },

    #[error("OCR response could not be parsed: {details}")]
    InvalidResponse { details: String },
}

impl OcrError {
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, OcrError::MissingApiKey)
    }

    pub fn is_upstream_error(&self) -> bool {
        matches!(
            self,
            OcrError::UpstreamStatus { .. }
                | OcrError::Request { .. }
                | OcrError::InvalidResponse { .. }
        )
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            OcrError::MissingApiKey => "OCR_MISSING_API_KEY",
            OcrError::NoTextFound => "OCR_NO_TEXT",
            OcrError::UpstreamStatus { .. } => "OCR_UPSTREAM_STATUS",
            OcrError::Request { .. } => "OCR_REQUEST_FAILED",
            OcrError::InvalidResponse { .. } => "OCR_INVALID_RESPONSE",
        }
    }
}
