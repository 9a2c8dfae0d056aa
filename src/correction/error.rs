use thiserror::Error;

/// Reasons a correction attempt produced no usable text. The public
/// [`CorrectionClient::correct`](super::CorrectionClient::correct) collapses all of
/// these to the original input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CorrectionError {
    #[error("UPSTAGE_API_KEY is not configured")]
    MissingApiKey,

    #[error("correction request timed out")]
    Timeout,

    #[error("correction request failed: {details}")]
    Request { details: String },

    #[error("correction API returned status {status}")]
    UpstreamStatus { status: u16 },

    #[error("correction response could not be parsed: {details}")]
    InvalidResponse { details: String },

    #[error("correction response was empty")]
    EmptyCompletion,
}

impl From<reqwest::Error> for CorrectionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            CorrectionError::Timeout
        } else if e.is_decode() {
            CorrectionError::InvalidResponse { details: e.to_string() }
        } else {
            CorrectionError::Request { details: e.to_string() }
        }
    }
}
