use reqwest::{multipart, Client};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::ocr::error::OcrError;

/// Client for the remote document OCR endpoint.
///
/// A missing API key is a hard error: without extracted text there is nothing
/// for later stages to work on. Every failure is returned as an [`OcrError`],
/// never as text. No retries, and the transport's default timeout applies.
#[derive(Clone)]
pub struct OcrClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl OcrClient {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.ocr_api_url.clone(), config.upstage_api_key.clone())
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Sends the raw bytes as the `document` part and returns the `text` field
    /// of the JSON response.
    pub async fn extract_text(&self, data: &[u8]) -> Result<String, OcrError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            error!("UPSTAGE_API_KEY is not set; cannot call the OCR API");
            OcrError::MissingApiKey
        })?;

        let part = multipart::Part::bytes(data.to_vec()).file_name("document");
        let form = multipart::Form::new().part("document", part);

        debug!("Sending {} bytes to OCR API at {}", data.len(), self.api_url);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("OCR request failed: {}", e);
                OcrError::Request { details: e.to_string() }
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            error!("OCR API returned {}: {}", status, body);
            return Err(OcrError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = response.json().await.map_err(|e| {
            error!("Failed to parse OCR response: {}", e);
            OcrError::InvalidResponse { details: e.to_string() }
        })?;

        match json.get("text").and_then(Value::as_str) {
            Some(text) => {
                info!("OCR extracted {} characters", text.chars().count());
                Ok(text.to_string())
            }
            None => Err(OcrError::NoTextFound),
        }
    }
}

impl std::fmt::Debug for OcrClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OcrClient")
            .field("api_url", &self.api_url)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}
