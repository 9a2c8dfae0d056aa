use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{Config, DEFAULT_LLM_MODEL};
use crate::correction::error::CorrectionError;

/// Fixed instruction sent as the system turn of every correction request.
pub const SYSTEM_PROMPT: &str = "당신은 OCR 텍스트 오류를 교정하는 전문가입니다. \
문장 의미를 바꾸지 말고, 다음 오인식을 교정하세요: \
숫자↔영문(O↔0, l↔1, S↔5 등), 잘못된 공백/하이픈/특수문자, \
이메일/전화번호/주민등록번호/신용카드번호 형식. \
결과는 오직 교정된 텍스트만 출력하세요.";

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Client for the chat-completion endpoint used to clean up OCR output.
///
/// Correction is an enhancement, so this client fails open: without an API
/// key, or on any request or response failure, [`correct`](Self::correct)
/// hands back the input unchanged.
#[derive(Clone)]
pub struct CorrectionClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
    max_chars: usize,
}

impl CorrectionClient {
    pub fn new(
        api_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
        max_chars: usize,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key,
            model: DEFAULT_LLM_MODEL.to_string(),
            max_chars,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            config.llm_api_url.clone(),
            config.upstage_api_key.clone(),
            config.llm_timeout(),
            config.llm_max_chars,
        )?
        .with_model(config.llm_model.clone()))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Returns the corrected text, or `text` itself when correction is
    /// unavailable or fails for any reason.
    pub async fn correct(&self, text: &str) -> String {
        match self.try_correct(text).await {
            Ok(corrected) => corrected,
            Err(CorrectionError::MissingApiKey) => {
                debug!("No API key configured, skipping OCR text correction");
                text.to_string()
            }
            Err(e) => {
                warn!("OCR text correction failed, keeping original text: {}", e);
                text.to_string()
            }
        }
    }

    /// Performs one correction request and reports why it failed, if it did.
    pub async fn try_correct(&self, text: &str) -> Result<String, CorrectionError> {
        let api_key = self.api_key.as_deref().ok_or(CorrectionError::MissingApiKey)?;

        let payload_text = truncate_chars(text, self.max_chars);
        if payload_text.len() < text.len() {
            debug!(
                "Truncated correction input to {} of {} characters",
                self.max_chars,
                text.chars().count()
            );
        }

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: payload_text },
            ],
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CorrectionError::UpstreamStatus { status: status.as_u16() });
        }

        let completion: ChatCompletionResponse = response.json().await?;

        let corrected = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CorrectionError::InvalidResponse {
                details: "response has no choices".to_string(),
            })?
            .message
            .content
            .unwrap_or_default();

        let corrected = corrected.trim();
        if corrected.is_empty() {
            return Err(CorrectionError::EmptyCompletion);
        }

        info!("Corrected OCR text ({} characters)", corrected.chars().count());
        Ok(corrected.to_string())
    }
}

/// Prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

impl std::fmt::Debug for CorrectionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorrectionClient")
            .field("api_url", &self.api_url)
            .field("has_api_key", &self.api_key.is_some())
            .field("model", &self.model)
            .field("max_chars", &self.max_chars)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("hello", 0), "");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("가나다라", 2), "가나");
        assert_eq!(truncate_chars("a↔b", 2), "a↔");
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatCompletionRequest {
            model: "m",
            messages: [
                ChatMessage { role: "system", content: "sys" },
                ChatMessage { role: "user", content: "text" },
            ],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "m",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "text"}
                ]
            })
        );
    }
}
