use anyhow::Result;
use std::env;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_OCR_API_URL: &str = "https://api.upstage.ai/v1/document-ai/ocr";
pub const DEFAULT_LLM_API_URL: &str = "https://api.upstage.ai/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "solar-1-mini-chat";
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 25;

const BYTES_PER_MB: usize = 1024 * 1024;

#[derive(Clone)]
pub struct Config {
    pub server_address: String,
    /// Shared credential for both Upstage endpoints. `None` when unset or empty.
    pub upstage_api_key: Option<String>,
    pub ocr_api_url: String,
    pub llm_api_url: String,
    pub llm_model: String,
    pub llm_timeout_seconds: u64,
    pub llm_max_chars: usize,
    pub max_file_size_mb: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_address: "0.0.0.0:8000".to_string(),
            upstage_api_key: None,
            ocr_api_url: DEFAULT_OCR_API_URL.to_string(),
            llm_api_url: DEFAULT_LLM_API_URL.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_timeout_seconds: 30,
            llm_max_chars: 8000,
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        Ok(Config {
            server_address: env::var("SERVER_ADDRESS")
                .unwrap_or(defaults.server_address),
            upstage_api_key: env::var("UPSTAGE_API_KEY")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            ocr_api_url: env::var("OCR_API_URL")
                .unwrap_or(defaults.ocr_api_url),
            llm_api_url: env::var("LLM_API_URL")
                .unwrap_or(defaults.llm_api_url),
            llm_model: env::var("LLM_MODEL")
                .unwrap_or(defaults.llm_model),
            llm_timeout_seconds: env::var("LLM_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.llm_timeout_seconds),
            llm_max_chars: env::var("LLM_MAX_CHARS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.llm_max_chars),
            max_file_size_mb: env::var("MAX_FILE_SIZE_MB")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_file_size_mb),
        })
    }

    pub fn max_file_size_bytes(&self) -> usize {
        mb_to_bytes(self.max_file_size_mb)
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_seconds)
    }
}

/// Megabytes to bytes, saturating at `usize::MAX` instead of overflowing.
pub fn mb_to_bytes(mb: u64) -> usize {
    usize::try_from(mb)
        .unwrap_or(usize::MAX)
        .saturating_mul(BYTES_PER_MB)
}

// Keeps the API key out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server_address", &self.server_address)
            .field("upstage_api_key", &self.upstage_api_key.as_ref().map(|_| "<redacted>"))
            .field("ocr_api_url", &self.ocr_api_url)
            .field("llm_api_url", &self.llm_api_url)
            .field("llm_model", &self.llm_model)
            .field("llm_timeout_seconds", &self.llm_timeout_seconds)
            .field("llm_max_chars", &self.llm_max_chars)
            .field("max_file_size_mb", &self.max_file_size_mb)
            .finish()
    }
}
