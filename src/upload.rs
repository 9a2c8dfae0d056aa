use serde::Serialize;
use utoipa::ToSchema;

use crate::config::{mb_to_bytes, DEFAULT_MAX_FILE_SIZE_MB};
use crate::errors::UploadError;

/// Extensions accepted by the upload gate, kept in sorted order.
pub const ALLOWED_EXTENSIONS: [&str; 9] = [
    ".bmp", ".jpeg", ".jpg", ".pdf", ".png", ".tif", ".tiff", ".txt", ".webp",
];

pub const RECEIVED_MESSAGE: &str = "File received. Analysis not implemented yet.";

/// Response body for an accepted upload
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ScanMetadata {
    pub filename: String,
    pub content_type: Option<String>,
    pub size_kb: f64,
    pub accepted_ext: Vec<String>,
    pub message: String,
}

/// Validates uploads against a size limit and the extension allow-list
#[derive(Debug, Clone)]
pub struct UploadGate {
    max_file_size_mb: u64,
}

impl Default for UploadGate {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_SIZE_MB)
    }
}

impl UploadGate {
    pub fn new(max_file_size_mb: u64) -> Self {
        Self { max_file_size_mb }
    }

    pub fn max_file_size_bytes(&self) -> usize {
        mb_to_bytes(self.max_file_size_mb)
    }

    /// Size is checked before the extension, so oversized files are always
    /// reported as too large.
    pub fn validate(
        &self,
        filename: &str,
        content_type: Option<&str>,
        data: &[u8],
    ) -> Result<ScanMetadata, UploadError> {
        if data.len() > self.max_file_size_bytes() {
            return Err(UploadError::PayloadTooLarge { max_mb: self.max_file_size_mb });
        }

        if let Some(ext) = file_extension(filename) {
            if !is_allowed_extension(&ext) {
                return Err(UploadError::UnsupportedExtension { ext });
            }
        }

        Ok(ScanMetadata {
            filename: filename.to_string(),
            content_type: content_type.map(str::to_string),
            size_kb: size_in_kb(data.len()),
            accepted_ext: ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            message: RECEIVED_MESSAGE.to_string(),
        })
    }
}

/// Lower-cased suffix starting at the last dot, or `None` when the name has no dot.
pub fn file_extension(filename: &str) -> Option<String> {
    let lower = filename.to_lowercase();
    lower.rfind('.').map(|dot| lower[dot..].to_string())
}

pub fn is_allowed_extension(ext: &str) -> bool {
    ALLOWED_EXTENSIONS.binary_search(&ext).is_ok()
}

/// Kilobytes rounded to two decimals.
pub fn size_in_kb(len: usize) -> f64 {
    (len as f64 / 1024.0 * 100.0).round() / 100.0
}
