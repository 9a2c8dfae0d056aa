use tracing::info;

use crate::correction::CorrectionClient;
use crate::ocr::{OcrClient, OcrError};

/// OCR followed by optional correction.
///
/// OCR failures are returned as errors; correction never fails.
#[derive(Debug, Clone)]
pub struct ScanPipeline {
    ocr: OcrClient,
    correction: Option<CorrectionClient>,
}

impl ScanPipeline {
    pub fn new(ocr: OcrClient, correction: Option<CorrectionClient>) -> Self {
        Self { ocr, correction }
    }

    pub async fn extract(&self, data: &[u8]) -> Result<String, OcrError> {
        let text = self.ocr.extract_text(data).await?;

        match &self.correction {
            Some(correction) => {
                info!("Running correction on OCR output");
                Ok(correction.correct(&text).await)
            }
            None => Ok(text),
        }
    }
}
