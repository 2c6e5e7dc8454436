//! Document to fields pipeline.

use tracing::{debug, info};

use crate::document::DocumentText;
use crate::error::Result;
use crate::invoice::{ExtractionResult, FieldExtractionEngine, InvoiceExtractor, ResultMapping};
use crate::models::config::ExtractionConfig;
use crate::pdf::PdfExtractor;

/// Runs PDF text extraction, normalization and field extraction in sequence.
#[derive(Debug, Clone, Default)]
pub struct InvoicePipeline {
    engine: FieldExtractionEngine,
}

impl InvoicePipeline {
    pub fn new(engine: FieldExtractionEngine) -> Self {
        Self { engine }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(FieldExtractionEngine::from_config(config))
    }

    pub fn engine(&self) -> &FieldExtractionEngine {
        &self.engine
    }

    /// Extract fields from PDF bytes.
    ///
    /// Fails only when the document cannot be read; missing fields are part
    /// of the result.
    pub fn process(&self, data: &[u8], extra_fields: Option<&str>) -> Result<ExtractionResult> {
        debug!("processing {} byte document", data.len());
        let content = PdfExtractor::from_bytes(data)?;
        info!(
            "document has {} pages, {} chars of text",
            content.pages.len(),
            content.text.len()
        );
        Ok(self.process_text(&content.text, extra_fields))
    }

    /// Extract fields from already extracted text.
    pub fn process_text(&self, text: &DocumentText, extra_fields: Option<&str>) -> ExtractionResult {
        self.engine.extract_detailed(text, extra_fields)
    }
}

/// Extract fields from PDF bytes with the given settings.
pub fn process_document(
    data: &[u8],
    extra_fields: Option<&str>,
    config: &ExtractionConfig,
) -> Result<ResultMapping> {
    InvoicePipeline::from_config(config)
        .process(data, extra_fields)
        .map(|result| result.fields)
}
