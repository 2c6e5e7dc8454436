//! PDF processing module.

mod extractor;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use extractor::{PdfContent, PdfExtractor, PdfPage};

use tracing::warn;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF text extraction backends.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;

    /// Extract the text of every page, in page order.
    ///
    /// A page whose text cannot be decoded yields an empty string.
    fn page_texts(&self) -> Result<Vec<String>> {
        (1..=self.page_count())
            .map(|page| match self.extract_page_text(page) {
                Ok(text) => Ok(text),
                Err(PdfError::TextExtraction(e)) => {
                    warn!("no text from page {}: {}", page, e);
                    Ok(String::new())
                }
                Err(e) => Err(e),
            })
            .collect()
    }
}
