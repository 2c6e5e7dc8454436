//! PDF text extraction using lopdf.

use lopdf::Document;
use tracing::debug;

use super::{PdfProcessor, Result};
use crate::document::DocumentText;
use crate::error::PdfError;

/// PDF text extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
}

/// Extracted content from a PDF.
#[derive(Debug, Clone)]
pub struct PdfContent {
    /// Pages with their text.
    pub pages: Vec<PdfPage>,
    /// Normalized text of the whole document.
    pub text: DocumentText,
}

/// Content from a single PDF page.
#[derive(Debug, Clone)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text from this page (empty when the page has none).
    pub text: String,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self { document: None }
    }

    /// Load a PDF and extract the text of all pages.
    pub fn from_bytes(data: &[u8]) -> Result<PdfContent> {
        let mut extractor = Self::new();
        extractor.load(data)?;
        extractor.extract_all()
    }

    /// Extract the text of every page plus the normalized document text.
    pub fn extract_all(&self) -> Result<PdfContent> {
        let texts = self.page_texts()?;
        let text = DocumentText::from_pages(&texts);

        let pages = texts
            .into_iter()
            .zip(1u32..)
            .map(|(text, number)| PdfPage { number, text })
            .collect::<Vec<_>>();

        debug!(
            "PDF text: {} pages, {} with text, {} chars",
            pages.len(),
            pages.iter().filter(|p| !p.text.is_empty()).count(),
            text.len()
        );

        Ok(PdfContent { pages, text })
    }

    fn document(&self) -> Result<&Document> {
        self.document.as_ref().ok_or(PdfError::NotLoaded)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");
        }

        debug!("Loaded PDF with {} pages", doc.get_pages().len());
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;
        if !doc.get_pages().contains_key(&page) {
            return Err(PdfError::InvalidPage(page));
        }

        let text = doc
            .extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        // lopdf ends every text object with a line break; the normalizer
        // adds the page separator itself.
        Ok(text.trim_end_matches(['\n', '\r']).to_string())
    }
}
