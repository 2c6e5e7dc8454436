//! Error types for the invex-core library.

use thiserror::Error;

/// Main error type for the invex library.
#[derive(Error, Debug)]
pub enum InvexError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from a page.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// No document has been loaded yet.
    #[error("no document loaded")]
    NotLoaded,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to building extraction rules.
///
/// These never abort an extraction: the engine contains them per field and
/// records the field as not found.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A caller-supplied field name could not be turned into a locator.
    #[error("invalid field name {field:?}: {reason}")]
    InvalidFieldName { field: String, reason: String },

    /// A caller-supplied field name exceeds the configured length.
    #[error("field name is {len} characters long (limit {limit})")]
    FieldNameTooLong { len: usize, limit: usize },

    /// More distinct extra fields were requested than are evaluated.
    #[error("{requested} extra fields requested, only the first {limit} are evaluated")]
    TooManyFields { requested: usize, limit: usize },

    /// Unknown layout profile name.
    #[error("unknown layout profile: {0}")]
    UnknownProfile(String),
}

impl InvexError {
    /// Whether the error means the uploaded document itself is unusable.
    pub fn is_document_error(&self) -> bool {
        matches!(self, InvexError::Pdf(_))
    }
}

/// Result type for the invex library.
pub type Result<T> = std::result::Result<T, InvexError>;
