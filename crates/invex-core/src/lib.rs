//! Core library for invoice field extraction.
//!
//! This crate provides:
//! - PDF text extraction and page normalization
//! - Rule-based extraction of invoice number, customer id, billing period,
//!   invoice date and gross amount, with selectable layout profiles
//! - Extraction of caller-named extra fields, matched literally

pub mod document;
pub mod error;
pub mod invoice;
pub mod models;
#[cfg(feature = "pdf")]
pub mod pdf;
#[cfg(feature = "pdf")]
pub mod pipeline;

pub use document::DocumentText;
pub use error::{ExtractionError, InvexError, PdfError, Result};
pub use invoice::{
    ExtractionResult, FieldExtractionEngine, FieldValue, InvoiceExtractor, LayoutProfile,
    NOT_FOUND, ResultMapping,
};
pub use models::config::{ExtractionConfig, InvexConfig, ServerConfig};
#[cfg(feature = "pdf")]
pub use pdf::{PdfContent, PdfExtractor, PdfProcessor};
#[cfg(feature = "pdf")]
pub use pipeline::{InvoicePipeline, process_document};
