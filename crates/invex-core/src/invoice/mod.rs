//! Invoice field extraction module.

mod engine;
pub mod profile;
pub mod result;
pub mod rules;

pub use engine::{ExtractionResult, FieldExtractionEngine};
pub use profile::LayoutProfile;
pub use result::{FieldValue, NOT_FOUND, ResultMapping};

/// Trait for invoice field extractors.
pub trait InvoiceExtractor {
    /// Extract the fixed fields plus the comma-separated `extra_fields`,
    /// reporting contained problems alongside the mapping.
    fn extract_detailed(&self, text: &str, extra_fields: Option<&str>) -> ExtractionResult;

    /// Extract the fixed fields plus the comma-separated `extra_fields`.
    ///
    /// Never fails: fields that cannot be found are recorded as
    /// [`FieldValue::NotFound`].
    fn extract(&self, text: &str, extra_fields: Option<&str>) -> ResultMapping {
        self.extract_detailed(text, extra_fields).fields
    }
}
