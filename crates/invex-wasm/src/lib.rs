//! WASM bindings for invoice field extraction.
//!
//! Works on text that was already extracted from the document; PDF parsing
//! is left to the host.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use invex_core::invoice::rules::FIXED_FIELDS;
use invex_core::{ExtractionResult, FieldExtractionEngine, InvoiceExtractor, LayoutProfile};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Names of the fields every extraction returns, in output order.
#[wasm_bindgen]
pub fn fixed_field_names() -> Vec<String> {
    FIXED_FIELDS.iter().map(|s| s.to_string()).collect()
}

/// Extract invoice fields from text.
///
/// Returns a plain object mapping field names to values or `"Not found"`.
/// Throws only for an unknown profile name.
#[wasm_bindgen]
pub fn extract_fields(
    text: &str,
    extra_fields: Option<String>,
    profile: Option<String>,
) -> Result<JsValue, JsValue> {
    let engine = engine_for(profile.as_deref())?;
    to_js(&engine.extract(text, extra_fields.as_deref()))
}

/// Reusable extractor bound to one layout profile.
#[wasm_bindgen]
pub struct InvexExtractor {
    engine: FieldExtractionEngine,
}

#[wasm_bindgen]
impl InvexExtractor {
    /// Create an extractor; `profile` defaults to `tabular`.
    #[wasm_bindgen(constructor)]
    pub fn new(profile: Option<String>) -> Result<InvexExtractor, JsValue> {
        Ok(Self {
            engine: engine_for(profile.as_deref())?,
        })
    }

    /// Name of the active profile.
    #[wasm_bindgen(getter)]
    pub fn profile(&self) -> String {
        self.engine.profile().to_string()
    }

    /// Extract fields from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str, extra_fields: Option<String>) -> Result<JsValue, JsValue> {
        to_js(&self.engine.extract(text, extra_fields.as_deref()))
    }

    /// Extract fields along with warnings and timing.
    #[wasm_bindgen]
    pub fn extract_with_metadata(
        &self,
        text: &str,
        extra_fields: Option<String>,
    ) -> Result<JsValue, JsValue> {
        let result = self.engine.extract_detailed(text, extra_fields.as_deref());
        to_js(&ExtractOutput::from(result))
    }
}

#[derive(Serialize)]
struct ExtractOutput {
    fields: invex_core::ResultMapping,
    warnings: Vec<String>,
    processing_time_ms: u64,
}

impl From<ExtractionResult> for ExtractOutput {
    fn from(result: ExtractionResult) -> Self {
        Self {
            fields: result.fields,
            warnings: result.warnings,
            processing_time_ms: result.processing_time_ms,
        }
    }
}

fn parse_profile(profile: Option<&str>) -> Result<LayoutProfile, String> {
    match profile {
        Some(name) => name.parse().map_err(|e: invex_core::ExtractionError| e.to_string()),
        None => Ok(LayoutProfile::default()),
    }
}

fn engine_for(profile: Option<&str>) -> Result<FieldExtractionEngine, JsValue> {
    let profile = parse_profile(profile).map_err(|e| JsValue::from_str(&e))?;
    Ok(FieldExtractionEngine::new().with_profile(profile))
}

// Maps become plain objects rather than JS `Map`s.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fixed_field_names() {
        assert_eq!(
            fixed_field_names(),
            vec![
                "invoice_number",
                "customer_id",
                "invoice_period",
                "invoice_date",
                "gross_amount_incl_vat",
            ]
        );
    }

    #[test]
    fn test_parse_profile() {
        assert_eq!(parse_profile(None), Ok(LayoutProfile::Tabular));
        assert_eq!(parse_profile(Some("labeled")), Ok(LayoutProfile::Labeled));
        assert!(parse_profile(Some("columns")).unwrap_err().contains("columns"));
    }
}
