//! Rule-based field extraction engine.

use std::time::Instant;

use tracing::{debug, info, warn};

use super::profile::LayoutProfile;
use super::result::{FieldValue, ResultMapping};
use super::rules::{DynamicRuleBuilder, FIXED_FIELDS, FieldExtractor, parse_field_names};
use super::InvoiceExtractor;
use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;

/// Result of one extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Field name to value mapping.
    pub fields: ResultMapping,
    /// Problems contained at field level (e.g. unusable extra field names).
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Extraction engine running the fixed rules of a layout profile plus
/// caller-requested extra fields.
///
/// The engine holds no per-request state and can be shared freely.
#[derive(Debug, Clone)]
pub struct FieldExtractionEngine {
    profile: LayoutProfile,
    dynamic: DynamicRuleBuilder,
    max_extra_fields: usize,
}

impl FieldExtractionEngine {
    /// Create an engine with the default profile and limits.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create an engine from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            profile: config.profile,
            dynamic: DynamicRuleBuilder::new()
                .with_max_name_len(config.max_field_name_len)
                .with_size_limit(config.dynamic_pattern_size_limit),
            max_extra_fields: config.max_extra_fields,
        }
    }

    /// Set the layout profile.
    pub fn with_profile(mut self, profile: LayoutProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Set the builder used for extra field rules.
    pub fn with_dynamic_builder(mut self, builder: DynamicRuleBuilder) -> Self {
        self.dynamic = builder;
        self
    }

    /// Set the maximum number of distinct extra fields.
    pub fn with_max_extra_fields(mut self, max: usize) -> Self {
        self.max_extra_fields = max;
        self
    }

    pub fn profile(&self) -> LayoutProfile {
        self.profile
    }

    fn extract_extra_fields(
        &self,
        text: &str,
        field_list: &str,
        fields: &mut ResultMapping,
        warnings: &mut Vec<String>,
    ) {
        let names = parse_field_names(field_list);
        if names.len() > self.max_extra_fields {
            let e = ExtractionError::TooManyFields {
                requested: names.len(),
                limit: self.max_extra_fields,
            };
            warn!("{}", e);
            warnings.push(e.to_string());
        }

        for (i, name) in names.into_iter().enumerate() {
            // Past the cap the key is kept but no pattern is compiled.
            if i >= self.max_extra_fields {
                fields.insert(name, FieldValue::NotFound);
                continue;
            }
            let value = match self.dynamic.build(&name) {
                Ok(rule) => rule.evaluate(text),
                Err(e) => {
                    warn!("extra field {:?} skipped: {}", name, e);
                    warnings.push(e.to_string());
                    FieldValue::NotFound
                }
            };
            debug!("extra field {:?}: {:?}", name, value);
            fields.insert(name, value);
        }
    }
}

impl Default for FieldExtractionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceExtractor for FieldExtractionEngine {
    fn extract_detailed(&self, text: &str, extra_fields: Option<&str>) -> ExtractionResult {
        let start = Instant::now();
        let mut warnings = Vec::new();
        let mut fields = ResultMapping::with_capacity(FIXED_FIELDS.len());

        // Every fixed rule runs, whatever the others found.
        for rule in self.profile.rules() {
            let value = rule.evaluate(text);
            debug!("{} field {}: {:?}", self.profile, rule.name(), value);
            fields.insert(rule.name(), value);
        }

        if let Some(field_list) = extra_fields {
            self.extract_extra_fields(text, field_list, &mut fields, &mut warnings);
        }

        info!(
            "extracted {}/{} fields from {} bytes of text ({} profile)",
            fields.found_count(),
            fields.len(),
            text.len(),
            self.profile
        );

        ExtractionResult {
            fields,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::NOT_FOUND;
    use crate::invoice::rules::{
        CUSTOMER_ID, GROSS_AMOUNT, INVOICE_DATE, INVOICE_NUMBER, INVOICE_PERIOD,
    };
    use pretty_assertions::assert_eq;

    fn labeled() -> FieldExtractionEngine {
        FieldExtractionEngine::new().with_profile(LayoutProfile::Labeled)
    }

    #[test]
    fn test_tabular_row() {
        let text = "123456789 54321 01.02.2024 - 29.02.2024 1. März 2024";
        let fields = FieldExtractionEngine::new().extract(text, None);

        assert_eq!(fields.get_str(INVOICE_NUMBER), Some("123456789"));
        assert_eq!(fields.get_str(CUSTOMER_ID), Some("54321"));
        assert_eq!(fields.get_str(INVOICE_PERIOD), Some("01.02.2024 - 29.02.2024"));
        assert_eq!(fields.get_str(INVOICE_DATE), Some("1. März 2024"));
        assert_eq!(fields.get_str(GROSS_AMOUNT), Some(NOT_FOUND));
    }

    #[test]
    fn test_tabular_invoice() {
        let text = "Rechnung\n\
            Rechnungsnr. Kundennr. Zeitraum Datum\n\
            123100401 12345 01.02.2024 - 29.02.2024 1. März 2024\n\
            Net Amount 100,00 €\n\
            Gross Amount incl. VAT 119,00 €\n";

        let fields = FieldExtractionEngine::new().extract(text, Some("Net Amount"));

        assert_eq!(fields.get_str(INVOICE_NUMBER), Some("123100401"));
        assert_eq!(fields.get_str(GROSS_AMOUNT), Some("119,00 €"));
        assert_eq!(fields.get_str("Net Amount"), Some("100,00 €"));
    }

    #[test]
    fn test_labeled_invoice() {
        let text = "Invoice No: INV-777\nCustomer Number: C-99\n01.03.2024 - 31.03.2024\n150,00 €";
        let fields = labeled().extract(text, None);

        assert_eq!(fields.get_str(INVOICE_NUMBER), Some("INV-777"));
        assert_eq!(fields.get_str(CUSTOMER_ID), Some("C-99"));
        assert_eq!(fields.get_str(INVOICE_PERIOD), Some("01.03.2024 - 31.03.2024"));
        assert_eq!(fields.get_str(INVOICE_DATE), Some(NOT_FOUND));
        assert_eq!(fields.get_str(GROSS_AMOUNT), Some("150,00 €"));
    }

    #[test]
    fn test_labeled_prefers_labels() {
        let text = "Deposit 20,00 €\n\
            Invoice Date: 15 March 2024\n\
            Billing period: 01.03.2024 - 31.03.2024\n\
            Gross Amount incl. VAT 150,00 €";
        let fields = labeled().extract(text, None);

        assert_eq!(fields.get_str(INVOICE_DATE), Some("15 March 2024"));
        assert_eq!(fields.get_str(INVOICE_PERIOD), Some("01.03.2024 - 31.03.2024"));
        assert_eq!(fields.get_str(GROSS_AMOUNT), Some("150,00 €"));
    }

    #[test]
    fn test_fixed_rules_are_case_sensitive() {
        let fields = labeled().extract("invoice no: INV-1", None);
        assert_eq!(fields.get(INVOICE_NUMBER), Some(&FieldValue::NotFound));
    }

    #[test]
    fn test_empty_text() {
        for profile in LayoutProfile::ALL {
            let engine = FieldExtractionEngine::new().with_profile(profile);
            let fields = engine.extract("", None);

            assert_eq!(fields.keys().collect::<Vec<_>>(), FIXED_FIELDS);
            assert!(fields.iter().all(|(_, v)| *v == FieldValue::NotFound));
        }
    }

    #[test]
    fn test_extra_fields_order_and_dedup() {
        let fields = FieldExtractionEngine::new().extract("", Some("Tax, Tax"));
        assert_eq!(fields.len(), FIXED_FIELDS.len() + 1);
        assert_eq!(fields.get_str("Tax"), Some(NOT_FOUND));

        let fields = FieldExtractionEngine::new().extract("", Some(" Net , Tax,, Net,Shipping "));
        let keys: Vec<&str> = fields.keys().skip(FIXED_FIELDS.len()).collect();
        assert_eq!(keys, vec!["Net", "Tax", "Shipping"]);
    }

    #[test]
    fn test_empty_extra_field_list() {
        let fields = FieldExtractionEngine::new().extract("", Some(" , "));
        assert_eq!(fields.len(), FIXED_FIELDS.len());
    }

    #[test]
    fn test_extra_field_overrides_fixed_in_place() {
        let text = "invoice_number 42";
        let fields = FieldExtractionEngine::new().extract(text, Some("invoice_number"));

        assert_eq!(fields.len(), FIXED_FIELDS.len());
        assert_eq!(fields.keys().next(), Some(INVOICE_NUMBER));
        assert_eq!(fields.get_str(INVOICE_NUMBER), Some("42"));
    }

    #[test]
    fn test_special_characters_in_extra_field() {
        let text = "Total (USD) 1,234.50\nTotal USD 99";
        let fields = FieldExtractionEngine::new().extract(text, Some("Total (USD), [unclosed, a+"));

        assert_eq!(fields.get_str("Total (USD)"), Some("1,234.50"));
        assert_eq!(fields.get_str("[unclosed"), Some(NOT_FOUND));
        assert_eq!(fields.get_str("a+"), Some(NOT_FOUND));
    }

    #[test]
    fn test_unusable_extra_field_is_contained() {
        let engine = FieldExtractionEngine::new()
            .with_dynamic_builder(DynamicRuleBuilder::new().with_max_name_len(3));
        let result = engine.extract_detailed("Tax 5\nShipping 7", Some("Tax, Shipping"));

        assert_eq!(result.fields.get_str("Tax"), Some("5"));
        assert_eq!(result.fields.get_str("Shipping"), Some(NOT_FOUND));
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_fields_beyond_cap_are_kept_as_not_found() {
        let engine = FieldExtractionEngine::new().with_max_extra_fields(1);
        let result = engine.extract_detailed("a 1\nb 2", Some("a, b"));
        assert_eq!(result.fields.get_str("a"), Some("1"));
        assert_eq!(result.fields.get_str("b"), Some(NOT_FOUND));
        assert_eq!(result.warnings.len(), 1);

        let names: Vec<String> = (0..70).map(|i| format!("F{}", i)).collect();
        let result = FieldExtractionEngine::new().extract_detailed("", Some(&names.join(",")));
        assert_eq!(result.fields.len(), FIXED_FIELDS.len() + 70);
        assert!(result.fields.contains_key("F69"));
        assert!(result.warnings[0].contains("70 extra fields"));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let text = "Invoice No: INV-1\nVAT 19,00 €";
        let engine = labeled();
        assert_eq!(engine.extract(text, Some("VAT")), engine.extract(text, Some("VAT")));
    }

    #[test]
    fn test_json_output() {
        let text = "123456789 54321 01.02.2024 - 29.02.2024 1. März 2024";
        let fields = FieldExtractionEngine::new().extract(text, Some("Tax"));
        let json = serde_json::to_string(&fields).unwrap();

        assert_eq!(
            json,
            r#"{"invoice_number":"123456789","customer_id":"54321","invoice_period":"01.02.2024 - 29.02.2024","invoice_date":"1. März 2024","gross_amount_incl_vat":"Not found","Tax":"Not found"}"#
        );
    }
}
