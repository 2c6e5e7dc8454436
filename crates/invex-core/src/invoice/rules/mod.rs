//! Rule-based field extractors.

pub mod dynamic;
pub mod patterns;

pub use dynamic::{DynamicRuleBuilder, parse_field_names};

use std::borrow::Cow;

use regex::Regex;

use super::result::FieldValue;

/// Output key for the invoice number.
pub const INVOICE_NUMBER: &str = "invoice_number";
/// Output key for the customer id.
pub const CUSTOMER_ID: &str = "customer_id";
/// Output key for the billing period.
pub const INVOICE_PERIOD: &str = "invoice_period";
/// Output key for the invoice date.
pub const INVOICE_DATE: &str = "invoice_date";
/// Output key for the gross amount including VAT.
pub const GROSS_AMOUNT: &str = "gross_amount_incl_vat";

/// Names of the fixed fields, in output order.
pub const FIXED_FIELDS: [&str; 5] = [
    INVOICE_NUMBER,
    CUSTOMER_ID,
    INVOICE_PERIOD,
    INVOICE_DATE,
    GROSS_AMOUNT,
];

/// Trait for field extractors.
pub trait FieldExtractor {
    /// Output key of the field.
    fn name(&self) -> &str;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<String>;

    /// Extract the field, falling back to [`FieldValue::NotFound`].
    fn evaluate(&self, text: &str) -> FieldValue {
        self.extract(text).into()
    }
}

/// A pattern plus the capture group that supplies the value.
#[derive(Debug, Clone)]
pub struct Locator {
    pattern: Regex,
    group: usize,
}

impl Locator {
    pub fn new(pattern: Regex, group: usize) -> Self {
        Self { pattern, group }
    }

    /// Trimmed text of the designated group of the first match.
    ///
    /// Returns `None` when nothing matches or the group did not participate.
    pub fn find(&self, text: &str) -> Option<String> {
        let caps = self.pattern.captures(text)?;
        caps.get(self.group).map(|m| m.as_str().trim().to_string())
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn group(&self) -> usize {
        self.group
    }
}

/// A named field with one or more locators tried in order.
#[derive(Debug, Clone)]
pub struct FieldRule {
    name: Cow<'static, str>,
    locators: Vec<Locator>,
    case_sensitive: bool,
}

impl FieldRule {
    /// Case-sensitive rule with a single locator.
    pub fn new(name: impl Into<Cow<'static, str>>, pattern: &Regex, group: usize) -> Self {
        Self {
            name: name.into(),
            locators: vec![Locator::new(pattern.clone(), group)],
            case_sensitive: true,
        }
    }

    /// Add a fallback locator, tried when the earlier ones find nothing.
    pub fn or_else(mut self, pattern: &Regex, group: usize) -> Self {
        self.locators.push(Locator::new(pattern.clone(), group));
        self
    }

    /// Mark the rule as matching case-insensitively.
    ///
    /// The flag is descriptive; the locators must have been compiled with it.
    pub(crate) fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    pub fn locators(&self) -> &[Locator] {
        &self.locators
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }
}

impl FieldExtractor for FieldRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract(&self, text: &str) -> Option<String> {
        self.locators.iter().find_map(|locator| locator.find(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_trims_group() {
        let re = Regex::new(r"Total:(.*)").unwrap();
        let locator = Locator::new(re, 1);
        assert_eq!(locator.find("Total:   42  "), Some("42".to_string()));
    }

    #[test]
    fn test_locator_group_not_participating() {
        let re = Regex::new(r"(a)|(b)").unwrap();
        let locator = Locator::new(re, 1);
        assert_eq!(locator.find("b"), None);
    }

    #[test]
    fn test_rule_falls_back_to_next_locator() {
        let labeled = Regex::new(r"No\.\s*(\d+)").unwrap();
        let bare = Regex::new(r"#(\d+)").unwrap();
        let rule = FieldRule::new("number", &labeled, 1).or_else(&bare, 1);

        assert_eq!(rule.extract("No. 12 #34"), Some("12".to_string()));
        assert_eq!(rule.extract("ref #34"), Some("34".to_string()));
        assert_eq!(rule.evaluate("nothing"), FieldValue::NotFound);
        assert!(rule.is_case_sensitive());
    }
}
