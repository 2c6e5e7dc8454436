//! Common regex patterns for invoice field extraction.
//!
//! Fixed patterns are case-sensitive. Fragments shared between patterns are
//! kept as string constants and spliced in when the statics are compiled.

use lazy_static::lazy_static;
use regex::Regex;

/// `01.02.2024 - 29.02.2024`
pub const PERIOD_FRAGMENT: &str = r"\d{2}\.\d{2}\.\d{4}\s*-\s*\d{2}\.\d{2}\.\d{4}";

/// `1. März 2024`, `15 March 2024` or `01.03.2024`
pub const DATE_FRAGMENT: &str =
    r"\d{1,2}\.?\s*[A-Za-zÄÖÜäöüß]+\.?\s+\d{4}|\d{2}\.\d{2}\.\d{4}";

/// Identifier starting and ending with an alphanumeric (`INV-777`, `C-99`).
pub const IDENTIFIER_FRAGMENT: &str = r"[A-Za-z0-9](?:[A-Za-z0-9/\-_.]*[A-Za-z0-9])?";

/// Euro amount such as `150,00 €` or `1.234,56€`.
pub const EURO_AMOUNT_FRAGMENT: &str = r"\d[\d.,]*\s?€";

/// Value following a caller-supplied field name: digits with separators
/// (`.50` included) and an optional currency glyph.
pub const DYNAMIC_VALUE_FRAGMENT: &str = r"\s*([\d.,]*\d[\d.,]*\s?[€$£]?)";

lazy_static! {
    // Tabular layout: one row carrying four of the fields.
    // 123100401 12345 01.02.2024 - 29.02.2024 1. März 2024
    pub static ref TABLE_ROW: Regex = Regex::new(&format!(
        r"\b(\d{{9}})\s+(\d+)\s+({PERIOD_FRAGMENT})\s+({DATE_FRAGMENT})"
    )).unwrap();

    pub static ref GROSS_AMOUNT_LABELED: Regex = Regex::new(&format!(
        r"Gross Amount incl\. VAT\s*:?\s+({EURO_AMOUNT_FRAGMENT})"
    )).unwrap();

    // Labeled layout: free text with "Label: value" pairs.
    pub static ref INVOICE_NUMBER_LABELED: Regex = Regex::new(&format!(
        r"Invoice (?:No\.?|Number|#)\s*:?\s*({IDENTIFIER_FRAGMENT})"
    )).unwrap();

    pub static ref CUSTOMER_ID_LABELED: Regex = Regex::new(&format!(
        r"Customer (?:No\.?|Number|ID|Id)\s*:?\s*({IDENTIFIER_FRAGMENT})"
    )).unwrap();

    pub static ref INVOICE_PERIOD_LABELED: Regex = Regex::new(&format!(
        r"(?:Invoice|Billing|Service) [Pp]eriod\s*:?\s*({PERIOD_FRAGMENT})"
    )).unwrap();

    pub static ref PERIOD_BARE: Regex = Regex::new(&format!(
        r"({PERIOD_FRAGMENT})"
    )).unwrap();

    pub static ref INVOICE_DATE_LABELED: Regex = Regex::new(&format!(
        r"Invoice [Dd]ate\s*:?\s*({DATE_FRAGMENT})"
    )).unwrap();

    pub static ref EURO_AMOUNT: Regex = Regex::new(&format!(
        r"({EURO_AMOUNT_FRAGMENT})"
    )).unwrap();
}
