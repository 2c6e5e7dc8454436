//! Layout profiles selecting the fixed rule set.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use super::rules::patterns::{
    CUSTOMER_ID_LABELED, EURO_AMOUNT, GROSS_AMOUNT_LABELED, INVOICE_DATE_LABELED,
    INVOICE_NUMBER_LABELED, INVOICE_PERIOD_LABELED, PERIOD_BARE, TABLE_ROW,
};
use super::rules::{
    CUSTOMER_ID, FieldRule, GROSS_AMOUNT, INVOICE_DATE, INVOICE_NUMBER, INVOICE_PERIOD,
};
use crate::error::ExtractionError;

lazy_static! {
    static ref TABULAR_RULES: Vec<FieldRule> = vec![
        FieldRule::new(INVOICE_NUMBER, &TABLE_ROW, 1),
        FieldRule::new(CUSTOMER_ID, &TABLE_ROW, 2),
        FieldRule::new(INVOICE_PERIOD, &TABLE_ROW, 3),
        FieldRule::new(INVOICE_DATE, &TABLE_ROW, 4),
        FieldRule::new(GROSS_AMOUNT, &GROSS_AMOUNT_LABELED, 1),
    ];

    static ref LABELED_RULES: Vec<FieldRule> = vec![
        FieldRule::new(INVOICE_NUMBER, &INVOICE_NUMBER_LABELED, 1),
        FieldRule::new(CUSTOMER_ID, &CUSTOMER_ID_LABELED, 1),
        FieldRule::new(INVOICE_PERIOD, &INVOICE_PERIOD_LABELED, 1).or_else(&PERIOD_BARE, 1),
        FieldRule::new(INVOICE_DATE, &INVOICE_DATE_LABELED, 1),
        FieldRule::new(GROSS_AMOUNT, &GROSS_AMOUNT_LABELED, 1).or_else(&EURO_AMOUNT, 1),
    ];
}

/// Which document layout the fixed rules expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutProfile {
    /// Invoice number, customer id, period and date on one table row,
    /// gross amount after its label.
    #[default]
    Tabular,
    /// Every field introduced by a free-text label.
    Labeled,
}

impl LayoutProfile {
    pub const ALL: [LayoutProfile; 2] = [LayoutProfile::Tabular, LayoutProfile::Labeled];

    /// Fixed rules of this profile, in output order.
    pub fn rules(self) -> &'static [FieldRule] {
        match self {
            LayoutProfile::Tabular => TABULAR_RULES.as_slice(),
            LayoutProfile::Labeled => LABELED_RULES.as_slice(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutProfile::Tabular => "tabular",
            LayoutProfile::Labeled => "labeled",
        }
    }
}

impl fmt::Display for LayoutProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutProfile {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tabular" | "table" => Ok(LayoutProfile::Tabular),
            "labeled" | "labelled" | "label" => Ok(LayoutProfile::Labeled),
            other => Err(ExtractionError::UnknownProfile(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::rules::{FIXED_FIELDS, FieldExtractor};

    #[test]
    fn test_profiles_cover_fixed_fields_in_order() {
        for profile in LayoutProfile::ALL {
            let names: Vec<&str> = profile.rules().iter().map(|r| r.name()).collect();
            assert_eq!(names, FIXED_FIELDS);
            assert!(profile.rules().iter().all(|r| r.is_case_sensitive()));
        }
    }

    #[test]
    fn test_labeled_period_falls_back_to_bare_range() {
        let period = &LayoutProfile::Labeled.rules()[2];
        assert_eq!(period.locators().len(), 2);
        assert_eq!(
            period.extract("Billing period: 01.02.2024 - 29.02.2024"),
            Some("01.02.2024 - 29.02.2024".to_string())
        );
        assert_eq!(
            period.extract("Zeitraum 01.03.2024 - 31.03.2024"),
            Some("01.03.2024 - 31.03.2024".to_string())
        );
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!("Tabular".parse::<LayoutProfile>().unwrap(), LayoutProfile::Tabular);
        assert_eq!(" labelled ".parse::<LayoutProfile>().unwrap(), LayoutProfile::Labeled);
        assert!("columns".parse::<LayoutProfile>().is_err());
    }

    #[test]
    fn test_profile_serde() {
        let json = serde_json::to_string(&LayoutProfile::Labeled).unwrap();
        assert_eq!(json, "\"labeled\"");
        let profile: LayoutProfile = serde_json::from_str("\"tabular\"").unwrap();
        assert_eq!(profile, LayoutProfile::Tabular);
    }
}
