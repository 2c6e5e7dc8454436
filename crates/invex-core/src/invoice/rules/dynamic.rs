//! Rules synthesized at request time from caller-supplied field names.
//!
//! Field names are untrusted. They are always escaped before being spliced
//! into a pattern, so a name can only ever match itself literally.

use regex::RegexBuilder;
use tracing::debug;

use super::FieldRule;
use super::patterns::DYNAMIC_VALUE_FRAGMENT;
use crate::error::ExtractionError;

/// Default cap on the length of a single field name, in characters.
pub const DEFAULT_MAX_NAME_LEN: usize = 128;

/// Default compiled size limit for one dynamic pattern.
pub const DEFAULT_SIZE_LIMIT: usize = 1 << 20;

/// Split a comma-separated field list into distinct, trimmed names.
///
/// Empty tokens are dropped and repeated names collapse onto their first
/// appearance.
pub fn parse_field_names(field_list: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for token in field_list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !names.iter().any(|n| n == token) {
            names.push(token.to_string());
        }
    }

    names
}

/// Builds case-insensitive rules anchored on a literal field name.
#[derive(Debug, Clone)]
pub struct DynamicRuleBuilder {
    max_name_len: usize,
    size_limit: usize,
}

impl DynamicRuleBuilder {
    pub fn new() -> Self {
        Self {
            max_name_len: DEFAULT_MAX_NAME_LEN,
            size_limit: DEFAULT_SIZE_LIMIT,
        }
    }

    /// Set the maximum accepted field name length.
    pub fn with_max_name_len(mut self, max_name_len: usize) -> Self {
        self.max_name_len = max_name_len;
        self
    }

    /// Set the compiled size limit for each pattern.
    pub fn with_size_limit(mut self, size_limit: usize) -> Self {
        self.size_limit = size_limit;
        self
    }

    /// Build the rule for one field name.
    pub fn build(&self, name: &str) -> Result<FieldRule, ExtractionError> {
        let len = name.chars().count();
        if len > self.max_name_len {
            return Err(ExtractionError::FieldNameTooLong {
                len,
                limit: self.max_name_len,
            });
        }

        let pattern = format!("{}{}", regex::escape(name), DYNAMIC_VALUE_FRAGMENT);
        debug!("dynamic rule {:?} -> {}", name, pattern);

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .size_limit(self.size_limit)
            .build()
            .map_err(|e| ExtractionError::InvalidFieldName {
                field: name.to_string(),
                reason: e.to_string(),
            })?;

        Ok(FieldRule::new(name.to_string(), &regex, 1).case_insensitive())
    }
}

impl Default for DynamicRuleBuilder {
    fn default() -> Self {
        Self::new()
    }
}
