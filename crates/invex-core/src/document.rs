//! Document text normalization.
//!
//! Page texts coming out of a text-extraction backend are folded into one
//! immutable [`DocumentText`] which every extraction rule runs against.

use std::fmt;
use std::ops::Deref;

use tracing::trace;

/// Normalized text of a whole document.
///
/// Each page that yielded text is followed by a single `'\n'`, in page order.
/// Pages without text contribute nothing, so a document with no text at all
/// normalizes to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentText(String);

impl DocumentText {
    /// Build document text from ordered page texts.
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        let mut included = 0usize;

        for (idx, page) in pages.into_iter().enumerate() {
            let page = page.as_ref();
            trace!("page {}: {} bytes of text", idx + 1, page.len());
            if page.is_empty() {
                continue;
            }
            text.push_str(page);
            text.push('\n');
            included += 1;
        }

        trace!("normalized {} pages into {} bytes", included, text.len());
        Self(text)
    }

    /// Wrap text that was already extracted elsewhere.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for DocumentText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DocumentText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_joined_with_trailing_newline() {
        let text = DocumentText::from_pages(["first page", "second page"]);
        assert_eq!(text.as_str(), "first page\nsecond page\n");
    }

    #[test]
    fn test_empty_pages_are_skipped() {
        let text = DocumentText::from_pages(["", "only text", ""]);
        assert_eq!(text.as_str(), "only text\n");
    }

    #[test]
    fn test_no_pages() {
        let text = DocumentText::from_pages(Vec::<String>::new());
        assert!(text.is_empty());

        let text = DocumentText::from_pages(["", ""]);
        assert!(text.is_empty());
    }

    #[test]
    fn test_whitespace_page_is_kept() {
        // Only pages with no text at all are dropped.
        let text = DocumentText::from_pages([" ", "a"]);
        assert_eq!(text.as_str(), " \na\n");
    }
}
