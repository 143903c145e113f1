//! Plain-text page source.

use crate::error::{Error, Result};
use std::path::Path;

use super::PageSource;

/// Page separator written by common PDF-to-text tools.
pub const FORM_FEED: char = '\u{000C}';

/// Reads UTF-8 text dumps whose pages are separated by form feeds.
///
/// A dump without form feeds is a single page.
#[derive(Debug, Clone, Default)]
pub struct PlainTextSource {
    _private: (),
}

impl PlainTextSource {
    /// Create a new plain-text source.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Split text into pages.
    ///
    /// The empty page after a final form feed is dropped.
    pub fn split_pages(text: &str) -> Vec<String> {
        let text = text.replace("\r\n", "\n");
        let mut pages: Vec<String> = text.split(FORM_FEED).map(str::to_string).collect();
        if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
            pages.pop();
        }
        pages
    }
}

impl PageSource for PlainTextSource {
    fn name(&self) -> &str {
        "text"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn pages(&self, path: &Path) -> Result<Vec<String>> {
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| Error::Extraction(format!("{}: not UTF-8 text: {}", path.display(), e)))?;
        Ok(Self::split_pages(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_form_feed() {
        let pages = PlainTextSource::split_pages("page one\n\u{000C}page two\n\u{000C}");
        assert_eq!(pages, vec!["page one\n", "page two\n"]);
    }

    #[test]
    fn test_single_page_and_crlf() {
        assert_eq!(PlainTextSource::split_pages("a\r\nb"), vec!["a\nb"]);
        assert_eq!(PlainTextSource::split_pages(""), vec![""]);
    }

    #[test]
    fn test_source_identity() {
        let source = PlainTextSource::new();
        assert_eq!(source.name(), "text");
        assert!(source.supports_extension("TXT"));
        assert!(!source.supports_extension("pdf"));
    }
}
