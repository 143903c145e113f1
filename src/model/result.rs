//! Conversion outputs and statistics.

use serde::{Deserialize, Serialize};

use super::{Footnote, Metadata};
use crate::error::Result;

/// Output of a successful conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    /// Assembled Markdown, terminated by exactly one newline
    pub markdown: String,

    /// Metadata captured from the first page
    pub metadata: Metadata,

    /// Footnotes separated from the body, in first-seen order
    pub footnotes: Vec<Footnote>,

    /// Statistics collected along the pipeline
    pub stats: ConversionStats,
}

/// Result shape handed to callers: success flag plus optional payloads.
///
/// Built once per document. A failed conversion carries neither Markdown
/// nor metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Whether the conversion completed
    pub success: bool,

    /// Markdown document, present only on success
    pub markdown: Option<String>,

    /// Metadata record, present only on success
    pub metadata: Option<Metadata>,
}

impl ConversionResult {
    /// Result of a failed conversion.
    pub fn failed() -> Self {
        Self {
            success: false,
            markdown: None,
            metadata: None,
        }
    }
}

impl From<Conversion> for ConversionResult {
    fn from(conversion: Conversion) -> Self {
        Self {
            success: true,
            markdown: Some(conversion.markdown),
            metadata: Some(conversion.metadata),
        }
    }
}

impl From<Result<Conversion>> for ConversionResult {
    fn from(result: Result<Conversion>) -> Self {
        match result {
            Ok(conversion) => conversion.into(),
            Err(err) => {
                log::error!("conversion failed: {}", err);
                Self::failed()
            }
        }
    }
}

/// Statistics collected during a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Number of input pages
    pub page_count: u32,

    /// Lines dropped as institutional boilerplate
    pub boilerplate_lines: u32,

    /// Index of the first body line in the joined line sequence
    pub body_start_line: u32,

    /// Body paragraphs emitted (headings included)
    pub paragraph_count: u32,

    /// Headings among the body paragraphs
    pub heading_count: u32,

    /// Footnote definitions kept
    pub footnote_count: u32,

    /// Footnote definitions dropped as duplicates
    pub duplicate_footnotes: u32,

    /// Inline footnote markers inserted
    pub inline_references: u32,

    /// Approximate word count of the Markdown
    pub word_count: u32,

    /// Non-whitespace characters in the Markdown
    pub char_count: u32,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn sample() -> Conversion {
        Conversion {
            markdown: "Affirmed.\n".to_string(),
            metadata: Metadata::new(),
            footnotes: Vec::new(),
            stats: ConversionStats::new(),
        }
    }

    #[test]
    fn test_result_from_success() {
        let result = ConversionResult::from(sample());
        assert!(result.success);
        assert_eq!(result.markdown.as_deref(), Some("Affirmed.\n"));
        assert!(result.metadata.is_some());
    }

    #[test]
    fn test_result_from_failure_has_no_payload() {
        let outcome: Result<Conversion> = Err(Error::Extraction("unreadable".into()));
        let result = ConversionResult::from(outcome);
        assert!(!result.success);
        assert!(result.markdown.is_none());
        assert!(result.metadata.is_none());
    }

    #[test]
    fn test_stats_count_text() {
        let mut stats = ConversionStats::new();
        stats.count_text("Hello, world! This is a test.");
        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 24);
    }
}
