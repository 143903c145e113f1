//! Separation of footnote definitions from body paragraphs.

use std::collections::HashSet;

use regex::Regex;

use crate::error::Result;
use crate::model::{Footnote, Paragraph};

/// Paragraphs with this many words or fewer are never footnotes.
const MIN_FOOTNOTE_WORDS: usize = 3;

/// Footnote definition pattern.
#[derive(Debug, Clone)]
pub struct FootnoteRules {
    definition: Regex,
}

impl FootnoteRules {
    /// Compile the built-in rules.
    pub fn new() -> Result<Self> {
        Ok(Self {
            definition: Regex::new(r"^(\d{1,3})[).]\s+(.*)$")?,
        })
    }

    /// Parse a paragraph as a footnote definition.
    ///
    /// Requires the `N.`/`N)` prefix and more than three words overall. The
    /// word count only screens out short numbered list items.
    pub fn parse(&self, paragraph: &str) -> Option<Footnote> {
        let caps = self.definition.captures(paragraph.trim())?;
        if paragraph.split_whitespace().count() <= MIN_FOOTNOTE_WORDS {
            return None;
        }
        Some(Footnote::new(&caps[1], caps[2].trim()))
    }
}

/// Body paragraphs and footnotes after splitting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitParagraphs {
    /// Body paragraphs in source order
    pub body: Vec<Paragraph>,
    /// Unique footnotes, first occurrence wins
    pub footnotes: Vec<Footnote>,
    /// Definitions discarded because their number was already seen
    pub duplicates: usize,
}

/// Move footnote definitions out of the paragraph stream.
///
/// Headings always stay in the body. Later definitions reusing a number are
/// dropped even when their text differs.
pub fn split_footnotes(paragraphs: Vec<Paragraph>, rules: &FootnoteRules) -> SplitParagraphs {
    let mut split = SplitParagraphs::default();
    let mut seen = HashSet::new();

    for paragraph in paragraphs {
        let footnote = paragraph.as_text().and_then(|text| rules.parse(text));
        match footnote {
            Some(footnote) => {
                if seen.insert(footnote.number.clone()) {
                    split.footnotes.push(footnote);
                } else {
                    log::debug!("dropping duplicate footnote {}", footnote.number);
                    split.duplicates += 1;
                }
            }
            None => split.body.push(paragraph),
        }
    }

    split
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Heading, HeadingLevel};

    fn rules() -> FootnoteRules {
        FootnoteRules::new().unwrap()
    }

    #[test]
    fn test_first_duplicate_wins() {
        let paragraphs = vec![
            Paragraph::text("1. First text here now"),
            Paragraph::text("Body paragraph."),
            Paragraph::text("1. Different text entirely"),
        ];
        let split = split_footnotes(paragraphs, &rules());
        assert_eq!(split.footnotes, vec![Footnote::new("1", "First text here now")]);
        assert_eq!(split.body, vec![Paragraph::text("Body paragraph.")]);
        assert_eq!(split.duplicates, 1);
    }

    #[test]
    fn test_short_numbered_items_stay_in_body() {
        let paragraphs = vec![
            Paragraph::text("1. Breach claims"),
            Paragraph::text("2) Unjust enrichment claim dismissed"),
        ];
        let split = split_footnotes(paragraphs, &rules());
        assert_eq!(split.body, vec![Paragraph::text("1. Breach claims")]);
        assert_eq!(
            split.footnotes,
            vec![Footnote::new("2", "Unjust enrichment claim dismissed")]
        );
    }

    #[test]
    fn test_order_and_headings_preserved() {
        let heading = Paragraph::Heading(Heading::new(HeadingLevel::Number, "1", "Four words are here"));
        let paragraphs = vec![
            heading.clone(),
            Paragraph::text("12) The trial court did not err."),
            Paragraph::text("Text between."),
            Paragraph::text("3. Defendant also argues that counsel was ineffective."),
        ];
        let split = split_footnotes(paragraphs, &rules());
        assert_eq!(split.body, vec![heading, Paragraph::text("Text between.")]);
        let numbers: Vec<&str> = split.footnotes.iter().map(|f| f.number.as_str()).collect();
        assert_eq!(numbers, vec!["12", "3"]);
    }

    #[test]
    fn test_four_digit_numbers_are_not_footnotes() {
        assert!(rules().parse("2019. The year the suit was filed").is_none());
        assert!(rules().parse("Not numbered at all here").is_none());
    }
}
