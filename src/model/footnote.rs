//! Footnote definitions separated from the opinion body.

use serde::{Deserialize, Serialize};

/// A footnote definition: its number as written and its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footnote {
    /// Footnote number (1-3 ASCII digits)
    pub number: String,

    /// Footnote text without the leading number and separator
    pub text: String,
}

impl Footnote {
    /// Create a new footnote.
    pub fn new(number: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            text: text.into(),
        }
    }

    /// Render as a Markdown footnote reference definition.
    pub fn to_markdown(&self) -> String {
        format!("[^{}]: {}", self.number, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footnote_markdown() {
        let note = Footnote::new("3", "See MCL 600.2912.");
        assert_eq!(note.to_markdown(), "[^3]: See MCL 600.2912.");
    }
}
