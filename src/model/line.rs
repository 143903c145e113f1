//! Classified lines and reflowed paragraphs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outline level of a heading, ordered from outermost to innermost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Upper-case Roman numeral (`I.`, `II.`)
    Roman,
    /// Single capital letter (`A.`, `B.`)
    Letter,
    /// One- or two-digit Arabic number (`1.`, `12.`)
    Number,
    /// Lower-case Roman numeral (`i.`, `iv.`)
    LowerRoman,
}

impl HeadingLevel {
    /// Markdown heading depth (1-4).
    pub fn depth(self) -> usize {
        match self {
            HeadingLevel::Roman => 1,
            HeadingLevel::Letter => 2,
            HeadingLevel::Number => 3,
            HeadingLevel::LowerRoman => 4,
        }
    }

    /// Leading `#` marker for this level.
    pub fn marker(self) -> String {
        "#".repeat(self.depth())
    }
}

/// An outline heading recognized from a source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Outline level
    pub level: HeadingLevel,

    /// Numbering token as written, without the trailing period
    pub token: String,

    /// Heading text after the numbering token
    pub text: String,
}

impl Heading {
    /// Create a new heading.
    pub fn new(level: HeadingLevel, token: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            level,
            token: token.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}. {}", self.level.marker(), self.token, self.text)
    }
}

/// A physical source line after heading classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Empty or whitespace-only line
    Blank,
    /// Outline heading
    Heading(Heading),
    /// Any other line, right-trimmed
    Text(String),
}

/// A logical paragraph produced by reflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paragraph {
    /// A heading, always emitted on its own
    Heading(Heading),
    /// Body text joined from one or more source lines
    Text(String),
}

impl Paragraph {
    /// Create a text paragraph.
    pub fn text(text: impl Into<String>) -> Self {
        Paragraph::Text(text.into())
    }

    /// Check if this paragraph is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Paragraph::Heading(_))
    }

    /// Body text, if this is a text paragraph.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Paragraph::Text(text) => Some(text),
            Paragraph::Heading(_) => None,
        }
    }
}

impl fmt::Display for Paragraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Paragraph::Heading(heading) => heading.fmt(f),
            Paragraph::Text(text) => f.write_str(text),
        }
    }
}
