//! Reflow of physical lines into logical paragraphs.

use regex::Regex;

use crate::error::Result;
use crate::model::{Line, Paragraph};

/// Citation abbreviations that end in a period without ending a sentence.
pub const LEGAL_ABBREVIATIONS: [&str; 12] = [
    "MCL.", "MRE.", "U.S.", "Inc.", "Co.", "Ct.", "App.", "No.", "v.", "Ltd.", "L.L.C.", "L.L.P.",
];

/// Sentence-boundary and de-hyphenation rules.
#[derive(Debug, Clone)]
pub struct ReflowRules {
    sentence_end: Regex,
    wrapped_hyphen: Regex,
    abbreviation: Regex,
}

impl ReflowRules {
    /// Compile the built-in rules.
    pub fn new() -> Result<Self> {
        Ok(Self {
            sentence_end: Regex::new(r"(?:[.!?]|\]\))\s*$")?,
            wrapped_hyphen: Regex::new(r"(\w)-\s+(\w)")?,
            abbreviation: abbreviation_suffix()?,
        })
    }

    /// Check if the line ends with a listed abbreviation.
    ///
    /// Matching is on the suffix of the line, so `P.L.L.C.` counts through
    /// `L.L.C.` and `Rev.` through `v.`.
    pub fn ends_with_abbreviation(&self, line: &str) -> bool {
        self.abbreviation.is_match(line)
    }

    /// Join buffered lines with single spaces and close wrapped hyphens.
    pub fn join(&self, lines: &[String]) -> String {
        let joined = lines
            .iter()
            .map(|line| line.trim())
            .collect::<Vec<_>>()
            .join(" ");
        self.wrapped_hyphen.replace_all(&joined, "$1$2").into_owned()
    }
}

fn abbreviation_suffix() -> Result<Regex> {
    let alternatives: Vec<String> = LEGAL_ABBREVIATIONS.iter().map(|a| regex::escape(a)).collect();
    Ok(Regex::new(&format!(r"(?:{})\s*$", alternatives.join("|")))?)
}

/// Check if a line looks like it ends a sentence.
///
/// True when the line ends in `.`, `!`, `?` or `])` and does not end with a
/// listed legal abbreviation.
pub fn is_sentence_final(line: &str, rules: &ReflowRules) -> bool {
    rules.sentence_end.is_match(line) && !rules.ends_with_abbreviation(line)
}

/// Merge classified lines into paragraphs.
///
/// Blank lines and headings close the current paragraph; headings are
/// emitted on their own. A text line also starts a new paragraph when the
/// previously buffered line looks sentence-final, so one physical block can
/// yield several paragraphs.
pub fn reflow(lines: &[Line], rules: &ReflowRules) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut buffer: Vec<String> = Vec::new();

    let flush = |buffer: &mut Vec<String>, paragraphs: &mut Vec<Paragraph>| {
        if !buffer.is_empty() {
            paragraphs.push(Paragraph::Text(rules.join(buffer)));
            buffer.clear();
        }
    };

    for line in lines {
        match line {
            Line::Blank => flush(&mut buffer, &mut paragraphs),
            Line::Heading(heading) => {
                flush(&mut buffer, &mut paragraphs);
                paragraphs.push(Paragraph::Heading(heading.clone()));
            }
            Line::Text(text) => {
                let boundary = buffer
                    .last()
                    .is_some_and(|previous| is_sentence_final(previous, rules));
                if boundary {
                    flush(&mut buffer, &mut paragraphs);
                }
                buffer.push(text.clone());
            }
        }
    }
    flush(&mut buffer, &mut paragraphs);

    paragraphs
}
