//! Inline footnote reference markers.
//!
//! PDF text loses superscripts, so "negligence²" arrives as "negligence2".
//! This pass rewrites such word-attached digit runs into `[^n]` markers.
//! It does not check that footnote `n` exists.

use std::collections::HashSet;

use regex::{Captures, Regex};

use crate::error::Result;

/// Citation tokens whose following number is never a footnote reference.
pub const CITATION_TOKENS: [&str; 14] = [
    "No.", "No", "MCL", "MCR", "MRE", "US", "U.S.", "NW2d", "NW", "N’d", "Mich", "App", "WL", "Ct",
];

/// Candidate pattern and citation skip set.
#[derive(Debug, Clone)]
pub struct InlineRefRules {
    candidate: Regex,
    skip: HashSet<&'static str>,
}

impl InlineRefRules {
    /// Compile the built-in rules.
    pub fn new() -> Result<Self> {
        Ok(Self {
            // A word character, then 1-3 digits not followed by another word
            // character. The trailing boundary is captured and written back.
            candidate: Regex::new(r"(\w)(\d{1,3})(\W|$)")?,
            skip: CITATION_TOKENS.into_iter().collect(),
        })
    }

    /// Check if a token suppresses reference linking of the next token.
    pub fn is_citation_token(&self, word: &str) -> bool {
        self.skip.contains(word)
    }
}

/// Start of the whitespace-delimited token containing `pos`.
fn token_start(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0)
}

/// Rewrite inline footnote references in assembled Markdown.
///
/// Returns the new text and the number of markers inserted. A candidate is
/// left alone when the word before its token is a citation token (so
/// "No. 123" and "MCL 600.2912" survive), when it already sits inside a
/// `[^n]` marker, or when it is on a Markdown heading line.
pub fn link_inline_refs(text: &str, rules: &InlineRefRules) -> (String, u32) {
    let mut output = String::with_capacity(text.len() + 16);
    let mut last = 0;
    let mut inserted = 0;

    for caps in rules.candidate.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        output.push_str(&text[last..whole.start()]);
        last = whole.end();

        if should_skip(text, whole.start(), rules) {
            output.push_str(whole.as_str());
        } else {
            push_marker(&mut output, &caps);
            inserted += 1;
        }
    }
    output.push_str(&text[last..]);

    if inserted > 0 {
        log::debug!("inserted {} inline footnote references", inserted);
    }
    (output, inserted)
}

fn should_skip(text: &str, pos: usize, rules: &InlineRefRules) -> bool {
    if text[..pos].ends_with("[^") {
        return true;
    }
    let line_start = text[..pos].rfind('\n').map_or(0, |i| i + 1);
    if text[line_start..].starts_with('#') {
        return true;
    }
    text[..token_start(text, pos)]
        .split_whitespace()
        .next_back()
        .is_some_and(|word| rules.is_citation_token(word))
}

fn push_marker(output: &mut String, caps: &Captures<'_>) {
    output.push_str(&caps[1]);
    output.push_str("[^");
    output.push_str(&caps[2]);
    output.push(']');
    output.push_str(&caps[3]);
}
