//! Outline heading classification.
//!
//! Court opinions number their outline with Roman numerals, capital letters,
//! Arabic numbers and lower-case Roman numerals, in that nesting order. The
//! rule table is evaluated top to bottom and the first match wins, so "I."
//! is a level-1 heading even though it also looks like a capital letter.

use regex::Regex;

use crate::error::Result;
use crate::model::{Heading, HeadingLevel, Line};

/// Upper-case Roman numeral token: runs of I up to six long, plus IV, V and VI.
pub(crate) const ROMAN_TOKEN: &str = r"I{1,6}|IV|VI?";

/// One row of the heading table.
#[derive(Debug, Clone)]
pub struct HeadingRule {
    /// Level assigned on match
    pub level: HeadingLevel,
    pattern: Regex,
}

impl HeadingRule {
    fn new(level: HeadingLevel, token: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(r"^({})\.\s+(.+)$", token))?;
        Ok(Self { level, pattern })
    }

    /// Apply the rule to a right-trimmed line.
    pub fn apply(&self, line: &str) -> Option<Heading> {
        let caps = self.pattern.captures(line)?;
        Some(Heading::new(self.level, &caps[1], &caps[2]))
    }
}

/// Ordered heading rule table.
#[derive(Debug, Clone)]
pub struct HeadingRules {
    rules: Vec<HeadingRule>,
}

impl HeadingRules {
    /// Compile the built-in table.
    pub fn new() -> Result<Self> {
        Ok(Self {
            rules: vec![
                HeadingRule::new(HeadingLevel::Roman, ROMAN_TOKEN)?,
                HeadingRule::new(HeadingLevel::Letter, "[A-Z]")?,
                HeadingRule::new(HeadingLevel::Number, r"\d{1,2}")?,
                HeadingRule::new(HeadingLevel::LowerRoman, "(?i:[ivxlcdm]{1,6})")?,
            ],
        })
    }

    /// Classify a line as a heading, if any rule matches.
    pub fn classify(&self, line: &str) -> Option<Heading> {
        self.rules.iter().find_map(|rule| rule.apply(line))
    }
}

/// Classify a single physical line.
pub fn classify_line(line: &str, rules: &HeadingRules) -> Line {
    let line = line.trim_end();
    if line.trim().is_empty() {
        return Line::Blank;
    }
    match rules.classify(line) {
        Some(heading) => Line::Heading(heading),
        None => Line::Text(line.to_string()),
    }
}

/// Classify every line, preserving order.
pub fn classify_lines<S: AsRef<str>>(lines: &[S], rules: &HeadingRules) -> Vec<Line> {
    lines
        .iter()
        .map(|line| classify_line(line.as_ref(), rules))
        .collect()
}
