//! Location of the opinion body after the caption block.

use regex::Regex;

use super::heading::ROMAN_TOKEN;
use crate::error::Result;

/// Body-start markers and the outline-shape fallback.
#[derive(Debug, Clone)]
pub struct BodyRules {
    markers: Vec<Regex>,
    outline_shape: Regex,
}

impl BodyRules {
    /// Compile the built-in rules.
    pub fn new() -> Result<Self> {
        Ok(Self {
            markers: vec![
                Regex::new(r"(?i)^PER\s+CURIAM\.$")?,
                Regex::new(r"(?i)^OPINION\b")?,
            ],
            outline_shape: Regex::new(&format!(
                r"^(?:{}|[A-Z]|\d{{1,2}}|[ivxlcdm]{{1,6}})\.\s",
                ROMAN_TOKEN
            ))?,
        })
    }

    /// Check if a line is an explicit body-start marker.
    pub fn is_marker(&self, line: &str) -> bool {
        let trimmed = line.trim();
        self.markers.iter().any(|re| re.is_match(trimmed))
    }

    /// Check if a line has the shape of an outline heading.
    pub fn has_outline_shape(&self, line: &str) -> bool {
        self.outline_shape.is_match(line.trim())
    }
}

/// Index of the first body line.
///
/// Prefers an explicit marker ("PER CURIAM." or a line starting with
/// "OPINION"), then the first outline-shaped line, then 0. The last case
/// keeps the caption in the output.
pub fn locate_body<S: AsRef<str>>(lines: &[S], rules: &BodyRules) -> usize {
    if let Some(index) = lines.iter().position(|l| rules.is_marker(l.as_ref())) {
        return index;
    }
    if let Some(index) = lines.iter().position(|l| rules.has_outline_shape(l.as_ref())) {
        log::debug!("no body marker; starting at outline line {}", index);
        return index;
    }
    log::debug!("no body marker or outline heading; keeping caption");
    0
}
