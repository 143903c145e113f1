//! Case metadata extraction from the raw first page.
//!
//! Runs independently of the cleaning stages: it sees the first page exactly
//! as the page source produced it, boilerplate included.

use regex::Regex;

use crate::error::Result;
use crate::model::Metadata;

/// Number of first-page lines searched for a caption "X v Y" span.
const CAPTION_LINES: usize = 120;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Metadata fields filled by a single pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    CaseNo,
    LcNo,
    Judges,
    Date,
    Publication,
    LowerCourt,
}

impl MetadataField {
    fn assign(self, meta: &mut Metadata, value: String) {
        match self {
            MetadataField::CaseNo => meta.case_no = Some(value),
            MetadataField::LcNo => meta.lc_no = Some(value),
            MetadataField::Judges => meta.judges = Some(value),
            MetadataField::Date => meta.date = Some(value),
            MetadataField::Publication => {
                let label = if value.to_uppercase().contains("PUBLICATION") {
                    "PUBLISHED"
                } else {
                    "UNPUBLISHED"
                };
                meta.publication = Some(label.to_string());
            }
            MetadataField::LowerCourt => meta.lower_court = Some(value),
        }
    }
}

/// A field and the pattern that captures it.
///
/// The value is capture group 1 when the pattern has one, else the whole match.
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// Field filled on match
    pub field: MetadataField,
    pattern: Regex,
}

impl FieldRule {
    fn new(field: MetadataField, pattern: &str) -> Result<Self> {
        Ok(Self {
            field,
            pattern: Regex::new(pattern)?,
        })
    }

    fn capture(&self, text: &str) -> Option<String> {
        let caps = self.pattern.captures(text)?;
        let value = caps.get(1).or_else(|| caps.get(0))?;
        Some(normalize_spaces(value.as_str()))
    }
}

/// First-page metadata patterns.
#[derive(Debug, Clone)]
pub struct MetadataRules {
    banner: Regex,
    banner_versus: Regex,
    caption_parties: Regex,
    fields: Vec<FieldRule>,
}

impl MetadataRules {
    /// Compile the built-in rules.
    pub fn new() -> Result<Self> {
        let date = format!(r"(?:{})\s+\d{{1,2}},\s+\d{{4}}", MONTHS.join("|"));
        Ok(Self {
            banner: Regex::new(r"(?i)\bCOA\s+\d+\s+(.+?)\s+Opinion\b")?,
            banner_versus: Regex::new(r"(?i)\s+V\s+")?,
            caption_parties: Regex::new(r"([A-Z0-9.'’\-,& ]+\s+v\s+[A-Z0-9.'’\-,& ]+)")?,
            fields: vec![
                FieldRule::new(MetadataField::CaseNo, r"(?i)\bNo\.\s*(\d{3,})\b")?,
                FieldRule::new(MetadataField::LcNo, r"(?i)\bLC\s*No\.\s*([A-Za-z0-9\-]+)")?,
                FieldRule::new(MetadataField::Judges, r"(?im)^Before:\s*(.+)$")?,
                FieldRule::new(MetadataField::Date, &date)?,
                FieldRule::new(
                    MetadataField::Publication,
                    r"(?i)\b(UNPUBLISHED|FOR\s+PUBLICATION)\b",
                )?,
                FieldRule::new(
                    MetadataField::LowerCourt,
                    r"\b([A-Z][a-z]+ County Circuit Court)\b",
                )?,
            ],
        })
    }

    /// Case name from a "COA <number> <name> Opinion" banner.
    pub fn banner_case_name(&self, text: &str) -> Option<String> {
        let caps = self.banner.captures(text)?;
        let chunk = self.banner_versus.replace_all(&caps[1], " v ");
        Some(normalize_spaces(&chunk))
    }

    /// Case name from an upper-case "PLAINTIFF v DEFENDANT" caption span.
    pub fn caption_case_name(&self, first_page: &str) -> Option<String> {
        let caption = first_page
            .lines()
            .take(CAPTION_LINES)
            .collect::<Vec<_>>()
            .join("\n");
        let caption = normalize_spaces(&caption);
        let found = self.caption_parties.find(&caption)?;
        Some(normalize_spaces(found.as_str()))
    }
}

/// Collapse every whitespace run to one space and trim.
pub fn normalize_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract metadata from the first page.
///
/// Each pattern is tried against the raw page, then against a copy with
/// whitespace collapsed. Fields nothing matched stay `None`.
pub fn extract_metadata<S: AsRef<str>>(pages: &[S], rules: &MetadataRules) -> Metadata {
    let mut meta = Metadata::new();
    let Some(first) = pages.first().map(|page| page.as_ref()) else {
        return meta;
    };
    let flat = normalize_spaces(first);

    meta.case_name = rules
        .banner_case_name(first)
        .or_else(|| rules.banner_case_name(&flat))
        .or_else(|| rules.caption_case_name(first));

    for rule in &rules.fields {
        if let Some(value) = rule.capture(first).or_else(|| rule.capture(&flat)) {
            rule.field.assign(&mut meta, value);
        }
    }

    meta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::COURT_NAME;

    const FIRST_PAGE: &str = "\
COA 369250 CORE VALUES CONSTRUCTION LLC V SHEEHAN'S ON THE GREEN INC Opinion - Authored - Published 7/9/2025

If this opinion indicates that it is “FOR PUBLICATION,” it is subject to
revision until final publication in the Michigan Appeals Reports.

STATE OF MICHIGAN

COURT OF APPEALS

CORE VALUES CONSTRUCTION LLC,
Plaintiff-Appellant,

v
No. 369250
Oakland County Circuit Court
LC No. 2022-196754-CB

SHEEHAN'S ON THE GREEN INC,
Defendant-Appellee.

FOR PUBLICATION
July 9, 2025
9:05 AM

Before: GARRETT, P.J., and RICK and
MARIANI, JJ.
";

    fn rules() -> MetadataRules {
        MetadataRules::new().unwrap()
    }

    #[test]
    fn test_banner_case_name() {
        let meta = extract_metadata(&[FIRST_PAGE], &rules());
        assert_eq!(
            meta.case_name.as_deref(),
            Some("CORE VALUES CONSTRUCTION LLC v SHEEHAN'S ON THE GREEN INC")
        );
    }

    #[test]
    fn test_first_page_fields() {
        let meta = extract_metadata(&[FIRST_PAGE], &rules());
        assert_eq!(meta.case_no.as_deref(), Some("369250"));
        assert_eq!(meta.lc_no.as_deref(), Some("2022-196754-CB"));
        assert_eq!(meta.judges.as_deref(), Some("GARRETT, P.J., and RICK and"));
        assert_eq!(meta.date.as_deref(), Some("July 9, 2025"));
        assert_eq!(meta.publication.as_deref(), Some("PUBLISHED"));
        assert_eq!(meta.lower_court.as_deref(), Some("Oakland County Circuit Court"));
        assert_eq!(meta.court.as_deref(), Some(COURT_NAME));
    }

    #[test]
    fn test_unpublished_banner() {
        let page = "UNPUBLISHED\nMarch 14, 2024\nNo. 364455\nWayne County Circuit Court";
        let meta = extract_metadata(&[page], &rules());
        assert_eq!(meta.publication.as_deref(), Some("UNPUBLISHED"));
        assert_eq!(meta.date.as_deref(), Some("March 14, 2024"));
        assert_eq!(meta.lower_court.as_deref(), Some("Wayne County Circuit Court"));
    }

    #[test]
    fn test_caption_fallback() {
        let page = "PEOPLE OF THE STATE OF MICHIGAN v\nJOHN DOE\nsome lower case text";
        let meta = extract_metadata(&[page], &rules());
        assert_eq!(
            meta.case_name.as_deref(),
            Some("PEOPLE OF THE STATE OF MICHIGAN v JOHN DOE")
        );
    }

    #[test]
    fn test_normalized_copy_is_searched() {
        // The court name only matches once the line break is collapsed.
        let page = "Kent County\nCircuit Court\nDecided January\n5, 2023";
        let meta = extract_metadata(&[page], &rules());
        assert_eq!(meta.lower_court.as_deref(), Some("Kent County Circuit Court"));
        assert_eq!(meta.date.as_deref(), Some("January 5, 2023"));
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        let empty: [&str; 0] = [];
        assert_eq!(extract_metadata(&empty, &rules()), Metadata::new());

        let meta = extract_metadata(&["nothing recognizable"], &rules());
        assert!(meta.case_name.is_none());
        assert!(meta.case_no.is_none());
        assert!(meta.publication.is_none());
    }

    #[test]
    fn test_normalize_spaces() {
        assert_eq!(normalize_spaces("  a \n\t b   c "), "a b c");
    }
}
