//! Case metadata captured from an opinion's first page.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Court that issues every opinion this crate understands.
pub const COURT_NAME: &str = "Michigan Court of Appeals";

/// Identifier recorded in the `source` field of every metadata record.
pub const SOURCE_ID: &str = "opinionmd";

/// Case metadata.
///
/// Field order is the serialization order of the `.meta.json` sidecar and
/// must not change. Unmatched fields serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Parties, e.g. "PEOPLE OF MICHIGAN v JOHN DOE"
    pub case_name: Option<String>,

    /// Court of Appeals docket number
    pub case_no: Option<String>,

    /// Lower court case number
    pub lc_no: Option<String>,

    /// Panel, as written after "Before:"
    pub judges: Option<String>,

    /// Decision date, e.g. "July 9, 2025"
    pub date: Option<String>,

    /// "PUBLISHED" or "UNPUBLISHED"
    pub publication: Option<String>,

    /// Originating circuit court
    pub lower_court: Option<String>,

    /// Issuing court
    pub court: Option<String>,

    /// Converter identifier
    pub source: Option<String>,
}

impl Metadata {
    /// Create an empty record with the court and source defaults filled in.
    pub fn new() -> Self {
        Self {
            case_name: None,
            case_no: None,
            lc_no: None,
            judges: None,
            date: None,
            publication: None,
            lower_court: None,
            court: Some(COURT_NAME.to_string()),
            source: Some(SOURCE_ID.to_string()),
        }
    }

    /// Parse the decision date.
    pub fn decided_on(&self) -> Option<NaiveDate> {
        let date = self.date.as_deref()?;
        NaiveDate::parse_from_str(date, "%B %d, %Y").ok()
    }

    /// Check if the opinion is marked for publication.
    pub fn is_published(&self) -> bool {
        self.publication.as_deref() == Some("PUBLISHED")
    }

    /// Populated fields as `(key, value)` pairs in serialization order.
    pub fn present_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("case_name", &self.case_name),
            ("case_no", &self.case_no),
            ("lc_no", &self.lc_no),
            ("judges", &self.judges),
            ("date", &self.date),
            ("publication", &self.publication),
            ("lower_court", &self.lower_court),
            ("court", &self.court),
            ("source", &self.source),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }

    /// Serialize as pretty-printed JSON (2-space indent, UTF-8 preserved).
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new()
    }
}
