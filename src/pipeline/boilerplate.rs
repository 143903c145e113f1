//! Removal of institutional furniture lines (headers, page numbers, banners).

use regex::Regex;

use crate::error::Result;

/// Quote characters that may surround "FOR PUBLICATION" in the disclaimer.
const QUOTES: &str = r#"['‘’"“”]"#;

/// A named boilerplate pattern.
#[derive(Debug, Clone)]
pub struct BoilerplateRule {
    /// Short rule name, used in debug logs
    pub name: &'static str,
    pattern: Regex,
}

impl BoilerplateRule {
    fn new(name: &'static str, pattern: &str) -> Result<Self> {
        // Anchored and case-insensitive; matched against the trimmed line.
        let pattern = Regex::new(&format!("(?i)^(?:{})$", pattern))?;
        Ok(Self { name, pattern })
    }

    /// Check if the trimmed line matches this rule.
    pub fn matches(&self, trimmed: &str) -> bool {
        self.pattern.is_match(trimmed)
    }
}

/// Ordered boilerplate rule list.
#[derive(Debug, Clone)]
pub struct BoilerplateRules {
    rules: Vec<BoilerplateRule>,
}

impl BoilerplateRules {
    /// Compile the built-in rules.
    pub fn new() -> Result<Self> {
        let disclaimer = format!(
            r"If this opinion indicates that it is {q}?FOR PUBLICATION{q}?.*",
            q = QUOTES
        );
        let rules = vec![
            BoilerplateRule::new("state-header", r"STATE\s+OF\s+MICHIGAN")?,
            BoilerplateRule::new(
                "state-header-spaced",
                r"S\s*T\s*A\s*T\s*E\s+O\s*F\s+M\s*I\s*C\s*H\s*I\s*G\s*A\s*N",
            )?,
            BoilerplateRule::new("court-header", r"COURT\s+OF\s+APPEALS")?,
            BoilerplateRule::new(
                "court-header-spaced",
                r"C\s*O\s*U\s*R\s*T\s+O\s*F\s*A\s*P\s*P\s*E\s*A\s*L\s*S",
            )?,
            BoilerplateRule::new("page-number", r"-\d+-")?,
            BoilerplateRule::new("publication-disclaimer", &disclaimer)?,
            BoilerplateRule::new("unpublished-banner", r"UNPUBLISHED\b.*")?,
            BoilerplateRule::new("published-banner", r"PUBLISHED\b.*")?,
            BoilerplateRule::new("case-number", r"No\.\s*\d+\b.*")?,
            BoilerplateRule::new("lower-court-number", r"LC\s*No\.\s*\S+.*")?,
            BoilerplateRule::new("timestamp", r"\d{1,2}:\d{2}\s*(?:AM|PM)")?,
        ];
        Ok(Self { rules })
    }

    /// First rule matching the line, if any.
    pub fn matching_rule(&self, line: &str) -> Option<&BoilerplateRule> {
        let trimmed = line.trim();
        self.rules.iter().find(|rule| rule.matches(trimmed))
    }

    /// Check if a line is boilerplate.
    pub fn is_boilerplate(&self, line: &str) -> bool {
        self.matching_rule(line).is_some()
    }
}

/// Drop boilerplate lines from one page, preserving order.
///
/// Lines are removed whole; nothing is stripped from surviving lines.
pub fn filter_lines<'a, I>(lines: I, rules: &BoilerplateRules) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .filter(|line| match rules.matching_rule(line) {
            Some(rule) => {
                log::trace!("dropping {} line: {:?}", rule.name, line);
                false
            }
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> BoilerplateRules {
        BoilerplateRules::new().unwrap()
    }

    #[test]
    fn test_filter_keeps_content_in_order() {
        let lines = [
            "STATE OF MICHIGAN",
            "COURT OF APPEALS",
            "This is actual content",
            "-3-",
            "More real content",
        ];
        let kept = filter_lines(lines, &rules());
        assert_eq!(kept, vec!["This is actual content", "More real content"]);
    }

    #[test]
    fn test_letter_spaced_headers() {
        let rules = rules();
        assert!(rules.is_boilerplate("S T A T E  O F  M I C H I G A N"));
        assert!(rules.is_boilerplate("C O U R T  O F  A P P E A L S"));
        assert!(rules.is_boilerplate("  court of appeals  "));
    }

    #[test]
    fn test_banner_and_number_lines() {
        let rules = rules();
        assert!(rules.is_boilerplate("UNPUBLISHED"));
        assert!(rules.is_boilerplate("PUBLISHED July 9, 2025"));
        assert!(rules.is_boilerplate("No. 369250"));
        assert!(rules.is_boilerplate("LC No. 2022-000123-CK"));
        assert!(rules.is_boilerplate("9:05 AM"));
        assert!(rules.is_boilerplate("10:15 pm"));
        assert!(rules.is_boilerplate(
            "If this opinion indicates that it is “FOR PUBLICATION,” it is subject to revision"
        ));
    }

    #[test]
    fn test_anchored_matching() {
        let rules = rules();
        assert!(!rules.is_boilerplate("The STATE OF MICHIGAN argues otherwise"));
        assert!(!rules.is_boilerplate("see page -3- of the transcript"));
        assert!(!rules.is_boilerplate("Docket No. 369250 was consolidated"));
        assert!(!rules.is_boilerplate("At 9:05 AM the hearing began"));
    }

    #[test]
    fn test_matching_rule_reports_first_match() {
        let rules = rules();
        let rule = rules.matching_rule("-12-").unwrap();
        assert_eq!(rule.name, "page-number");
        assert!(rules.matching_rule("Affirmed.").is_none());
    }
}
