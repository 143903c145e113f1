//! The page-text to Markdown pipeline.
//!
//! Every stage is a plain function over the previous stage's output plus the
//! relevant slice of a [`RuleSet`]. The rule set is compiled once and never
//! mutated, so one instance can serve any number of concurrent conversions.

mod body;
mod boilerplate;
mod footnote;
mod heading;
mod metadata;
mod reflow;

pub use body::{locate_body, BodyRules};
pub use boilerplate::{filter_lines, BoilerplateRule, BoilerplateRules};
pub use footnote::{split_footnotes, FootnoteRules, SplitParagraphs};
pub use heading::{classify_line, classify_lines, HeadingRule, HeadingRules};
pub use metadata::{extract_metadata, normalize_spaces, FieldRule, MetadataField, MetadataRules};
pub use reflow::{is_sentence_final, reflow, ReflowRules, LEGAL_ABBREVIATIONS};

use std::borrow::Cow;
use std::sync::OnceLock;

use crate::error::Result;
use crate::model::{Conversion, ConversionStats};
use crate::render::{assemble, link_inline_refs, normalize_page, ConvertOptions, InlineRefRules};

/// Compiled rule tables for every stage.
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// Institutional furniture lines
    pub boilerplate: BoilerplateRules,
    /// Body-start markers
    pub body: BodyRules,
    /// Outline heading table
    pub headings: HeadingRules,
    /// Sentence boundaries and abbreviation exceptions
    pub reflow: ReflowRules,
    /// Footnote definition pattern
    pub footnotes: FootnoteRules,
    /// First-page metadata patterns
    pub metadata: MetadataRules,
    /// Inline reference pattern and citation skip set
    pub inline: InlineRefRules,
}

static SHARED: OnceLock<RuleSet> = OnceLock::new();

impl RuleSet {
    /// Compile all built-in rules.
    pub fn new() -> Result<Self> {
        Ok(Self {
            boilerplate: BoilerplateRules::new()?,
            body: BodyRules::new()?,
            headings: HeadingRules::new()?,
            reflow: ReflowRules::new()?,
            footnotes: FootnoteRules::new()?,
            metadata: MetadataRules::new()?,
            inline: InlineRefRules::new()?,
        })
    }

    /// Process-wide rule set, compiled on first use.
    pub fn shared() -> Result<&'static RuleSet> {
        if let Some(rules) = SHARED.get() {
            return Ok(rules);
        }
        let rules = RuleSet::new()?;
        Ok(SHARED.get_or_init(|| rules))
    }
}

/// One conversion run over a rule set.
#[derive(Debug, Clone)]
pub struct Pipeline<'r> {
    rules: &'r RuleSet,
    options: ConvertOptions,
}

impl<'r> Pipeline<'r> {
    /// Create a pipeline with the given rules and options.
    pub fn new(rules: &'r RuleSet, options: ConvertOptions) -> Self {
        Self { rules, options }
    }

    /// Get the options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert per-page text into Markdown and metadata.
    ///
    /// Page 0 is the first page. The run is deterministic: the same pages
    /// and options always produce byte-identical output.
    pub fn run<S: AsRef<str>>(&self, pages: &[S]) -> Conversion {
        let rules = self.rules;
        let mut stats = ConversionStats::new();
        stats.page_count = pages.len() as u32;

        let pages: Vec<Cow<'_, str>> = pages
            .iter()
            .map(|page| {
                if self.options.normalize_unicode {
                    Cow::Owned(normalize_page(page.as_ref()))
                } else {
                    Cow::Borrowed(page.as_ref())
                }
            })
            .collect();

        let metadata = extract_metadata(&pages, &rules.metadata);

        let text = self.join_pages(&pages, &mut stats);
        let lines: Vec<&str> = text
            .lines()
            .skip_while(|line| line.trim().is_empty())
            .collect();

        let start = locate_body(&lines, &rules.body);
        stats.body_start_line = start as u32;

        let classified = classify_lines(&lines[start..], &rules.headings);
        let paragraphs = reflow(&classified, &rules.reflow);
        let split = split_footnotes(paragraphs, &rules.footnotes);

        stats.paragraph_count = split.body.len() as u32;
        stats.heading_count = split.body.iter().filter(|p| p.is_heading()).count() as u32;
        stats.footnote_count = split.footnotes.len() as u32;
        stats.duplicate_footnotes = split.duplicates as u32;

        let mut markdown = assemble(&split.body, &split.footnotes);
        if self.options.inline_footnotes {
            let (linked, inserted) = link_inline_refs(&markdown, &rules.inline);
            markdown = linked;
            stats.inline_references = inserted;
        }
        stats.count_text(&markdown);

        log::debug!(
            "converted {} pages: {} paragraphs, {} headings, {} footnotes",
            stats.page_count,
            stats.paragraph_count,
            stats.heading_count,
            stats.footnote_count
        );
        if self.options.collect_stats {
            log::info!(
                "{} words, {} boilerplate lines removed, body starts at line {}",
                stats.word_count,
                stats.boilerplate_lines,
                stats.body_start_line
            );
        }

        Conversion {
            markdown,
            metadata,
            footnotes: split.footnotes,
            stats,
        }
    }

    /// Filter boilerplate from each page and join the survivors.
    ///
    /// Pages that end up empty are skipped; the rest are separated by a
    /// blank line.
    fn join_pages(&self, pages: &[Cow<'_, str>], stats: &mut ConversionStats) -> String {
        let mut kept_pages = Vec::with_capacity(pages.len());
        for page in pages {
            let total = page.lines().count();
            let kept = filter_lines(page.lines(), &self.rules.boilerplate);
            stats.boilerplate_lines += (total - kept.len()) as u32;

            let joined = kept.join("\n");
            let trimmed = joined.trim();
            if !trimmed.is_empty() {
                kept_pages.push(trimmed.to_string());
            }
        }
        kept_pages.join("\n\n")
    }
}
