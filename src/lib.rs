//! # opinionmd
//!
//! Converts Michigan Court of Appeals opinions into clean Markdown plus a
//! JSON metadata record.
//!
//! The core works on per-page plain text: it strips institutional
//! boilerplate, finds where the opinion body starts, turns outline numbering
//! into Markdown headings, reflows wrapped lines into paragraphs, moves
//! footnote definitions into a `## Footnotes` section and reads case
//! metadata off the first page.
//!
//! ## Quick Start
//!
//! ```no_run
//! use opinionmd::Converter;
//!
//! fn main() -> opinionmd::Result<()> {
//!     let converter = Converter::new()?.with_inline_footnotes(true);
//!     let conversion = converter.convert_path("coa_369250.pdf")?;
//!     println!("{}", conversion.markdown);
//!     println!("{}", conversion.metadata.to_json()?);
//!     Ok(())
//! }
//! ```
//!
//! ## From page text
//!
//! ```
//! let pages = ["STATE OF MICHIGAN\nCOURT OF APPEALS\nPER CURIAM.\nAffirmed."];
//! let conversion = opinionmd::convert_pages(&pages, &opinionmd::ConvertOptions::default())?;
//! assert_eq!(conversion.markdown, "PER CURIAM.\n\nAffirmed.\n");
//! # Ok::<(), opinionmd::Error>(())
//! ```

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod persist;
pub mod pipeline;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use batch::{collect_inputs, convert_all, BatchOutcome, BatchReport};
pub use detect::{sniff_bytes, sniff_path, InputKind};
pub use error::{Error, Result};
pub use model::{
    Conversion, ConversionResult, ConversionStats, Footnote, Heading, HeadingLevel, Metadata,
    Paragraph,
};
pub use persist::{write_outputs, WrittenOutputs};
pub use pipeline::{Pipeline, RuleSet};
pub use render::ConvertOptions;
pub use source::{flatten_blocks, PageSource, PlainTextSource, SourceRegistry, TextBlock};

#[cfg(feature = "pdf")]
pub use source::PdfSource;

use std::path::Path;

/// Convert per-page text with the shared rule set.
///
/// Fails only if the built-in rules cannot be compiled.
pub fn convert_pages<S: AsRef<str>>(pages: &[S], options: &ConvertOptions) -> Result<Conversion> {
    let rules = RuleSet::shared()?;
    Ok(Pipeline::new(rules, options.clone()).run(pages))
}

/// Builder-style converter from input files to Markdown.
///
/// # Example
///
/// ```no_run
/// use opinionmd::Converter;
/// use std::path::Path;
///
/// let converter = Converter::new().unwrap();
/// let written = converter
///     .convert_to_dir("opinions/coa_369250.pdf", Path::new("out"))
///     .unwrap();
/// println!("{}", written.markdown_path.display());
/// ```
pub struct Converter {
    options: ConvertOptions,
    registry: SourceRegistry,
    rules: &'static RuleSet,
}

impl Converter {
    /// Create a converter with default options and the built-in sources.
    pub fn new() -> Result<Self> {
        Ok(Self {
            options: ConvertOptions::default(),
            registry: SourceRegistry::with_defaults(),
            rules: RuleSet::shared()?,
        })
    }

    /// Replace all options.
    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// Enable or disable inline footnote references.
    pub fn with_inline_footnotes(mut self, enabled: bool) -> Self {
        self.options.inline_footnotes = enabled;
        self
    }

    /// Enable or disable Unicode normalization of page text.
    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.options.normalize_unicode = enabled;
        self
    }

    /// Enable statistics logging.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.options.collect_stats = collect;
        self
    }

    /// Use a custom source registry.
    pub fn with_registry(mut self, registry: SourceRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Get the options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Get the source registry.
    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Convert per-page text.
    pub fn convert_pages<S: AsRef<str>>(&self, pages: &[S]) -> Conversion {
        Pipeline::new(self.rules, self.options.clone()).run(pages)
    }

    /// Read a file through the registry and convert it.
    pub fn convert_path<P: AsRef<Path>>(&self, path: P) -> Result<Conversion> {
        let pages = self.registry.pages(path.as_ref())?;
        Ok(self.convert_pages(&pages))
    }

    /// Convert a file into the success/markdown/metadata result shape.
    ///
    /// Any failure yields `success = false` and no payload.
    pub fn convert<P: AsRef<Path>>(&self, path: P) -> ConversionResult {
        self.convert_path(path).into()
    }

    /// Convert a file and write `<stem>.md` and `<stem>.meta.json`.
    pub fn convert_to_dir<P: AsRef<Path>>(&self, path: P, output_dir: &Path) -> Result<WrittenOutputs> {
        let path = path.as_ref();
        let conversion = self.convert_path(path)?;
        write_outputs(&conversion, &persist::output_stem(path), output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converter_builder() {
        let converter = Converter::new()
            .unwrap()
            .with_inline_footnotes(true)
            .with_unicode_normalization(true);
        assert!(converter.options().inline_footnotes);
        assert!(converter.options().normalize_unicode);
        assert!(converter.registry().supports("txt"));
    }

    #[test]
    fn test_convert_pages_matches_converter() {
        let pages = ["OPINION\nI. FACTS\nThe facts."];
        let free = convert_pages(&pages, &ConvertOptions::default()).unwrap();
        let built = Converter::new().unwrap().convert_pages(&pages);
        assert_eq!(free, built);
    }

    #[test]
    fn test_convert_missing_file_fails_without_payload() {
        let result = Converter::new().unwrap().convert("/nonexistent/opinion.txt");
        assert!(!result.success);
        assert!(result.markdown.is_none());
        assert!(result.metadata.is_none());
    }
}
