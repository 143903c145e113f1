//! Page sources: the collaborators that turn an input file into per-page text.
//!
//! The pipeline never decodes files itself. A [`PageSource`] reads a file and
//! returns one string per page, first page first. Sources are registered by
//! file extension in a [`SourceRegistry`].
//!
//! # Example
//!
//! ```no_run
//! use opinionmd::source::SourceRegistry;
//! use std::path::Path;
//!
//! fn main() -> opinionmd::Result<()> {
//!     let registry = SourceRegistry::with_defaults();
//!     let pages = registry.pages(Path::new("opinion.txt"))?;
//!     println!("{} pages", pages.len());
//!     Ok(())
//! }
//! ```

#[cfg(feature = "pdf")]
mod pdf;
mod text;

#[cfg(feature = "pdf")]
pub use pdf::PdfSource;
pub use text::PlainTextSource;

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Trait for page sources.
///
/// Implement this trait to add support for a new input format.
pub trait PageSource: Send + Sync {
    /// Get the name of this source.
    fn name(&self) -> &str;

    /// Get the supported file extensions for this source.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["pdf"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Read the file and return its pages in order.
    fn pages(&self, path: &Path) -> Result<Vec<String>>;

    /// Check if this source supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// A positioned run of text on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// Horizontal origin
    pub x: f32,
    /// Vertical origin, growing down the page
    pub y: f32,
    /// Block text, possibly spanning several lines
    pub text: String,
}

impl TextBlock {
    /// Create a new text block.
    pub fn new(x: f32, y: f32, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
        }
    }
}

fn round_tenth(v: f32) -> i64 {
    (v * 10.0).round() as i64
}

/// Flatten a page's text blocks into reading-order text.
///
/// Blocks are sorted by vertical then horizontal origin, both rounded to one
/// decimal, so baseline jitter does not reorder blocks on the same row. Line
/// endings become `\n`, surrounding newlines are stripped, empty blocks are
/// skipped, and the rest are separated by a blank line.
pub fn flatten_blocks(mut blocks: Vec<TextBlock>) -> String {
    blocks.sort_by_key(|block| (round_tenth(block.y), round_tenth(block.x)));
    blocks
        .iter()
        .filter_map(|block| {
            let text = block.text.replace("\r\n", "\n").replace('\r', "\n");
            let text = text.trim_matches('\n');
            (!text.is_empty()).then(|| text.to_string())
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Registry for page sources.
///
/// The registry maps file extensions to sources.
pub struct SourceRegistry {
    sources: HashMap<String, Arc<dyn PageSource>>,
    by_name: HashMap<String, Arc<dyn PageSource>>,
}

impl SourceRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the built-in sources.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PlainTextSource::new()));
        #[cfg(feature = "pdf")]
        registry.register(Arc::new(PdfSource::new()));
        registry
    }

    /// Register a source for all its supported extensions.
    pub fn register(&mut self, source: Arc<dyn PageSource>) {
        for ext in source.supported_extensions() {
            self.sources.insert(ext.to_lowercase(), source.clone());
        }
        self.by_name.insert(source.name().to_lowercase(), source);
    }

    /// Get a source by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn PageSource>> {
        self.sources.get(&ext.to_lowercase()).cloned()
    }

    /// Get a source by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn PageSource>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.sources.contains_key(&ext.to_lowercase())
    }

    /// Check if a path has a supported extension.
    pub fn supports_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.supports(ext))
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.sources.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Read pages with the source registered for the path's extension.
    pub fn pages(&self, path: &Path) -> Result<Vec<String>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::Extraction(format!("{}: file has no extension", path.display())))?;

        let source = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::Extraction(format!("no page source for extension: {}", ext)))?;

        log::debug!("reading {} with {} source", path.display(), source.name());
        source.pages(path)
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_sorts_by_rounded_origin() {
        let blocks = vec![
            TextBlock::new(300.0, 100.04, "right"),
            TextBlock::new(72.0, 200.0, "second row"),
            TextBlock::new(72.0, 100.01, "left"),
        ];
        assert_eq!(flatten_blocks(blocks), "left\n\nright\n\nsecond row");
    }

    #[test]
    fn test_flatten_normalizes_and_skips_empty() {
        let blocks = vec![
            TextBlock::new(0.0, 0.0, "\nline one\r\nline two\n"),
            TextBlock::new(0.0, 10.0, "\n\n"),
            TextBlock::new(0.0, 20.0, "last\r"),
        ];
        assert_eq!(flatten_blocks(blocks), "line one\nline two\n\nlast");
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = SourceRegistry::with_defaults();
        assert!(registry.supports("txt"));
        assert!(registry.supports("TXT"));
        assert!(!registry.supports("docx"));
        assert!(registry.get_by_name("text").is_some());
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn test_registry_includes_pdf() {
        let registry = SourceRegistry::with_defaults();
        assert!(registry.supports("pdf"));
        assert_eq!(registry.get_by_extension("PDF").unwrap().name(), "pdf");
    }

    #[test]
    fn test_unsupported_extension_is_extraction_error() {
        let registry = SourceRegistry::with_defaults();
        let err = registry.pages(Path::new("brief.docx")).unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));

        let err = registry.pages(Path::new("README")).unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }
}
