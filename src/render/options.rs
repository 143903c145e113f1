//! Conversion options and configuration.

/// Per-conversion options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Rewrite word-attached digits into `[^n]` references
    pub inline_footnotes: bool,

    /// NFC-normalize pages, expand ligatures and drop U+FFFD before processing
    pub normalize_unicode: bool,

    /// Log statistics at info level once a conversion finishes
    pub collect_stats: bool,
}

impl ConvertOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable inline footnote references.
    pub fn with_inline_footnotes(mut self, enabled: bool) -> Self {
        self.inline_footnotes = enabled;
        self
    }

    /// Enable or disable Unicode normalization.
    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.normalize_unicode = enabled;
        self
    }

    /// Enable statistics logging.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            inline_footnotes: false,
            normalize_unicode: false,
            collect_stats: false,
        }
    }
}
