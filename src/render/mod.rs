//! Rendering of pipeline output into Markdown.

mod inline;
mod markdown;
mod normalize;
mod options;

pub use inline::{link_inline_refs, InlineRefRules, CITATION_TOKENS};
pub use markdown::{assemble, FOOTNOTES_HEADING};
pub use normalize::normalize_page;
pub use options::ConvertOptions;
