//! Value types flowing through the conversion pipeline.
//!
//! Every type here is created and consumed within a single conversion call;
//! nothing is shared across documents.

mod footnote;
mod line;
mod metadata;
mod result;

pub use footnote::Footnote;
pub use line::{Heading, HeadingLevel, Line, Paragraph};
pub use metadata::{Metadata, COURT_NAME, SOURCE_ID};
pub use result::{Conversion, ConversionResult, ConversionStats};
