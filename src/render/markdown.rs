//! Markdown assembly for converted opinions.

use crate::model::{Footnote, Paragraph};

/// Heading that introduces the footnote section.
pub const FOOTNOTES_HEADING: &str = "## Footnotes";

/// Assemble body paragraphs and footnotes into a Markdown document.
///
/// Paragraphs are separated by a blank line. Footnotes, if any, follow a
/// horizontal rule under a `## Footnotes` heading, one `[^n]: text` line
/// each. The result ends with exactly one newline.
pub fn assemble(body: &[Paragraph], footnotes: &[Footnote]) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(body.len() * 2 + footnotes.len() + 4);

    for paragraph in body {
        lines.push(paragraph.to_string());
        lines.push(String::new());
    }

    if !footnotes.is_empty() {
        lines.push("---".to_string());
        lines.push(String::new());
        lines.push(FOOTNOTES_HEADING.to_string());
        lines.push(String::new());
        lines.extend(footnotes.iter().map(Footnote::to_markdown));
    }

    let mut output = lines.join("\n").trim_end().to_string();
    output.push('\n');
    output
}
