//! PDF page source backed by lopdf.
//!
//! Each page's content stream is walked for text operators. Shown strings
//! are grouped into positioned blocks (runs of lines at a steady line step)
//! and the blocks are flattened in reading order with [`flatten_blocks`].

use crate::detect::{sniff_path, InputKind};
use crate::error::{Error, Result};
use lopdf::content::{Content, Operation};
use lopdf::{Document as LopdfDocument, Object, ObjectId};
use std::path::Path;

use super::{flatten_blocks, PageSource, TextBlock};

/// `TJ` adjustment, in thousandths of an em, read as a word space.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Largest first line step, as a multiple of the font size, that keeps a
/// line in the current block.
const FIRST_STEP_LIMIT: f32 = 2.5;

/// Growth over a block's established line step that starts a new block.
const STEP_TOLERANCE: f32 = 1.3;

/// PDF page source.
///
/// Pages come back in page order; within a page, text blocks are ordered
/// top to bottom, then left to right, and separated by a blank line.
#[derive(Debug, Clone, Default)]
pub struct PdfSource {
    _private: (),
}

impl PdfSource {
    /// Create a new PDF source.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn load(path: &Path) -> Result<LopdfDocument> {
        match sniff_path(path)? {
            InputKind::Pdf { version } => log::debug!("{}: PDF {}", path.display(), version),
            InputKind::Text => return Err(Error::UnknownFormat),
        }

        LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => {
                Error::Extraction(format!("{}: encrypted document", path.display()))
            }
            _ => Error::from(e),
        })
    }

    fn page_text(doc: &LopdfDocument, page_id: ObjectId) -> Result<String> {
        let bytes = doc.get_page_content(page_id)?;
        let content = Content::decode(&bytes)?;
        Ok(flatten_blocks(blocks_from_content(&content)))
    }
}

impl PageSource for PdfSource {
    fn name(&self) -> &str {
        "pdf"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn pages(&self, path: &Path) -> Result<Vec<String>> {
        let doc = Self::load(path)?;

        doc.get_pages()
            .into_iter()
            .map(|(number, page_id)| {
                Self::page_text(&doc, page_id).map_err(|e| {
                    Error::Extraction(format!("{}: page {}: {}", path.display(), number, e))
                })
            })
            .collect()
    }
}

/// Text state tracked across operators.
#[derive(Debug, Clone, Copy)]
struct TextCursor {
    /// Line origin in page space, y growing up
    x: f32,
    y: f32,
    /// Vertical scale of the text matrix
    scale: f32,
    leading: f32,
    font_size: f32,
    /// Set by positioning operators, cleared by the next shown string
    moved: bool,
}

impl Default for TextCursor {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            leading: 0.0,
            font_size: 0.0,
            moved: true,
        }
    }
}

impl TextCursor {
    fn translate(&mut self, tx: f32, ty: f32) {
        self.x += tx * self.scale;
        self.y += ty * self.scale;
        self.moved = true;
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    fn effective_size(&self) -> f32 {
        (self.font_size * self.scale).abs().max(1.0)
    }
}

#[derive(Debug)]
struct OpenBlock {
    x: f32,
    y: f32,
    last_y: f32,
    step: Option<f32>,
    text: String,
}

/// Groups shown strings into blocks.
#[derive(Debug, Default)]
struct BlockBuilder {
    blocks: Vec<TextBlock>,
    current: Option<OpenBlock>,
}

impl BlockBuilder {
    /// Add a string shown at `(x, y)`, with `y` growing down the page.
    fn push(&mut self, x: f32, y: f32, size: f32, text: &str, moved: bool) {
        if text.is_empty() {
            return;
        }

        if let Some(block) = self.current.as_mut() {
            let drop = y - block.last_y;
            if drop.abs() < 0.5 {
                let needs_space = moved
                    && !block.text.ends_with(char::is_whitespace)
                    && !text.starts_with(char::is_whitespace);
                if needs_space {
                    block.text.push(' ');
                }
                block.text.push_str(text);
                return;
            }

            let limit = block
                .step
                .map_or(size * FIRST_STEP_LIMIT, |step| step * STEP_TOLERANCE);
            if drop > 0.0 && drop <= limit {
                block.text.push('\n');
                block.text.push_str(text);
                block.last_y = y;
                block.step.get_or_insert(drop);
                return;
            }
        }

        self.finish();
        self.current = Some(OpenBlock {
            x,
            y,
            last_y: y,
            step: None,
            text: text.to_string(),
        });
    }

    fn finish(&mut self) {
        if let Some(block) = self.current.take() {
            self.blocks.push(TextBlock::new(block.x, block.y, block.text));
        }
    }

    fn into_blocks(mut self) -> Vec<TextBlock> {
        self.finish();
        self.blocks
    }
}

/// Collect the positioned text blocks drawn by a content stream.
fn blocks_from_content(content: &Content) -> Vec<TextBlock> {
    let mut cursor = TextCursor::default();
    let mut builder = BlockBuilder::default();

    for operation in &content.operations {
        let shown = match operation.operator.as_str() {
            "BT" => {
                cursor = TextCursor {
                    leading: cursor.leading,
                    font_size: cursor.font_size,
                    ..TextCursor::default()
                };
                None
            }
            "Tf" => {
                if let Some(size) = operand_number(operation, 1) {
                    cursor.font_size = size;
                }
                None
            }
            "TL" => {
                if let Some(leading) = operand_number(operation, 0) {
                    cursor.leading = leading;
                }
                None
            }
            "Td" | "TD" => {
                if let (Some(tx), Some(ty)) = (operand_number(operation, 0), operand_number(operation, 1)) {
                    if operation.operator == "TD" {
                        cursor.leading = -ty;
                    }
                    cursor.translate(tx, ty);
                }
                None
            }
            "Tm" => {
                let m: Vec<f32> = operation.operands.iter().filter_map(number).collect();
                if let &[_, _, _, d, e, f] = m.as_slice() {
                    cursor.scale = if d == 0.0 { 1.0 } else { d.abs() };
                    cursor.x = e;
                    cursor.y = f;
                    cursor.moved = true;
                }
                None
            }
            "T*" => {
                cursor.next_line();
                None
            }
            "Tj" => operation.operands.first().and_then(decode_string),
            "'" => {
                cursor.next_line();
                operation.operands.first().and_then(decode_string)
            }
            "\"" => {
                cursor.next_line();
                operation.operands.get(2).and_then(decode_string)
            }
            "TJ" => operation.operands.first().and_then(decode_array),
            _ => None,
        };

        if let Some(text) = shown {
            builder.push(cursor.x, -cursor.y, cursor.effective_size(), &text, cursor.moved);
            cursor.moved = false;
        }
    }

    builder.into_blocks()
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

fn operand_number(operation: &Operation, index: usize) -> Option<f32> {
    operation.operands.get(index).and_then(number)
}

/// Decode a PDF string: UTF-16BE with a byte order mark, else Latin-1.
fn decode_string(obj: &Object) -> Option<String> {
    let Object::String(bytes, _) = obj else {
        return None;
    };
    if let [0xFE, 0xFF, rest @ ..] = bytes.as_slice() {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16(&units).ok();
    }
    Some(bytes.iter().map(|&b| b as char).collect())
}

/// Decode a `TJ` array, turning wide negative adjustments into spaces.
fn decode_array(obj: &Object) -> Option<String> {
    let Object::Array(items) = obj else {
        return None;
    };
    let mut text = String::new();
    for item in items {
        match number(item) {
            Some(adjust) if adjust <= -TJ_SPACE_THRESHOLD => {
                if !text.is_empty() && !text.ends_with(' ') {
                    text.push(' ');
                }
            }
            Some(_) => {}
            None => {
                if let Some(s) = decode_string(item) {
                    text.push_str(&s);
                }
            }
        }
    }
    Some(text)
}
