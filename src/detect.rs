//! Input format sniffing.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Bytes read from the start of a file when sniffing.
const SNIFF_LEN: usize = 1024;

/// Kind of input file, judged from its leading bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// PDF document with its header version (e.g., "1.7")
    Pdf { version: String },
    /// UTF-8 text dump
    Text,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Pdf { version } => write!(f, "PDF {}", version),
            InputKind::Text => f.write_str("text"),
        }
    }
}

/// Sniff the input kind of a file.
///
/// # Example
/// ```no_run
/// use opinionmd::detect::{sniff_path, InputKind};
///
/// if let InputKind::Pdf { version } = sniff_path("opinion.pdf").unwrap() {
///     println!("PDF version: {}", version);
/// }
/// ```
pub fn sniff_path<P: AsRef<Path>>(path: P) -> Result<InputKind> {
    let file = File::open(path)?;
    let mut head = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64).read_to_end(&mut head)?;
    sniff_bytes(&head)
}

/// Sniff the input kind from leading bytes.
///
/// Data starting with `%PDF-` must carry a `d.d` version. Anything else is
/// accepted as text when it is valid UTF-8 without NUL bytes; a multi-byte
/// character cut off at the end of the sample is tolerated.
pub fn sniff_bytes(data: &[u8]) -> Result<InputKind> {
    if data.starts_with(PDF_MAGIC) {
        let version = data
            .get(PDF_MAGIC.len()..PDF_MAGIC.len() + VERSION_LEN)
            .ok_or(Error::UnknownFormat)?;
        let version = String::from_utf8_lossy(version).into_owned();
        if !is_valid_version(&version) {
            return Err(Error::UnsupportedVersion(version));
        }
        return Ok(InputKind::Pdf { version });
    }

    if data.contains(&0) {
        return Err(Error::UnknownFormat);
    }
    match std::str::from_utf8(data) {
        Ok(_) => Ok(InputKind::Text),
        Err(e) if e.error_len().is_none() => Ok(InputKind::Text),
        Err(_) => Err(Error::UnknownFormat),
    }
}

fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}
