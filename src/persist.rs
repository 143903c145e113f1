//! Writing conversion artifacts to disk.

use crate::error::{Error, Result};
use crate::model::Conversion;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of the metadata sidecar.
pub const METADATA_SUFFIX: &str = "meta.json";

/// Paths of the artifacts written for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutputs {
    /// The Markdown document
    pub markdown_path: PathBuf,

    /// The metadata sidecar, `None` if it could not be written
    pub metadata_path: Option<PathBuf>,
}

/// Write `<stem>.md` and `<stem>.meta.json` into `output_dir`.
///
/// The directory is created if needed. Failing to write the Markdown is an
/// error; failing to write the sidecar is logged and reported as a missing
/// `metadata_path`.
pub fn write_outputs(conversion: &Conversion, stem: &str, output_dir: &Path) -> Result<WrittenOutputs> {
    fs::create_dir_all(output_dir).map_err(|e| Error::persistence(output_dir, e))?;

    let markdown_path = output_dir.join(format!("{}.md", stem));
    fs::write(&markdown_path, &conversion.markdown)
        .map_err(|e| Error::persistence(&markdown_path, e))?;

    let metadata_path = output_dir.join(format!("{}.{}", stem, METADATA_SUFFIX));
    let metadata_path = match write_metadata(conversion, &metadata_path) {
        Ok(()) => Some(metadata_path),
        Err(e) => {
            log::warn!("metadata sidecar not written: {}", e);
            None
        }
    };

    Ok(WrittenOutputs {
        markdown_path,
        metadata_path,
    })
}

fn write_metadata(conversion: &Conversion, path: &Path) -> Result<()> {
    let json = conversion.metadata.to_json()?;
    fs::write(path, json).map_err(|e| Error::persistence(path, e))
}

/// File stem used for a document's outputs.
pub fn output_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "opinion".to_string())
}
