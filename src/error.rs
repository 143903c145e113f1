//! Error types for opinionmd.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for opinionmd operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting an opinion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// The page source could not open or read the input.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// Writing an output artifact failed.
    #[error("Failed to write {}: {source}", path.display())]
    Persistence {
        /// Artifact that could not be written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A built-in rule pattern failed to compile.
    ///
    /// The stages themselves are total over any text, so this is the only
    /// way a conversion fails after its pages were read.
    #[error("Invalid rule pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl Error {
    /// Wrap an I/O error raised while writing `path`.
    pub fn persistence(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Persistence {
            path: path.into(),
            source,
        }
    }
}

#[cfg(feature = "pdf")]
impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Extraction(err.to_string()),
        }
    }
}
