//! Directory batch conversion.
//!
//! Documents are independent, so a batch converts them in parallel with
//! rayon. Outcomes are reported in input order.

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::persist::WrittenOutputs;
use crate::source::SourceRegistry;
use crate::Converter;

/// Outcome of converting one input file.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Input file
    pub input: PathBuf,
    /// Written artifacts, or the reason the document failed
    pub result: Result<WrittenOutputs>,
}

impl BatchOutcome {
    /// Check if the document converted.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-file outcomes of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Outcomes in input order
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchReport {
    /// Number of documents converted.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of documents that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Outcomes of failed documents.
    pub fn failures(&self) -> impl Iterator<Item = &BatchOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

/// List the files in `dir` that a registered source can read.
///
/// Not recursive. Paths are sorted.
pub fn collect_inputs(dir: &Path, registry: &SourceRegistry) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && registry.supports_path(&path) {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Convert every input and write its outputs into `output_dir`.
pub fn convert_all(converter: &Converter, inputs: &[PathBuf], output_dir: &Path) -> BatchReport {
    convert_all_with_progress(converter, inputs, output_dir, |_| {})
}

/// Like [`convert_all`], calling `on_done` as each document finishes.
///
/// `on_done` runs on worker threads in completion order.
pub fn convert_all_with_progress<F>(
    converter: &Converter,
    inputs: &[PathBuf],
    output_dir: &Path,
    on_done: F,
) -> BatchReport
where
    F: Fn(&BatchOutcome) + Sync,
{
    let outcomes: Vec<BatchOutcome> = inputs
        .par_iter()
        .map(|input| {
            let outcome = BatchOutcome {
                input: input.clone(),
                result: converter.convert_to_dir(input, output_dir),
            };
            if let Err(e) = &outcome.result {
                log::error!("{}: {}", input.display(), e);
            }
            on_done(&outcome);
            outcome
        })
        .collect();

    let report = BatchReport { outcomes };
    log::info!(
        "batch finished: {} converted, {} failed",
        report.succeeded(),
        report.failed()
    );
    report
}
