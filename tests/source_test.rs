//! Integration tests for page sources, the converter facade and persistence.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use opinionmd::error::{Error, Result};
use opinionmd::source::{PageSource, PlainTextSource, SourceRegistry};
use opinionmd::{collect_inputs, convert_all, Converter, Metadata};

/// Mock source returning fixed pages.
struct MockSource {
    extensions: Vec<&'static str>,
    name: &'static str,
    pages: Vec<&'static str>,
}

impl MockSource {
    fn new(extensions: Vec<&'static str>, name: &'static str, pages: Vec<&'static str>) -> Self {
        Self {
            extensions,
            name,
            pages,
        }
    }
}

impl PageSource for MockSource {
    fn name(&self) -> &str {
        self.name
    }

    fn supported_extensions(&self) -> &[&str] {
        &self.extensions
    }

    fn pages(&self, _path: &Path) -> Result<Vec<String>> {
        Ok(self.pages.iter().map(|p| p.to_string()).collect())
    }
}

/// Source that always fails to read.
struct BrokenSource;

impl PageSource for BrokenSource {
    fn name(&self) -> &str {
        "broken"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["bad"]
    }

    fn pages(&self, path: &Path) -> Result<Vec<String>> {
        Err(Error::Extraction(format!("cannot open {}", path.display())))
    }
}

const OPINION_TXT: &str = "\
COA 361234 JANE ROE V RICHARD ROE Opinion - Authored - Unpublished 6/2/2023
STATE OF MICHIGAN
COURT OF APPEALS
JANE ROE v RICHARD ROE
No. 361234
Kent County Circuit Court
UNPUBLISHED
June 2, 2023
PER CURIAM.
Plaintiff appeals the judgment of divorce.
\u{000C}-2-
We affirm.
\u{000C}";

#[test]
fn test_registry_register_and_lookup() {
    let mut registry = SourceRegistry::new();
    registry.register(Arc::new(MockSource::new(vec!["ocr", "OCRX"], "mock", vec![])));

    assert!(registry.supports("ocr"));
    assert!(registry.supports("ocrx"));
    assert!(!registry.supports("pdf"));
    assert_eq!(registry.supported_extensions(), vec!["ocr", "ocrx"]);
    assert_eq!(registry.get_by_name("MOCK").unwrap().name(), "mock");
}

#[test]
fn test_converter_with_custom_source() {
    let mut registry = SourceRegistry::new();
    registry.register(Arc::new(MockSource::new(
        vec!["ocr"],
        "mock",
        vec!["COURT OF APPEALS\nOPINION\nReversed and remanded."],
    )));
    let converter = Converter::new().unwrap().with_registry(registry);

    let result = converter.convert("scan.ocr");
    assert!(result.success);
    assert_eq!(result.markdown.as_deref(), Some("OPINION Reversed and remanded.\n"));
    assert!(result.metadata.is_some());
}

#[test]
fn test_extraction_failure_yields_no_output() {
    let mut registry = SourceRegistry::new();
    registry.register(Arc::new(BrokenSource));
    let converter = Converter::new().unwrap().with_registry(registry);

    let err = converter.convert_path("scan.bad").unwrap_err();
    assert!(matches!(err, Error::Extraction(_)));

    let result = converter.convert("scan.bad");
    assert!(!result.success);
    assert!(result.markdown.is_none());
    assert!(result.metadata.is_none());
}

#[test]
fn test_text_file_to_directory() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("coa_361234.txt");
    fs::write(&input, OPINION_TXT).unwrap();

    let pages = PlainTextSource::new().pages(&input).unwrap();
    assert_eq!(pages.len(), 2);

    let out = dir.path().join("out");
    let written = Converter::new().unwrap().convert_to_dir(&input, &out).unwrap();

    let markdown = fs::read_to_string(&written.markdown_path).unwrap();
    assert_eq!(
        markdown,
        "PER CURIAM.\n\nPlaintiff appeals the judgment of divorce.\n\nWe affirm.\n"
    );

    let json = fs::read_to_string(written.metadata_path.unwrap()).unwrap();
    let meta: Metadata = serde_json::from_str(&json).unwrap();
    assert_eq!(meta.case_name.as_deref(), Some("JANE ROE v RICHARD ROE"));
    assert_eq!(meta.case_no.as_deref(), Some("361234"));
    assert_eq!(meta.lower_court.as_deref(), Some("Kent County Circuit Court"));
    assert_eq!(meta.publication.as_deref(), Some("UNPUBLISHED"));
    assert_eq!(meta.date.as_deref(), Some("June 2, 2023"));
    assert!(meta.judges.is_none());
    assert!(json.starts_with("{\n  \"case_name\""));
}

#[test]
fn test_batch_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("one.txt"), "OPINION\nAffirmed.").unwrap();
    fs::write(dir.path().join("two.txt"), "OPINION\nReversed.").unwrap();
    fs::write(dir.path().join("skip.md"), "# not an input").unwrap();

    let converter = Converter::new().unwrap();
    let inputs = collect_inputs(dir.path(), converter.registry()).unwrap();
    assert_eq!(inputs.len(), 2);

    let out = dir.path().join("out");
    let report = convert_all(&converter, &inputs, &out);
    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 0);
    assert_eq!(
        fs::read_to_string(out.join("two.md")).unwrap(),
        "OPINION Reversed.\n"
    );
}
