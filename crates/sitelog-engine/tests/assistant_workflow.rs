use std::cell::RefCell;

use pretty_assertions::assert_eq;
use sitelog_engine::assistant::{
    EXTRACTION_EMPTY, EXTRACTION_FAILED, REPORT_EMPTY, REPORT_ENTRY_LIMIT,
};
use sitelog_engine::{
    Assistant, GenerationError, KvStore, MemoryBackend, Models, NewEntry, ReportError,
    SiteLogStore, TextGenerator,
};

/// Replays canned responses and records every call.
struct ScriptedGenerator {
    responses: RefCell<Vec<Result<String, GenerationError>>>,
    calls: RefCell<Vec<(String, String)>>,
}

impl ScriptedGenerator {
    fn new(responses: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            responses: RefCell::new(responses),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn replying(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    fn failing() -> Self {
        Self::new(vec![Err(GenerationError::Response {
            status: 503,
            body: "unavailable".to_string(),
        })])
    }
}

impl TextGenerator for ScriptedGenerator {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerationError> {
        self.calls
            .borrow_mut()
            .push((model.to_string(), prompt.to_string()));
        self.responses.borrow_mut().remove(0)
    }
}

fn store_with_entries(count: usize) -> KvStore<MemoryBackend> {
    let mut store = KvStore::new(MemoryBackend::new());
    for i in 0..count {
        store
            .add_entry(NewEntry {
                week_range: format!("W{i}"),
                progress: format!("progress {i}"),
                ..NewEntry::default()
            })
            .unwrap();
    }
    store
}

#[test]
fn report_without_entries_never_calls_service() {
    let generator = ScriptedGenerator::replying("unused");
    let assistant = Assistant::new(&generator, Models::default());
    let mut store = store_with_entries(0);

    let err = assistant.generate_report(&mut store).unwrap_err();

    assert!(matches!(err, ReportError::NoEntries));
    assert!(generator.calls.borrow().is_empty());
    assert!(store.reports().unwrap().is_empty());
}

#[test]
fn report_uses_five_newest_entries_and_is_stored() {
    let generator = ScriptedGenerator::replying("## 一、本周工作回顾\n...");
    let assistant = Assistant::new(&generator, Models::default());
    let mut store = store_with_entries(7);

    let report = assistant.generate_report(&mut store).unwrap();

    assert_eq!(report.content, "## 一、本周工作回顾\n...");
    assert_eq!(store.reports().unwrap(), vec![report]);

    let calls = generator.calls.borrow();
    let (model, prompt) = &calls[0];
    assert_eq!(model, "gemini-3-pro-preview");
    assert_eq!(prompt.matches("周次: ").count(), REPORT_ENTRY_LIMIT);
    assert!(prompt.contains("周次: W6"));
    assert!(!prompt.contains("周次: W1\n"));
}

#[test]
fn empty_report_text_is_replaced() {
    let generator = ScriptedGenerator::replying("");
    let assistant = Assistant::new(&generator, Models::default());
    let mut store = store_with_entries(1);

    let report = assistant.generate_report(&mut store).unwrap();
    assert_eq!(report.content, REPORT_EMPTY);
}

#[test]
fn report_failure_is_surfaced_and_not_stored() {
    let generator = ScriptedGenerator::failing();
    let assistant = Assistant::new(&generator, Models::default());
    let mut store = store_with_entries(2);

    let err = assistant.generate_report(&mut store).unwrap_err();

    assert!(matches!(
        err,
        ReportError::Generation(GenerationError::Response { status: 503, .. })
    ));
    assert!(err.to_string().starts_with("AI 报告生成失败"));
    assert_eq!(generator.calls.borrow().len(), 1);
    assert!(store.reports().unwrap().is_empty());
}

#[test]
fn ingest_stores_extracted_summary() {
    let generator = ScriptedGenerator::replying("设备11月20日到货");
    let assistant = Assistant::new(
        &generator,
        Models {
            report: "r".to_string(),
            extraction: "fast".to_string(),
        },
    );
    let mut store = store_with_entries(0);

    let doc = assistant
        .ingest_document(&mut store, "进度表.xlsx", "raw cells")
        .unwrap();

    assert_eq!(doc.name, "进度表.xlsx");
    assert_eq!(doc.doc_type, "xlsx");
    assert_eq!(doc.content, "设备11月20日到货");
    assert_eq!(store.documents().unwrap(), vec![doc]);
    let calls = generator.calls.borrow();
    assert_eq!(calls[0].0, "fast");
    assert!(calls[0].1.contains("raw cells"));
}

#[test]
fn extraction_failure_falls_back_to_literal() {
    let generator = ScriptedGenerator::failing();
    let assistant = Assistant::new(&generator, Models::default());
    let mut store = store_with_entries(0);

    let doc = assistant
        .ingest_document(&mut store, "memo.pdf", "text")
        .unwrap();

    assert_eq!(doc.content, EXTRACTION_FAILED);
    assert_eq!(store.documents().unwrap().len(), 1);
}

#[test]
fn empty_extraction_falls_back_to_no_info() {
    let generator = ScriptedGenerator::replying("");
    let assistant = Assistant::new(&generator, Models::default());
    assert_eq!(assistant.extract("a.txt", "x"), EXTRACTION_EMPTY);
}
