//! # Assistant
//!
//! Report drafting and document extraction over an injected
//! [`TextGenerator`]. The two operations fail differently:
//!
//! - **Report generation** surfaces failures to the caller as
//!   [`ReportError`] so the user sees them. Nothing is retried.
//! - **Extraction** never fails; a service error is logged and replaced by
//!   [`EXTRACTION_FAILED`] so ingestion always stores a document.

pub mod generator;
pub mod prompt;

use crate::models::{IngestedDoc, NewDocument, WeeklyReport};
use crate::store::{SiteLogStore, StoreError};

pub use generator::{GenerationError, TextGenerator};

/// Number of most recent entries fed into a report.
pub const REPORT_ENTRY_LIMIT: usize = 5;

pub const DEFAULT_REPORT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_EXTRACTION_MODEL: &str = "gemini-3-flash-preview";

/// Stored when the service returns an empty report.
pub const REPORT_EMPTY: &str = "生成失败。";
/// Stored when extraction returns no text.
pub const EXTRACTION_EMPTY: &str = "无关键信息";
/// Stored when the extraction call fails.
pub const EXTRACTION_FAILED: &str = "提取失败";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("没有足够的打卡记录。请先进行每周打卡。")]
    NoEntries,
    #[error("AI 报告生成失败，请检查 API 配置。 ({0})")]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Which model handles which task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Models {
    pub report: String,
    pub extraction: String,
}

impl Default for Models {
    fn default() -> Self {
        Self {
            report: DEFAULT_REPORT_MODEL.to_string(),
            extraction: DEFAULT_EXTRACTION_MODEL.to_string(),
        }
    }
}

pub struct Assistant<G> {
    generator: G,
    models: Models,
}

impl<G: TextGenerator> Assistant<G> {
    pub fn new(generator: G, models: Models) -> Self {
        Self { generator, models }
    }

    /// Drafts a report from the latest entries and every ingested document,
    /// then stores it.
    ///
    /// Fails with [`ReportError::NoEntries`] before contacting the service
    /// when there is nothing to report on.
    pub fn generate_report(
        &self,
        store: &mut impl SiteLogStore,
    ) -> Result<WeeklyReport, ReportError> {
        let mut entries = store.entries()?;
        if entries.is_empty() {
            return Err(ReportError::NoEntries);
        }
        entries.truncate(REPORT_ENTRY_LIMIT);
        let docs = store.documents()?;

        log::info!(
            "Generating report from {} entries and {} documents with {}",
            entries.len(),
            docs.len(),
            self.models.report
        );
        let prompt = prompt::report_prompt(&entries, &docs);
        let content = self.generator.generate(&self.models.report, &prompt)?;
        let content = if content.is_empty() {
            REPORT_EMPTY.to_string()
        } else {
            content
        };

        Ok(store.add_report(content)?)
    }

    /// Summarizes one document. Always returns displayable text.
    pub fn extract(&self, file_name: &str, raw_text: &str) -> String {
        let prompt = prompt::extraction_prompt(file_name, raw_text);
        match self.generator.generate(&self.models.extraction, &prompt) {
            Ok(text) if text.is_empty() => EXTRACTION_EMPTY.to_string(),
            Ok(text) => text,
            Err(e) => {
                log::warn!("Extraction failed for {file_name}: {e}");
                EXTRACTION_FAILED.to_string()
            }
        }
    }

    /// Extracts a summary of `raw_text` and stores it as a document.
    pub fn ingest_document(
        &self,
        store: &mut impl SiteLogStore,
        file_name: &str,
        raw_text: &str,
    ) -> Result<IngestedDoc, StoreError> {
        let summary = self.extract(file_name, raw_text);
        store.add_document(NewDocument::new(file_name, summary))
    }
}
