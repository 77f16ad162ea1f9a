pub mod document;
pub mod entry;
pub mod report;

pub use document::{IngestedDoc, NewDocument, doc_type_for};
pub use entry::{EntryPatch, NewEntry, RiskLevel, WeeklyEntry, week_label};
pub use report::WeeklyReport;
