//! # Persistence
//!
//! Entries, documents and reports are stored as JSON arrays, newest first,
//! under three fixed keys of a [`KvBackend`]. Every write is a plain
//! read-modify-write of the whole array with no locking; one user and one
//! process are assumed.
//!
//! There is no schema versioning. A stored array that no longer parses is
//! reported as [`StoreError::Corrupt`] and left untouched.

pub mod backend;

use serde::{Serialize, de::DeserializeOwned};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::models::{EntryPatch, IngestedDoc, NewDocument, NewEntry, WeeklyEntry, WeeklyReport};

pub use backend::{DirBackend, KvBackend, MemoryBackend};

pub const ENTRIES_KEY: &str = "dl_weekly_entries";
pub const DOCS_KEY: &str = "dl_ingested_docs";
pub const REPORTS_KEY: &str = "dl_weekly_reports";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage IO error for '{key}': {source}")]
    Io {
        key: String,
        source: std::io::Error,
    },
    #[error("Stored data under '{key}' is unreadable: {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },
    #[error("Failed to encode records for '{key}': {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },
}

/// The persistence operations the application needs. Lists are newest first.
pub trait SiteLogStore {
    fn entries(&self) -> Result<Vec<WeeklyEntry>, StoreError>;
    fn add_entry(&mut self, entry: NewEntry) -> Result<WeeklyEntry, StoreError>;
    /// Returns `None` when no entry has this id.
    fn update_entry(
        &mut self,
        id: Uuid,
        patch: EntryPatch,
    ) -> Result<Option<WeeklyEntry>, StoreError>;
    /// Deleting an unknown id is a no-op.
    fn delete_entry(&mut self, id: Uuid) -> Result<(), StoreError>;

    fn documents(&self) -> Result<Vec<IngestedDoc>, StoreError>;
    fn add_document(&mut self, doc: NewDocument) -> Result<IngestedDoc, StoreError>;
    fn delete_document(&mut self, id: Uuid) -> Result<(), StoreError>;

    fn reports(&self) -> Result<Vec<WeeklyReport>, StoreError>;
    fn add_report(&mut self, content: String) -> Result<WeeklyReport, StoreError>;
}

/// [`SiteLogStore`] over any [`KvBackend`].
#[derive(Debug, Default)]
pub struct KvStore<B> {
    backend: B,
}

impl<B: KvBackend> KvStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        match self.backend.get(key)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn save<T: Serialize>(&mut self, key: &str, records: &[T]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(records).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        log::debug!("Writing {} records to {key}", records.len());
        self.backend.set(key, &raw)
    }

    fn prepend<T: Serialize + DeserializeOwned>(
        &mut self,
        key: &str,
        record: T,
    ) -> Result<(), StoreError> {
        let mut records: Vec<T> = self.load(key)?;
        records.insert(0, record);
        self.save(key, &records)
    }
}

impl<B: KvBackend> SiteLogStore for KvStore<B> {
    fn entries(&self) -> Result<Vec<WeeklyEntry>, StoreError> {
        self.load(ENTRIES_KEY)
    }

    fn add_entry(&mut self, entry: NewEntry) -> Result<WeeklyEntry, StoreError> {
        let entry = entry.into_entry(Uuid::new_v4(), OffsetDateTime::now_utc());
        self.prepend(ENTRIES_KEY, entry.clone())?;
        Ok(entry)
    }

    fn update_entry(
        &mut self,
        id: Uuid,
        patch: EntryPatch,
    ) -> Result<Option<WeeklyEntry>, StoreError> {
        let mut entries = self.entries()?;
        let Some(entry) = entries.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        patch.apply(entry);
        let updated = entry.clone();
        self.save(ENTRIES_KEY, &entries)?;
        Ok(Some(updated))
    }

    fn delete_entry(&mut self, id: Uuid) -> Result<(), StoreError> {
        let mut entries = self.entries()?;
        entries.retain(|e| e.id != id);
        self.save(ENTRIES_KEY, &entries)
    }

    fn documents(&self) -> Result<Vec<IngestedDoc>, StoreError> {
        self.load(DOCS_KEY)
    }

    fn add_document(&mut self, doc: NewDocument) -> Result<IngestedDoc, StoreError> {
        let doc = doc.into_doc(Uuid::new_v4(), OffsetDateTime::now_utc());
        self.prepend(DOCS_KEY, doc.clone())?;
        Ok(doc)
    }

    fn delete_document(&mut self, id: Uuid) -> Result<(), StoreError> {
        let mut docs = self.documents()?;
        docs.retain(|d| d.id != id);
        self.save(DOCS_KEY, &docs)
    }

    fn reports(&self) -> Result<Vec<WeeklyReport>, StoreError> {
        self.load(REPORTS_KEY)
    }

    fn add_report(&mut self, content: String) -> Result<WeeklyReport, StoreError> {
        let report = WeeklyReport {
            id: Uuid::new_v4(),
            content,
            timestamp: OffsetDateTime::now_utc(),
        };
        self.prepend(REPORTS_KEY, report.clone())?;
        Ok(report)
    }
}
