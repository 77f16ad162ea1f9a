pub mod assistant;
pub mod dashboard;
pub mod export;
pub mod markup;
pub mod models;
pub mod store;

// Re-export key types for easier usage
pub use assistant::{Assistant, GenerationError, Models, ReportError, TextGenerator};
pub use dashboard::{Dashboard, DraftError, draft_from_last_week};
pub use models::*;
pub use store::{DirBackend, KvBackend, KvStore, MemoryBackend, SiteLogStore, StoreError};
