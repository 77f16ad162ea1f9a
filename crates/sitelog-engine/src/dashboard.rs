use time::OffsetDateTime;

use crate::models::{NewEntry, RiskLevel, WeeklyEntry};
use crate::store::{SiteLogStore, StoreError};

/// Number of newest entries shown on the overview screen.
pub const RECENT_ENTRY_LIMIT: usize = 4;

/// Headline figures for the overview screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub entry_count: usize,
    pub high_risk_count: usize,
    pub latest_report: Option<OffsetDateTime>,
    /// The newest entries, newest first.
    pub recent_entries: Vec<WeeklyEntry>,
}

impl Dashboard {
    pub fn collect(store: &impl SiteLogStore) -> Result<Self, StoreError> {
        let mut entries = store.entries()?;
        let reports = store.reports()?;
        let entry_count = entries.len();
        let high_risk_count = entries
            .iter()
            .filter(|e| e.risk_level == RiskLevel::High)
            .count();
        entries.truncate(RECENT_ENTRY_LIMIT);
        Ok(Self {
            entry_count,
            high_risk_count,
            latest_report: reports.first().map(|r| r.timestamp),
            recent_entries: entries,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("暂无历史记录可供导入。")]
    NoHistory,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A draft for `now`'s week prefilled from the newest stored entry.
pub fn draft_from_last_week(
    store: &impl SiteLogStore,
    now: OffsetDateTime,
) -> Result<NewEntry, DraftError> {
    let entries = store.entries()?;
    let last = entries.first().ok_or(DraftError::NoHistory)?;
    Ok(NewEntry::for_week_of(now).import_from(last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{KvStore, MemoryBackend};
    use time::macros::datetime;

    fn with_levels(levels: &[RiskLevel]) -> KvStore<MemoryBackend> {
        let mut store = KvStore::new(MemoryBackend::new());
        for level in levels {
            store
                .add_entry(NewEntry {
                    risk_level: *level,
                    ..NewEntry::default()
                })
                .unwrap();
        }
        store
    }

    #[test]
    fn empty_dashboard() {
        let dashboard = Dashboard::collect(&with_levels(&[])).unwrap();
        assert_eq!(
            dashboard,
            Dashboard {
                entry_count: 0,
                high_risk_count: 0,
                latest_report: None,
                recent_entries: Vec::new(),
            }
        );
    }

    #[test]
    fn counts_high_risks_and_latest_report() {
        let mut store = with_levels(&[RiskLevel::High, RiskLevel::Low, RiskLevel::High]);
        store.add_report("old".to_string()).unwrap();
        let latest = store.add_report("new".to_string()).unwrap();

        let dashboard = Dashboard::collect(&store).unwrap();
        assert_eq!(dashboard.entry_count, 3);
        assert_eq!(dashboard.high_risk_count, 2);
        assert_eq!(dashboard.latest_report, Some(latest.timestamp));
        assert_eq!(dashboard.recent_entries.len(), 3);
    }

    #[test]
    fn recent_entries_are_the_newest_four() {
        let mut store = KvStore::new(MemoryBackend::new());
        for week in ["W1", "W2", "W3", "W4", "W5", "W6"] {
            store
                .add_entry(NewEntry {
                    week_range: week.to_string(),
                    ..NewEntry::default()
                })
                .unwrap();
        }

        let dashboard = Dashboard::collect(&store).unwrap();

        let weeks: Vec<_> = dashboard
            .recent_entries
            .iter()
            .map(|e| e.week_range.as_str())
            .collect();
        assert_eq!(weeks, vec!["W6", "W5", "W4", "W3"]);
        assert_eq!(dashboard.entry_count, 6);
    }

    #[test]
    fn last_week_draft_needs_history() {
        let store = with_levels(&[]);
        let err = draft_from_last_week(&store, datetime!(2024-03-09 12:00 UTC)).unwrap_err();
        assert!(matches!(err, DraftError::NoHistory));
    }

    #[test]
    fn last_week_draft_uses_newest_entry_and_current_week() {
        let mut store = with_levels(&[RiskLevel::Low]);
        store
            .add_entry(NewEntry {
                progress: "newest".to_string(),
                risk_level: RiskLevel::Medium,
                ..NewEntry::default()
            })
            .unwrap();

        let draft = draft_from_last_week(&store, datetime!(2024-03-09 12:00 UTC)).unwrap();
        assert_eq!(draft.progress, "newest");
        assert_eq!(draft.risk_level, RiskLevel::Medium);
        assert_eq!(draft.week_range, "第 2 周 (3月)");
    }
}
