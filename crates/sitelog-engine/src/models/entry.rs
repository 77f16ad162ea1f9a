use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Filler used by a quick confirmation for blank progress and plan fields.
pub const AS_PLANNED: &str = "按原计划推进";
/// Filler used by a quick confirmation for a blank risks field.
pub const NO_RISKS: &str = "无";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Short badge label used in entry tables.
    pub fn badge(self) -> &'static str {
        match self {
            RiskLevel::Low => "可控",
            RiskLevel::Medium => "中等",
            RiskLevel::High => "严重",
        }
    }

    /// Label used when choosing a level.
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "低风险",
            RiskLevel::Medium => "中风险",
            RiskLevel::High => "高风险",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown risk level '{0}' (expected low, medium or high)")]
pub struct ParseRiskLevelError(String);

impl FromStr for RiskLevel {
    type Err = ParseRiskLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RiskLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseRiskLevelError(s.to_string()))
    }
}

/// One week's record. Text fields hold raw entry markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyEntry {
    pub id: Uuid,
    /// Creation time.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub week_range: String,
    pub progress: String,
    pub risks: String,
    pub plan: String,
    pub risk_level: RiskLevel,
    /// Freehand sketch, an image data URL or path.
    #[serde(default, rename = "doodle", skip_serializing_if = "Option::is_none")]
    pub sketch: Option<String>,
}

/// The user-supplied part of an entry; the store assigns id and date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEntry {
    pub week_range: String,
    pub progress: String,
    pub risks: String,
    pub plan: String,
    pub risk_level: RiskLevel,
    pub sketch: Option<String>,
}

impl NewEntry {
    /// Blank draft labelled with the week containing `now`.
    pub fn for_week_of(now: OffsetDateTime) -> Self {
        Self {
            week_range: week_label(now),
            ..Self::default()
        }
    }

    /// Copies the text and risk level of `last` into this draft.
    ///
    /// The week label and sketch are left alone.
    pub fn import_from(self, last: &WeeklyEntry) -> Self {
        Self {
            progress: last.progress.clone(),
            risks: last.risks.clone(),
            plan: last.plan.clone(),
            risk_level: last.risk_level,
            ..self
        }
    }

    /// Fills blank fields for an "everything went to plan" week.
    pub fn quick_confirm(self) -> Self {
        fn or_default(value: String, default: &str) -> String {
            if value.is_empty() {
                default.to_string()
            } else {
                value
            }
        }
        Self {
            progress: or_default(self.progress, AS_PLANNED),
            risks: or_default(self.risks, NO_RISKS),
            plan: or_default(self.plan, AS_PLANNED),
            risk_level: RiskLevel::Low,
            ..self
        }
    }

    pub(crate) fn into_entry(self, id: Uuid, date: OffsetDateTime) -> WeeklyEntry {
        WeeklyEntry {
            id,
            date,
            week_range: self.week_range,
            progress: self.progress,
            risks: self.risks,
            plan: self.plan,
            risk_level: self.risk_level,
            sketch: self.sketch,
        }
    }
}

/// Partial update of an existing entry. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub progress: Option<String>,
    pub risks: Option<String>,
    pub plan: Option<String>,
    pub risk_level: Option<RiskLevel>,
    pub sketch: Option<String>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub(crate) fn apply(self, entry: &mut WeeklyEntry) {
        if let Some(progress) = self.progress {
            entry.progress = progress;
        }
        if let Some(risks) = self.risks {
            entry.risks = risks;
        }
        if let Some(plan) = self.plan {
            entry.plan = plan;
        }
        if let Some(level) = self.risk_level {
            entry.risk_level = level;
        }
        if let Some(sketch) = self.sketch {
            entry.sketch = Some(sketch);
        }
    }
}

/// `第 N 周 (M月)`, where N counts seven-day blocks of the month.
pub fn week_label(date: OffsetDateTime) -> String {
    format!(
        "第 {} 周 ({}月)",
        date.day().div_ceil(7),
        u8::from(date.month())
    )
}
