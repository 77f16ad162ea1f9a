use std::{fs, io::Write, path::Path};

use anyhow::{Context, Result, anyhow, bail};
use html_escape::encode_text;
use sitelog_config::Config;
use sitelog_engine::{
    Assistant, Dashboard, EntryPatch, NewEntry, SiteLogStore, TextGenerator, WeeklyEntry,
    draft_from_last_week, export::report_to_html, markup,
};
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};
use uuid::Uuid;

use crate::cli::{AddEntryArgs, EntryFields};

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

pub fn format_timestamp(timestamp: OffsetDateTime) -> String {
    timestamp
        .format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| timestamp.to_string())
}

impl EntryFields {
    fn into_patch(self) -> EntryPatch {
        EntryPatch {
            progress: self.progress,
            risks: self.risks,
            plan: self.plan,
            risk_level: self.risk_level,
            sketch: self.sketch,
        }
    }
}

/// Builds the new entry from the flags and stores it.
///
/// Explicit field flags win over values imported from last week.
/// `--quick` runs last, so it only fills what is still blank.
pub fn add_entry(
    store: &mut impl SiteLogStore,
    args: AddEntryArgs,
    now: OffsetDateTime,
) -> Result<WeeklyEntry> {
    let mut draft = if args.from_last_week {
        draft_from_last_week(store, now)?
    } else {
        NewEntry::for_week_of(now)
    };

    if let Some(week) = args.week {
        draft.week_range = week;
    }
    let fields = args.fields;
    if let Some(progress) = fields.progress {
        draft.progress = progress;
    }
    if let Some(risks) = fields.risks {
        draft.risks = risks;
    }
    if let Some(plan) = fields.plan {
        draft.plan = plan;
    }
    if let Some(level) = fields.risk_level {
        draft.risk_level = level;
    }
    if fields.sketch.is_some() {
        draft.sketch = fields.sketch;
    }
    if args.quick {
        draft = draft.quick_confirm();
    }

    Ok(store.add_entry(draft)?)
}

pub fn edit_entry(
    store: &mut impl SiteLogStore,
    id: Uuid,
    fields: EntryFields,
) -> Result<WeeklyEntry> {
    let patch = fields.into_patch();
    if patch.is_empty() {
        bail!(
            "Nothing to change: pass at least one of --progress, --risks, --plan, --risk, --sketch"
        );
    }
    store
        .update_entry(id, patch)?
        .ok_or_else(|| anyhow!("No entry with id {id}"))
}

pub fn list_entries(
    store: &impl SiteLogStore,
    limit: Option<usize>,
    html: bool,
    out: &mut impl Write,
) -> Result<()> {
    let entries = store.entries()?;
    if entries.is_empty() {
        writeln!(out, "暂无打卡记录")?;
        return Ok(());
    }

    for entry in entries.iter().take(limit.unwrap_or(usize::MAX)) {
        if html {
            write_entry_html(entry, out)?;
        } else {
            write_entry_plain(entry, out)?;
        }
    }
    Ok(())
}

fn write_entry_plain(entry: &WeeklyEntry, out: &mut impl Write) -> Result<()> {
    let field = |raw: &str| markup::to_plain(&markup::render_text(Some(raw)));
    writeln!(
        out,
        "{}  [{}]  {}  {}",
        entry.week_range,
        entry.risk_level.badge(),
        format_timestamp(entry.date),
        entry.id
    )?;
    writeln!(out, "  进展: {}", field(&entry.progress))?;
    writeln!(out, "  风险: {}", field(&entry.risks))?;
    writeln!(out, "  计划: {}", field(&entry.plan))?;
    if entry.sketch.is_some() {
        writeln!(out, "  (附草图)")?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_entry_html(entry: &WeeklyEntry, out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        r#"<section class="entry" data-id="{}" data-risk="{}">"#,
        entry.id, entry.risk_level
    )?;
    writeln!(out, "<h3>{}</h3>", encode_text(&entry.week_range))?;
    for (label, raw) in [
        ("进展", &entry.progress),
        ("风险", &entry.risks),
        ("计划", &entry.plan),
    ] {
        writeln!(out, "<h4>{label}</h4>")?;
        writeln!(out, "{}", markup::to_html_block(Some(raw)))?;
    }
    writeln!(out, "</section>")?;
    Ok(())
}

pub fn delete_entry(store: &mut impl SiteLogStore, id: Uuid) -> Result<()> {
    store.delete_entry(id)?;
    Ok(())
}

/// Reads each file as text and stores its extracted summary.
///
/// Bytes that are not UTF-8 are replaced rather than rejected.
pub fn ingest_documents<G: TextGenerator>(
    assistant: &Assistant<G>,
    store: &mut impl SiteLogStore,
    files: &[impl AsRef<Path>],
    out: &mut impl Write,
) -> Result<()> {
    for path in files {
        let path = path.as_ref();
        let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let raw_text = String::from_utf8_lossy(&bytes);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let doc = assistant.ingest_document(store, &name, &raw_text)?;
        writeln!(out, "{}  [{}]  {}", doc.name, doc.doc_type, doc.id)?;
        writeln!(out, "  {}", doc.content)?;
    }
    Ok(())
}

pub fn list_documents(store: &impl SiteLogStore, out: &mut impl Write) -> Result<()> {
    let docs = store.documents()?;
    if docs.is_empty() {
        writeln!(out, "素材库为空")?;
        return Ok(());
    }
    for doc in docs {
        writeln!(
            out,
            "{}  [{}]  {}  {}",
            doc.name,
            doc.doc_type,
            format_timestamp(doc.timestamp),
            doc.id
        )?;
        writeln!(out, "  {}", doc.content)?;
    }
    Ok(())
}

pub fn delete_document(store: &mut impl SiteLogStore, id: Uuid) -> Result<()> {
    store.delete_document(id)?;
    Ok(())
}

pub fn generate_report<G: TextGenerator>(
    assistant: &Assistant<G>,
    store: &mut impl SiteLogStore,
    out: &mut impl Write,
) -> Result<()> {
    let report = assistant.generate_report(store)?;
    writeln!(out, "{}", report.content)?;
    log::info!("Stored report {}", report.id);
    Ok(())
}

pub fn list_reports(store: &impl SiteLogStore, out: &mut impl Write) -> Result<()> {
    let reports = store.reports()?;
    if reports.is_empty() {
        writeln!(out, "暂无周报")?;
        return Ok(());
    }
    for report in reports {
        let title = report
            .content
            .lines()
            .find(|line| !line.trim().is_empty())
            .unwrap_or_default()
            .trim_start_matches('#')
            .trim();
        writeln!(
            out,
            "{}  {}  {}",
            format_timestamp(report.timestamp),
            report.id,
            title
        )?;
    }
    Ok(())
}

pub fn show_report(
    store: &impl SiteLogStore,
    id: Option<Uuid>,
    html: bool,
    out: &mut impl Write,
) -> Result<()> {
    let reports = store.reports()?;
    let report = match id {
        Some(id) => reports
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| anyhow!("No report with id {id}"))?,
        None => reports
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("暂无周报"))?,
    };

    if html {
        write!(out, "{}", report_to_html(&report.content))?;
    } else {
        writeln!(out, "{}", report.content)?;
    }
    Ok(())
}

pub fn show_dashboard(store: &impl SiteLogStore, out: &mut impl Write) -> Result<()> {
    let dashboard = Dashboard::collect(store)?;
    writeln!(out, "打卡记录: {}", dashboard.entry_count)?;
    writeln!(out, "高风险项: {}", dashboard.high_risk_count)?;
    let latest = dashboard
        .latest_report
        .map(format_timestamp)
        .unwrap_or_else(|| "无".to_string());
    writeln!(out, "最新周报: {latest}")?;

    if !dashboard.recent_entries.is_empty() {
        writeln!(out)?;
        writeln!(out, "最近打卡:")?;
        for entry in &dashboard.recent_entries {
            write_entry_plain(entry, out)?;
        }
    }
    Ok(())
}

/// Writes the default settings to `path`, refusing to replace a file
/// unless `force` is set.
pub fn init_config(path: &Path, force: bool, out: &mut impl Write) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file {} already exists (use --force to overwrite)",
            path.display()
        );
    }
    Config::default().save_to_path(path)?;
    writeln!(out, "Wrote {}", path.display())?;
    Ok(())
}
