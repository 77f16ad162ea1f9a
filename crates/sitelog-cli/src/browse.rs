use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};
use sitelog_engine::{
    Dashboard, IngestedDoc, RiskLevel, SiteLogStore, WeeklyEntry, WeeklyReport,
};
use std::io::{Stdout, stdout};

use crate::{commands::format_timestamp, styling::field_lines};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Dashboard,
    Logs,
    Library,
    Reports,
}

impl View {
    const ALL: [View; 4] = [View::Dashboard, View::Logs, View::Library, View::Reports];

    fn title(self) -> &'static str {
        match self {
            View::Dashboard => "概览",
            View::Logs => "周志",
            View::Library => "素材库",
            View::Reports => "周报",
        }
    }

    fn index(self) -> usize {
        View::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }
}

struct App {
    view: View,
    dashboard: Dashboard,
    entries: Vec<WeeklyEntry>,
    docs: Vec<IngestedDoc>,
    reports: Vec<WeeklyReport>,
    list_state: ListState,
}

impl App {
    fn load(store: &impl SiteLogStore) -> Result<Self> {
        Ok(Self {
            view: View::Dashboard,
            dashboard: Dashboard::collect(store)?,
            entries: store.entries()?,
            docs: store.documents()?,
            reports: store.reports()?,
            list_state: ListState::default(),
        })
    }

    fn item_count(&self) -> usize {
        match self.view {
            View::Dashboard => 0,
            View::Logs => self.entries.len(),
            View::Library => self.docs.len(),
            View::Reports => self.reports.len(),
        }
    }

    fn switch_to(&mut self, view: View) {
        self.view = view;
        let first = (self.item_count() > 0).then_some(0);
        self.list_state.select(first);
    }

    fn next_view(&mut self) {
        let next = View::ALL[(self.view.index() + 1) % View::ALL.len()];
        self.switch_to(next);
    }

    fn next_item(&mut self) {
        let len = self.item_count();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn previous_item(&mut self) {
        let len = self.item_count();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }
}

/// Runs the read-only browser until the user quits.
pub fn run(store: &impl SiteLogStore) -> Result<()> {
    let mut app = App::load(store)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab => app.next_view(),
                KeyCode::Char('1') => app.switch_to(View::Dashboard),
                KeyCode::Char('2') => app.switch_to(View::Logs),
                KeyCode::Char('3') => app.switch_to(View::Library),
                KeyCode::Char('4') => app.switch_to(View::Reports),
                KeyCode::Down | KeyCode::Char('j') => app.next_item(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_item(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    let tabs = Tabs::new(View::ALL.iter().map(|v| v.title()))
        .block(Block::default().borders(Borders::ALL).title("sitelog"))
        .select(app.view.index())
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, chunks[0]);

    match app.view {
        View::Dashboard => draw_dashboard(f, app, chunks[1]),
        _ => draw_list_view(f, app, chunks[1]),
    }

    let help = Paragraph::new(Line::from(
        "q: Quit | Tab/1-4: Switch view | ↑/k: Previous | ↓/j: Next",
    ));
    f.render_widget(help, chunks[2]);
}

fn draw_dashboard(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let d = &app.dashboard;
    let latest = d
        .latest_report
        .map(format_timestamp)
        .unwrap_or_else(|| "无".to_string());
    let high_style = if d.high_risk_count > 0 {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let lines = vec![
        Line::from(format!("打卡记录: {}", d.entry_count)),
        Line::from(vec![
            Span::raw("高风险项: "),
            Span::styled(d.high_risk_count.to_string(), high_style),
        ]),
        Line::from(format!("最新周报: {latest}")),
    ];
    let body = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("概览"));
    f.render_widget(body, chunks[0]);

    let recent = Paragraph::new(recent_entry_lines(app))
        .block(Block::default().borders(Borders::ALL).title("最近打卡"))
        .wrap(Wrap { trim: false });
    f.render_widget(recent, chunks[1]);
}

/// The overview's entry table: a header per entry, then its styled fields.
fn recent_entry_lines(app: &App) -> Vec<Line<'static>> {
    let entries = &app.dashboard.recent_entries;
    if entries.is_empty() {
        return vec![Line::from("暂无打卡记录")];
    }

    let mut lines = Vec::new();
    for e in entries {
        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", e.risk_level.badge()),
                Style::default().fg(risk_color(e.risk_level)),
            ),
            Span::styled(
                e.week_range.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {}", format_timestamp(e.date))),
        ]));
        for (label, raw) in [("进展", &e.progress), ("风险", &e.risks), ("计划", &e.plan)] {
            for (i, mut line) in field_lines(raw).into_iter().enumerate() {
                let prefix = if i == 0 {
                    format!("  {label}: ")
                } else {
                    "        ".to_string()
                };
                line.spans.insert(0, Span::raw(prefix));
                lines.push(line);
            }
        }
        lines.push(Line::default());
    }
    lines
}

fn risk_color(level: RiskLevel) -> Color {
    match level {
        RiskLevel::Low => Color::Green,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High => Color::Red,
    }
}

fn list_items(app: &App) -> Vec<ListItem<'static>> {
    match app.view {
        View::Dashboard => Vec::new(),
        View::Logs => app
            .entries
            .iter()
            .map(|e| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("[{}] ", e.risk_level.badge()),
                        Style::default().fg(risk_color(e.risk_level)),
                    ),
                    Span::raw(e.week_range.clone()),
                ]))
            })
            .collect(),
        View::Library => app
            .docs
            .iter()
            .map(|d| ListItem::new(format!("[{}] {}", d.doc_type, d.name)))
            .collect(),
        View::Reports => app
            .reports
            .iter()
            .map(|r| ListItem::new(format_timestamp(r.timestamp)))
            .collect(),
    }
}

fn detail_lines(app: &App) -> Vec<Line<'static>> {
    let Some(index) = app.selected() else {
        return vec![Line::from("暂无内容")];
    };
    let heading = |text: &str| {
        Line::from(Span::styled(
            text.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
    };

    match app.view {
        View::Dashboard => Vec::new(),
        View::Logs => app
            .entries
            .get(index)
            .map(|e| {
                let mut lines = vec![
                    Line::from(format!(
                        "{}  {}  {}",
                        e.week_range,
                        e.risk_level.label(),
                        format_timestamp(e.date)
                    )),
                    Line::default(),
                ];
                for (label, raw) in [
                    ("进展", &e.progress),
                    ("风险", &e.risks),
                    ("计划", &e.plan),
                ] {
                    lines.push(heading(label));
                    lines.extend(field_lines(raw));
                    lines.push(Line::default());
                }
                if e.sketch.is_some() {
                    lines.push(Line::from("(附草图)"));
                }
                lines
            })
            .unwrap_or_default(),
        View::Library => app
            .docs
            .get(index)
            .map(|d| {
                let mut lines = vec![heading(d.name.as_str()), Line::default()];
                lines.extend(d.content.lines().map(|l| Line::from(l.to_string())));
                lines
            })
            .unwrap_or_default(),
        View::Reports => app
            .reports
            .get(index)
            .map(|r| {
                r.content
                    .lines()
                    .map(|l| {
                        if l.starts_with('#') {
                            heading(l.trim_start_matches('#').trim())
                        } else {
                            Line::from(l.to_string())
                        }
                    })
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn draw_list_view(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let list = List::new(list_items(app))
        .block(Block::default().borders(Borders::ALL).title(app.view.title()))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));
    f.render_stateful_widget(list, chunks[0], &mut app.list_state);

    let detail = Paragraph::new(detail_lines(app))
        .block(Block::default().borders(Borders::ALL).title("详情"))
        .wrap(Wrap { trim: false });
    f.render_widget(detail, chunks[1]);
}
