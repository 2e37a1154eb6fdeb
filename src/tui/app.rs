use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use rusqlite::Connection;

use crate::config::AppConfig;
use crate::db::repository::{ProgressRepo, TaskRepo};
use crate::metrics::{BadgeKind, next_badge};
use crate::models::{DailyStats, Task};
use crate::overview::Overview;
use crate::session::Session;
use crate::tracker;
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{badges, header, health, plan, savings, statusbar, streak, tasks};
use crate::utils::dates::{format_date, parse_date};
use crate::utils::format::{format_compact, format_currency, pad_display};

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Dashboard,
    Badges,
    History,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    RecordInput,
}

pub struct App {
    pub view: View,
    pub config: AppConfig,
    pub session: Session,
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub input_error: Option<String>,
    /// One-line confirmation shown in place of the key hints.
    pub notice: Option<String>,

    // Cached state (refreshed on load)
    pub today: NaiveDate,
    pub overview: Overview,
    pub history: Vec<DailyStats>,
    pub upcoming_tasks: Vec<Task>,
    pub overdue_tasks: Vec<Task>,
}

impl App {
    pub fn new(config: AppConfig, session: Session, today: NaiveDate) -> Self {
        App {
            view: View::Dashboard,
            config,
            session,
            should_quit: false,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            input_error: None,
            notice: None,
            today,
            overview: Overview::compute(None, None, None, &[], today),
            history: Vec::new(),
            upcoming_tasks: Vec::new(),
            overdue_tasks: Vec::new(),
        }
    }

    pub fn load(&mut self, conn: &Connection) -> Result<()> {
        self.overview = Overview::load(conn, &self.session, self.today)?;

        let span = i64::from(self.config.tui.history_days.clamp(7, 366));
        let start = self.today - Duration::days(span - 1);
        self.history = ProgressRepo::daily_stats(conn, self.session.user_id, start, self.today)?;

        self.overdue_tasks = TaskRepo::overdue(conn, self.session.user_id, self.today)?;
        self.upcoming_tasks = TaskRepo::upcoming(conn, self.session.user_id, self.today, 5)?;
        Ok(())
    }

    /// Last seven entries of the history window.
    pub fn weekly(&self) -> &[DailyStats] {
        let skip = self.history.len().saturating_sub(7);
        &self.history[skip..]
    }

    pub fn tick(&mut self, conn: &Connection) {
        let today = Local::now().date_naive();
        if today != self.today {
            log::debug!("Date rolled over to {}", today);
            self.today = today;
            self.notice = None;
            if let Err(e) = self.load(conn) {
                log::warn!("Reloading dashboard failed: {:#}", e);
            }
        }
    }

    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent, conn: &Connection) {
        // Some terminals also report release and repeat events
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.input_mode {
            InputMode::RecordInput => self.handle_record_input(key, conn),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: crossterm::event::KeyEvent) {
        match self.view {
            View::Dashboard => self.handle_dashboard_key(key),
            View::Badges => self.handle_sub_view_key(key, 'b'),
            View::History => self.handle_sub_view_key(key, 's'),
            View::Help => self.handle_sub_view_key(key, '?'),
        }
    }

    fn handle_dashboard_key(&mut self, key: crossterm::event::KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.view = View::Help,
            KeyCode::Char('b') => self.view = View::Badges,
            KeyCode::Char('s') => self.view = View::History,
            KeyCode::Char('r') => {
                self.input_mode = InputMode::RecordInput;
                self.input_buffer.clear();
                self.input_error = None;
                self.notice = None;
            }
            _ => {}
        }
    }

    /// Sub views close with Esc or the key that opened them.
    fn handle_sub_view_key(&mut self, key: crossterm::event::KeyEvent, toggle: char) {
        match key.code {
            KeyCode::Esc => self.view = View::Dashboard,
            KeyCode::Char(c) if c == toggle => self.view = View::Dashboard,
            _ => {}
        }
    }

    fn handle_record_input(&mut self, key: crossterm::event::KeyEvent, conn: &Connection) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                self.input_error = None;
            }
            KeyCode::Enter => {
                let trimmed = self.input_buffer.trim().to_string();
                if trimmed.is_empty() {
                    self.input_error = Some("Enter a number first (0 if none)".to_string());
                    return;
                }
                match trimmed.parse::<u32>() {
                    Ok(count) => match self.record_today(conn, count) {
                        Ok(()) => {
                            self.input_mode = InputMode::Normal;
                            self.input_buffer.clear();
                            self.input_error = None;
                        }
                        Err(e) => {
                            log::warn!("Recording today failed: {:#}", e);
                            self.input_error = Some(format!("Could not save: {}", e));
                        }
                    },
                    Err(_) => {
                        self.input_error = Some(format!("'{}' is not a whole number", trimmed));
                    }
                }
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
                self.input_error = None;
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.input_buffer.push(c);
                self.input_error = None;
            }
            _ => {}
        }
    }

    /// Records today's count, keeping any health note already written for the day.
    fn record_today(&mut self, conn: &Connection, count: u32) -> Result<()> {
        let note = ProgressRepo::range(conn, self.session.user_id, self.today, self.today)?
            .into_iter()
            .next()
            .map(|r| r.health_status)
            .unwrap_or_default();
        let record = tracker::record_day(conn, &self.session, self.today, count, &note)?;
        self.load(conn)?;

        self.notice = Some(if record.is_smoke_free() {
            format!(
                "✓ Smoke-free day recorded · {} kept",
                format_currency(record.money_saved, &self.config.currency.suffix)
            )
        } else {
            format!("✓ Recorded {} cigarettes today. Tomorrow is a new start", count)
        });
        Ok(())
    }

    pub fn draw(&self, frame: &mut Frame) {
        match self.view {
            View::Dashboard => self.draw_dashboard(frame),
            View::Badges => self.draw_badges(frame),
            View::History => self.draw_history(frame),
            View::Help => {
                self.draw_dashboard(frame);
                self.draw_help_overlay(frame);
            }
        }

        if self.input_mode == InputMode::RecordInput {
            self.draw_record_input(frame);
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame) {
        let area = frame.area();

        frame.render_widget(Block::default().style(theme::base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        header::render(
            frame,
            outer_chunks[0],
            &self.config.profile.display_name,
            self.overview.days_quit,
        );
        statusbar::render(frame, outer_chunks[2], self.notice.as_deref());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(outer_chunks[1]);

        // Left column: Savings + Tasks + Plan
        let left_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7),
                Constraint::Length(8),
                Constraint::Min(0),
            ])
            .split(columns[0]);

        savings::render(
            frame,
            left_chunks[0],
            &self.overview,
            &self.config.currency.suffix,
        );
        tasks::render(
            frame,
            left_chunks[1],
            &self.overdue_tasks,
            &self.upcoming_tasks,
            self.today,
        );
        plan::render(frame, left_chunks[2], &self.overview);

        // Right column: Streak + Badges + Health
        let right_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Length(7),
                Constraint::Min(0),
            ])
            .split(columns[1]);

        streak::render(frame, right_chunks[0], &self.overview.streak, self.weekly());
        badges::render(frame, right_chunks[1], &self.overview);
        if self.config.tui.show_health {
            health::render(
                frame,
                right_chunks[2],
                &self.overview.health,
                self.overview.next_milestone.as_ref(),
            );
        }
    }

    fn draw_badges(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let title = Paragraph::new(Line::from(vec![
            Span::styled("  Badges  ", theme::leaf().add_modifier(Modifier::BOLD)),
            Span::styled("  [Esc] back", theme::dim()),
        ]));
        frame.render_widget(title, chunks[0]);

        let mut lines = Vec::new();
        for kind in BadgeKind::all() {
            let value = self.overview.metric_for(kind);
            lines.push(Line::from(Span::styled(
                format!("  {}", kind.display_name()),
                theme::leaf(),
            )));
            lines.push(Line::from(""));
            for badge in kind.ladder() {
                let earned = value >= badge.threshold;
                let (mark, style) = if earned {
                    ("✓", theme::amber().add_modifier(Modifier::BOLD))
                } else {
                    ("·", theme::dim())
                };
                let target = match kind {
                    BadgeKind::Days => format!("{} days", badge.threshold),
                    BadgeKind::Money => format_compact(badge.threshold),
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("   {} ", mark), style),
                    Span::styled(pad_display(&format!("{} {}", badge.icon, badge.title), 24), style),
                    Span::styled(pad_display(&target, 10), theme::dim()),
                    Span::styled(badge.description, theme::dim()),
                ]));
            }
            if let Some(next) = next_badge(kind, value) {
                let left = next.threshold - value;
                let remaining = match kind {
                    BadgeKind::Days => format!("{} more days", left.ceil()),
                    BadgeKind::Money => format_currency(left, &self.config.currency.suffix),
                };
                lines.push(Line::from(Span::styled(
                    format!("   Next: {} in {}", next.title, remaining),
                    theme::sky(),
                )));
            }
            lines.push(Line::from(""));
        }

        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }

    fn draw_history(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let title = Paragraph::new(Line::from(vec![
            Span::styled("  History  ", theme::leaf().add_modifier(Modifier::BOLD)),
            Span::styled("  [Esc] back", theme::dim()),
        ]));
        frame.render_widget(title, chunks[0]);

        let mut lines = vec![
            Line::from(vec![
                Span::styled("  Streak (current):  ", theme::dim()),
                Span::styled(
                    format!("{} days", self.overview.streak.current),
                    theme::green().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Streak (best):     ", theme::dim()),
                Span::styled(format!("{} days", self.overview.streak.best), theme::green()),
            ]),
            Line::from(vec![
                Span::styled("  Recorded savings:  ", theme::dim()),
                Span::styled(
                    format_currency(self.overview.recorded_savings, &self.config.currency.suffix),
                    theme::amber(),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                format!("  Last {} days", self.history.len()),
                theme::leaf(),
            )),
            Line::from(""),
        ];

        let baseline = self
            .overview
            .status
            .as_ref()
            .map(|s| s.cigarettes_per_day)
            .unwrap_or(20)
            .max(1);

        for stat in self.history.iter().rev() {
            let date = parse_date(&stat.date)
                .map(format_date)
                .unwrap_or_else(|_| stat.date.clone());
            let (bar, label, style) = match stat.cigarettes_smoked {
                None => ("░".repeat(12), "not recorded".to_string(), theme::dim()),
                Some(0) => ("█".repeat(12), "smoke-free".to_string(), theme::green()),
                Some(n) => {
                    let kept = baseline.saturating_sub(n);
                    let filled = (kept as usize * 12) / baseline as usize;
                    (
                        format!("{}{}", "█".repeat(filled), "░".repeat(12 - filled)),
                        format!("{} smoked", n),
                        theme::amber(),
                    )
                }
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {}  ", bar), style),
                Span::styled(format!("{}  {}", date, label), theme::dim()),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();

        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 4,
            width: area.width / 2,
            height: (area.height / 2).max(10),
        };

        frame.render_widget(Clear, popup_area);

        let binding = |key: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {:<8}", key), theme::leaf()),
                Span::styled(what, theme::dim()),
            ])
        };

        let help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::leaf().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            binding("[r]", "Record today's cigarettes"),
            binding("[b]", "Badge ladders"),
            binding("[s]", "History and streaks"),
            binding("[?]", "Toggle help"),
            binding("[Esc]", "Back / quit"),
        ];

        let block = Block::default()
            .title(Span::styled(" Help ", theme::leaf()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::leaf())
            .style(theme::surface());

        frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
    }

    fn draw_record_input(&self, frame: &mut Frame) {
        let area = frame.area();
        let height = if self.input_error.is_some() { 7 } else { 5 };

        let popup_area = Rect {
            x: area.width / 4,
            y: (area.height / 2).saturating_sub(3),
            width: area.width / 2,
            height,
        };

        frame.render_widget(Clear, popup_area);

        let mut text = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Cigarettes smoked today: ", theme::dim()),
                Span::styled(
                    self.input_buffer.as_str(),
                    theme::leaf().add_modifier(Modifier::BOLD),
                ),
                Span::styled("█", theme::amber()),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "  Type a number, then [Enter]  ·  [Esc] cancel",
                theme::dim(),
            )),
        ];

        if let Some(err) = &self.input_error {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(format!("  ✗ {}", err), theme::red())));
        }

        let border_style = if self.input_error.is_some() {
            theme::red()
        } else {
            theme::amber()
        };

        let block = Block::default()
            .title(Span::styled(" Record Today ", theme::leaf()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .style(theme::surface());

        frame.render_widget(Paragraph::new(text).block(block), popup_area);
    }
}

/// Run the TUI event loop.
pub fn run(conn: Connection, config: AppConfig, session: Session) -> Result<()> {
    let tick_rate = config.tui.tick_rate_ms;
    let mut app = App::new(config, session, Local::now().date_naive());
    app.load(&conn)?;

    let mut terminal = ratatui::init();
    let events = EventHandler::new(tick_rate);

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        match events.next()? {
            Event::Key(key) => {
                app.handle_key(key, &conn);
                if app.should_quit {
                    break;
                }
            }
            Event::Tick => app.tick(&conn),
        }
    }

    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::db::repository::SmokingStatusRepo;
    use crate::models::NewSmokingStatus;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn setup() -> (Connection, App) {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let session = Session::register(&conn, "lan").unwrap();
        SmokingStatusRepo::add(
            &conn,
            session.user_id,
            &NewSmokingStatus {
                cigarettes_per_day: 20,
                cost_per_pack: 40_000.0,
                start_date: d(2024, 6, 1),
            },
        )
        .unwrap();
        let mut app = App::new(AppConfig::default(), session, d(2024, 6, 8));
        app.load(&conn).unwrap();
        (conn, app)
    }

    #[test]
    fn load_fills_history_window() {
        let (_conn, app) = setup();
        assert_eq!(app.overview.days_quit, 7);
        assert_eq!(app.history.len(), 14);
        assert_eq!(app.weekly().len(), 7);
        assert_eq!(app.weekly().last().unwrap().date, "2024-06-08");
    }

    #[test]
    fn history_window_is_clamped() {
        let (conn, mut app) = setup();
        app.config.tui.history_days = 100_000_000;
        app.load(&conn).unwrap();
        assert_eq!(app.history.len(), 366);

        app.config.tui.history_days = 1;
        app.load(&conn).unwrap();
        assert_eq!(app.history.len(), 7);
    }

    #[test]
    fn load_splits_overdue_and_upcoming_tasks() {
        let (conn, mut app) = setup();
        crate::tasks::generate_daily(&conn, &app.session, d(2024, 6, 7)).unwrap();
        crate::tasks::generate_daily(&conn, &app.session, app.today).unwrap();
        app.load(&conn).unwrap();
        assert_eq!(app.overdue_tasks.len(), 2);
        assert_eq!(app.upcoming_tasks.len(), 2);
        assert_eq!(app.upcoming_tasks[0].title, "Record today's progress");

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Drink enough water"));
    }

    #[test]
    fn record_popup_saves_today() {
        let (conn, mut app) = setup();
        app.handle_key(key(KeyCode::Char('r')), &conn);
        assert_eq!(app.input_mode, InputMode::RecordInput);

        app.handle_key(key(KeyCode::Char('x')), &conn);
        assert!(app.input_buffer.is_empty());

        app.handle_key(key(KeyCode::Enter), &conn);
        assert!(app.input_error.is_some());

        app.handle_key(key(KeyCode::Char('0')), &conn);
        app.handle_key(key(KeyCode::Enter), &conn);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.overview.streak.current, 1);
        assert!(app.weekly().last().unwrap().is_smoke_free());
        assert!(app.notice.as_deref().unwrap().contains("40.000"));
    }

    #[test]
    fn rerecording_keeps_health_note() {
        let (conn, mut app) = setup();
        tracker::record_day(&conn, &app.session, app.today, 2, "headache").unwrap();

        app.handle_key(key(KeyCode::Char('r')), &conn);
        app.handle_key(key(KeyCode::Char('1')), &conn);
        app.handle_key(key(KeyCode::Enter), &conn);

        let rec = ProgressRepo::list(&conn, app.session.user_id).unwrap();
        assert_eq!(rec.len(), 1);
        assert_eq!(rec[0].cigarettes_smoked, 1);
        assert_eq!(rec[0].health_status, "headache");
    }

    #[test]
    fn views_toggle_and_escape_quits() {
        let (conn, mut app) = setup();
        app.handle_key(key(KeyCode::Char('b')), &conn);
        assert_eq!(app.view, View::Badges);
        app.handle_key(key(KeyCode::Char('b')), &conn);
        assert_eq!(app.view, View::Dashboard);

        app.handle_key(key(KeyCode::Char('s')), &conn);
        assert_eq!(app.view, View::History);
        app.handle_key(key(KeyCode::Esc), &conn);
        assert_eq!(app.view, View::Dashboard);
        assert!(!app.should_quit);

        app.handle_key(key(KeyCode::Esc), &conn);
        assert!(app.should_quit);
    }

    #[test]
    fn every_view_renders() {
        let (conn, mut app) = setup();
        tracker::record_day(&conn, &app.session, d(2024, 6, 7), 0, "").unwrap();
        app.load(&conn).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        for view in [View::Dashboard, View::Badges, View::History, View::Help] {
            app.view = view;
            terminal.draw(|frame| app.draw(frame)).unwrap();
        }
        app.input_mode = InputMode::RecordInput;
        app.input_error = Some("bad".to_string());
        terminal.draw(|frame| app.draw(frame)).unwrap();
    }
}
