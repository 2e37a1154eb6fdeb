use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use rusqlite::Connection;

use crate::config::AppConfig;
use crate::db::repository::{PlanRepo, SmokingStatusRepo, UserRepo};
use crate::metrics::calculate_savings;
use crate::models::{NewQuitPlan, NewSmokingStatus, SmokingStatus, user::validate_username};
use crate::session::Session;
use crate::tasks::generate_for_plan;
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::utils::dates::{format_date, parse_date, to_db};
use crate::utils::format::{format_currency, parse_amount};

// ─── Wizard steps ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Welcome,
    Username,
    Cigarettes,
    CostPerPack,
    StartDate,
    PlanName,
    TargetDate,
    Reason,
    Confirm,
}

// ─── Wizard state ─────────────────────────────────────────────────────────────

struct SetupWizard {
    step: Step,
    input: String,
    error: Option<String>,
    /// Username step is skipped when a session already exists.
    has_session: bool,
    currency_suffix: String,

    // Collected values
    username: String,
    cigarettes_per_day: u32,
    cost_per_pack: f64,
    start_date: NaiveDate,
    plan_name: String,
    target_date: NaiveDate,
    reason: String,

    should_quit: bool,
    confirmed: bool,
}

impl SetupWizard {
    fn new(config: &AppConfig, session: Option<&Session>) -> Self {
        let today = Local::now().date_naive();
        Self {
            step: Step::Welcome,
            input: String::new(),
            error: None,
            has_session: session.is_some(),
            currency_suffix: config.currency.suffix.clone(),

            username: session.map(|s| s.username.clone()).unwrap_or_default(),
            cigarettes_per_day: 10,
            cost_per_pack: 30_000.0,
            start_date: today,
            plan_name: "My quit plan".to_string(),
            target_date: today + Duration::days(30),
            reason: String::new(),

            should_quit: false,
            confirmed: false,
        }
    }

    fn step_number(&self) -> usize {
        match self.step {
            Step::Welcome => 0,
            Step::Username => 1,
            Step::Cigarettes => 2,
            Step::CostPerPack => 3,
            Step::StartDate => 4,
            Step::PlanName => 5,
            Step::TargetDate => 6,
            Step::Reason => 7,
            Step::Confirm => 8,
        }
    }

    const TOTAL_STEPS: usize = 8;

    fn next_step(&self) -> Step {
        match self.step {
            Step::Welcome if self.has_session => Step::Cigarettes,
            Step::Welcome => Step::Username,
            Step::Username => Step::Cigarettes,
            Step::Cigarettes => Step::CostPerPack,
            Step::CostPerPack => Step::StartDate,
            Step::StartDate => Step::PlanName,
            Step::PlanName => Step::TargetDate,
            Step::TargetDate => Step::Reason,
            Step::Reason => Step::Confirm,
            Step::Confirm => Step::Confirm,
        }
    }

    fn prev_step(&self) -> Option<Step> {
        Some(match self.step {
            Step::Welcome => return None,
            Step::Username => Step::Welcome,
            Step::Cigarettes if self.has_session => Step::Welcome,
            Step::Cigarettes => Step::Username,
            Step::CostPerPack => Step::Cigarettes,
            Step::StartDate => Step::CostPerPack,
            Step::PlanName => Step::StartDate,
            Step::TargetDate => Step::PlanName,
            Step::Reason => Step::TargetDate,
            Step::Confirm => Step::Reason,
        })
    }

    fn current_value(&self) -> String {
        match self.step {
            Step::Username => self.username.clone(),
            Step::Cigarettes => self.cigarettes_per_day.to_string(),
            Step::CostPerPack => format!("{}", self.cost_per_pack),
            Step::StartDate => to_db(self.start_date),
            Step::PlanName => self.plan_name.clone(),
            Step::TargetDate => to_db(self.target_date),
            Step::Reason => self.reason.clone(),
            _ => String::new(),
        }
    }

    fn advance(&mut self) {
        self.error = None;
        if self.step == Step::Confirm {
            self.confirmed = true;
            return;
        }
        self.step = self.next_step();
        // Pre-fill input with current value when entering a text step
        self.input = self.current_value();
    }

    fn go_back(&mut self) {
        self.error = None;
        match self.prev_step() {
            None => self.should_quit = true,
            Some(step) => {
                self.step = step;
                self.input = self.current_value();
            }
        }
    }

    fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.step {
            Step::Welcome => {
                if key.code == KeyCode::Esc {
                    self.should_quit = true;
                } else {
                    self.advance();
                }
            }
            Step::Confirm => match key.code {
                KeyCode::Enter | KeyCode::Char('y') => self.confirmed = true,
                KeyCode::Esc | KeyCode::Char('n') => self.go_back(),
                _ => {}
            },
            _ => self.handle_text_input(key),
        }
    }

    fn handle_text_input(&mut self, key: crossterm::event::KeyEvent) {
        match key.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Enter => {
                let val = self.input.trim().to_string();
                match self.commit(&val) {
                    Ok(()) => self.advance(),
                    Err(e) => self.error = Some(e),
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.error = None;
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                self.error = None;
            }
            _ => {}
        }
    }

    /// Validate the typed value and store it on success.
    fn commit(&mut self, val: &str) -> std::result::Result<(), String> {
        match self.step {
            Step::Username => {
                validate_username(val).map_err(|e| e.to_string())?;
                self.username = val.to_string();
            }
            Step::Cigarettes => {
                let n: u32 = val
                    .parse()
                    .map_err(|_| "Enter a whole number (e.g. 10)".to_string())?;
                if n == 0 {
                    return Err("Cigarettes per day must be greater than 0".to_string());
                }
                self.cigarettes_per_day = n;
            }
            Step::CostPerPack => {
                let cost = parse_amount(val)
                    .ok_or_else(|| "Enter a price (e.g. 30000 or 12.50)".to_string())?;
                if cost <= 0.0 {
                    return Err("Cost per pack must be greater than 0".to_string());
                }
                self.cost_per_pack = cost;
            }
            Step::StartDate => {
                self.start_date = parse_date(val).map_err(|e| e.to_string())?;
            }
            Step::PlanName => {
                if val.is_empty() {
                    return Err("Give your plan a name".to_string());
                }
                self.plan_name = val.to_string();
            }
            Step::TargetDate => {
                let target = parse_date(val).map_err(|e| e.to_string())?;
                if target <= self.start_date {
                    return Err(format!(
                        "Target must be after the start date ({})",
                        format_date(self.start_date)
                    ));
                }
                self.target_date = target;
            }
            Step::Reason => {
                if val.is_empty() {
                    return Err("Your reason keeps you going. Write one down".to_string());
                }
                self.reason = val.to_string();
            }
            Step::Welcome | Step::Confirm => {}
        }
        Ok(())
    }

    fn preview_status(&self) -> SmokingStatus {
        SmokingStatus {
            id: 0,
            user_id: 0,
            cigarettes_per_day: self.cigarettes_per_day,
            cost_per_pack: self.cost_per_pack,
            start_date: self.start_date,
            created_at: String::new(),
        }
    }

    /// Profile, habit, plan and checklist land together or not at all.
    fn save(&self, conn: &Connection) -> Result<Session> {
        let tx = conn.unchecked_transaction()?;
        let session = match Session::current(&tx)? {
            Some(session) => session,
            None => match UserRepo::find_by_name(&tx, &self.username)? {
                Some(_) => Session::login(&tx, &self.username)?,
                None => Session::register(&tx, &self.username)?,
            },
        };

        let status = SmokingStatusRepo::add(
            &tx,
            session.user_id,
            &NewSmokingStatus {
                cigarettes_per_day: self.cigarettes_per_day,
                cost_per_pack: self.cost_per_pack,
                start_date: self.start_date,
            },
        )?;
        let plan = PlanRepo::create(
            &tx,
            session.user_id,
            &NewQuitPlan {
                name: self.plan_name.clone(),
                start_date: self.start_date,
                target_quit_date: self.target_date,
                reason: self.reason.clone(),
                smoking_status_id: Some(status.id),
            },
        )?;
        generate_for_plan(&tx, &session, &plan)?;
        tx.commit()?;
        Ok(session)
    }
}

// ─── Rendering ────────────────────────────────────────────────────────────────

fn draw(frame: &mut Frame, wizard: &SetupWizard) {
    let area = frame.area();

    frame.render_widget(Block::default().style(theme::base()), area);

    // Center the wizard box
    let vchunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(24),
            Constraint::Min(0),
        ])
        .split(area);

    let hchunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(64),
            Constraint::Min(0),
        ])
        .split(vchunks[1]);

    let box_area = hchunks[1];
    frame.render_widget(Clear, box_area);

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::leaf())
        .style(theme::surface())
        .title(Span::styled(
            "  smokefree · setup  ",
            theme::leaf().add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);

    frame.render_widget(outer_block, box_area);

    let inner = Rect {
        x: box_area.x + 2,
        y: box_area.y + 1,
        width: box_area.width.saturating_sub(4),
        height: box_area.height.saturating_sub(2),
    };

    match wizard.step {
        Step::Welcome => draw_welcome(frame, inner),
        Step::Confirm => draw_confirm(frame, inner, wizard),
        _ => draw_text_step(frame, inner, wizard),
    }

    draw_progress(frame, inner, wizard.step_number(), SetupWizard::TOTAL_STEPS);
}

fn draw_progress(frame: &mut Frame, area: Rect, current: usize, total: usize) {
    let mut spans = vec![Span::styled("  ", theme::dim())];
    for i in 1..=total {
        if i < current {
            spans.push(Span::styled("● ", theme::green()));
        } else if i == current {
            spans.push(Span::styled("◉ ", theme::leaf()));
        } else {
            spans.push(Span::styled("○ ", theme::dim()));
        }
    }
    let progress_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: 1,
    };
    frame.render_widget(Paragraph::new(Line::from(spans)), progress_area);
}

fn content_area(area: Rect) -> Rect {
    Rect {
        x: area.x,
        y: area.y + 2,
        width: area.width,
        height: area.height.saturating_sub(2),
    }
}

fn draw_welcome(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to smokefree",
            theme::leaf().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Every cigarette you skip is money kept and breath regained.",
            theme::dim(),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled("This wizard will ask for:", theme::dim())),
        Line::from(vec![
            Span::styled("  ●  ", theme::leaf()),
            Span::styled("How much you smoke and what a pack costs", theme::dim()),
        ]),
        Line::from(vec![
            Span::styled("  ●  ", theme::leaf()),
            Span::styled("Your start date and target quit date", theme::dim()),
        ]),
        Line::from(vec![
            Span::styled("  ●  ", theme::leaf()),
            Span::styled("The reason you are quitting", theme::dim()),
        ]),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Press  Enter  to begin  ·  Esc  to cancel",
            theme::dim(),
        )),
    ];

    let para = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(para, content_area(area));
}

fn draw_text_step(frame: &mut Frame, area: Rect, wizard: &SetupWizard) {
    let (title, subtitle, hint) = match wizard.step {
        Step::Username => (
            "Your Name",
            "A local profile name for your records",
            "letters, digits, - and _",
        ),
        Step::Cigarettes => (
            "Cigarettes per Day",
            "On a typical day, how many do you smoke?",
            "e.g.  10  ·  a pack is 20",
        ),
        Step::CostPerPack => (
            "Cost per Pack",
            "What does one pack cost you?",
            "e.g.  30000",
        ),
        Step::StartDate => (
            "Start Date",
            "The first day of your quit plan",
            "YYYY-MM-DD",
        ),
        Step::PlanName => ("Plan Name", "Name your plan", "e.g.  Fresh air by summer"),
        Step::TargetDate => (
            "Target Quit Date",
            "The day you want to be fully smoke-free",
            "YYYY-MM-DD, after the start date",
        ),
        Step::Reason => (
            "Your Reason",
            "Why are you quitting?",
            "e.g.  For my kids",
        ),
        _ => ("", "", ""),
    };

    let cursor = if wizard.input.len() < 40 { "█" } else { "" };

    let mut lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(title, theme::leaf().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(subtitle, theme::dim())),
        Line::from(""),
        Line::from(""),
    ];

    let input_display = format!("  {}{}  ", wizard.input, cursor);
    let input_width = area.width.saturating_sub(8) as usize;
    let padded = format!("{:<width$}", input_display, width = input_width);

    let input_style = if wizard.error.is_some() {
        theme::red()
    } else {
        theme::amber()
    };

    lines.push(Line::from(Span::styled(padded, input_style.add_modifier(Modifier::BOLD))));
    lines.push(Line::from(""));

    if let Some(err) = &wizard.error {
        lines.push(Line::from(Span::styled(format!("  ✗  {}", err), theme::red())));
    } else {
        lines.push(Line::from(Span::styled(hint, theme::dim())));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter  confirm   ·   Esc  back",
        theme::dim(),
    )));

    let para = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(para, content_area(area));
}

fn draw_confirm(frame: &mut Frame, area: Rect, wizard: &SetupWizard) {
    let suffix = &wizard.currency_suffix;
    let plan_days = (wizard.target_date - wizard.start_date).num_days();
    let projected = calculate_savings(Some(&wizard.preview_status()), plan_days);

    let row = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {:<14}", label), theme::dim()),
            Span::styled(value, theme::bold()),
        ])
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Confirm", theme::leaf().add_modifier(Modifier::BOLD))),
        Line::from(""),
        row("Name", wizard.username.clone()),
        row("Habit", format!("{} cigarettes/day", wizard.cigarettes_per_day)),
        row("Pack price", format_currency(wizard.cost_per_pack, suffix)),
        row("Plan", wizard.plan_name.clone()),
        row(
            "Dates",
            format!(
                "{} → {}",
                format_date(wizard.start_date),
                format_date(wizard.target_date)
            ),
        ),
        row("Reason", wizard.reason.clone()),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Over {} days you keep {} and skip {} cigarettes",
                plan_days,
                format_currency(projected.money_saved, suffix),
                projected.cigarettes_avoided
            ),
            theme::green(),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Enter  save   ·   Esc  go back",
            theme::dim(),
        )),
    ];

    let para = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(para, content_area(area));
}

// ─── Public entry point ──────────────────────────────────────────────────────

pub fn run_setup_tui(conn: &Connection, config: &mut AppConfig) -> Result<()> {
    let session = Session::current(conn)?;
    let mut wizard = SetupWizard::new(config, session.as_ref());
    let mut terminal = ratatui::init();
    let events = EventHandler::new(100);

    let mut saved = None;
    loop {
        terminal.draw(|frame| draw(frame, &wizard))?;

        match events.next()? {
            Event::Key(key) => {
                wizard.handle_key(key);
                if wizard.should_quit {
                    break;
                }
                if wizard.confirmed {
                    saved = Some(wizard.save(conn));
                    break;
                }
            }
            Event::Tick => {}
        }
    }

    ratatui::restore();

    if let Some(result) = saved {
        let session = result?;
        config.profile.display_name = session.username.clone();
        config.save()?;
        log::info!("Setup complete for {}", session.username);
        println!("  ✓ All set, {}. Run `smokefree` to open the dashboard.", session.username);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::TaskRepo;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(w: &mut SetupWizard, s: &str) {
        w.input.clear();
        for c in s.chars() {
            w.handle_key(key(KeyCode::Char(c)));
        }
        w.handle_key(key(KeyCode::Enter));
    }

    #[test]
    fn walks_every_step_without_session() {
        let mut w = SetupWizard::new(&AppConfig::default(), None);
        w.handle_key(key(KeyCode::Enter));
        assert_eq!(w.step, Step::Username);

        type_str(&mut w, "lan");
        type_str(&mut w, "20");
        type_str(&mut w, "25.000");
        type_str(&mut w, "2024-06-01");
        type_str(&mut w, "Summer");
        type_str(&mut w, "2024-07-01");
        type_str(&mut w, "Kids");
        assert_eq!(w.step, Step::Confirm);
        assert_eq!(w.cost_per_pack, 25_000.0);

        w.handle_key(key(KeyCode::Enter));
        assert!(w.confirmed);
    }

    #[test]
    fn session_skips_username() {
        let session = Session {
            user_id: 1,
            username: "minh".to_string(),
        };
        let mut w = SetupWizard::new(&AppConfig::default(), Some(&session));
        w.handle_key(key(KeyCode::Enter));
        assert_eq!(w.step, Step::Cigarettes);
        w.handle_key(key(KeyCode::Esc));
        assert_eq!(w.step, Step::Welcome);
    }

    #[test]
    fn rejects_bad_values_in_place() {
        let mut w = SetupWizard::new(&AppConfig::default(), None);
        w.step = Step::Cigarettes;
        type_str(&mut w, "0");
        assert_eq!(w.step, Step::Cigarettes);
        assert!(w.error.is_some());

        w.step = Step::StartDate;
        type_str(&mut w, "2024-06-01");
        type_str(&mut w, "x");
        type_str(&mut w, "2024-05-01");
        assert_eq!(w.step, Step::TargetDate);
        assert!(w.error.unwrap().contains("after the start date"));
    }

    #[test]
    fn save_writes_status_and_plan() {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::migrations::run_migrations(&conn).unwrap();

        let mut w = SetupWizard::new(&AppConfig::default(), None);
        w.username = "lan".to_string();
        w.reason = "Health".to_string();
        let session = w.save(&conn).unwrap();

        let status = SmokingStatusRepo::latest(&conn, session.user_id).unwrap().unwrap();
        let plan = PlanRepo::active(&conn, session.user_id).unwrap().unwrap();
        assert_eq!(plan.smoking_status_id, Some(status.id));
        let tasks = TaskRepo::list(&conn, session.user_id, false).unwrap();
        assert!(tasks.iter().any(|t| t.title == "Quit day" && t.plan_id == Some(plan.id)));
        assert_eq!(Session::current(&conn).unwrap(), Some(session));
    }

    #[test]
    fn failed_save_leaves_nothing_behind() {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::migrations::run_migrations(&conn).unwrap();

        let mut w = SetupWizard::new(&AppConfig::default(), None);
        w.username = "lan".to_string();
        w.reason = String::new();
        assert!(w.save(&conn).is_err());

        let count = |table: &str| -> i64 {
            conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
                .unwrap()
        };
        assert_eq!(count("smoking_status"), 0);
        assert_eq!(count("users"), 0);
        assert!(Session::current(&conn).unwrap().is_none());
    }

    #[test]
    fn cost_keeps_its_decimal_point() {
        let mut w = SetupWizard::new(&AppConfig::default(), None);
        w.handle_key(key(KeyCode::Enter));
        type_str(&mut w, "lan");
        type_str(&mut w, "20");
        type_str(&mut w, "12.50");
        assert_eq!(w.step, Step::StartDate);
        assert_eq!(w.cost_per_pack, 12.5);

        w.step = Step::CostPerPack;
        type_str(&mut w, "1.234.56");
        assert_eq!(w.step, Step::CostPerPack);
        assert_eq!(w.cost_per_pack, 12.5);
    }
}
