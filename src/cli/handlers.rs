use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDate, Timelike};
use rusqlite::Connection;
use serde::Serialize;

use crate::cli::args::{
    PlanCommands, ProgressCommands, StageCommands, StatusCommands, TaskCommands,
};
use crate::config::AppConfig;
use crate::db::repository::{PlanRepo, ProgressRepo, SmokingStatusRepo, StageRepo, TaskRepo};
use crate::metrics::{BadgeKind, earned_badges, greeting, monthly_cost, next_badge};
use crate::models::{
    NewQuitPlan, NewSmokingStatus, NewStage, NewTask, ProgressRecord, QuitPlan, SmokingStatus,
    Stage, Task, TaskPriority, TaskStatus, TaskType,
};
use crate::overview::Overview;
use crate::session::Session;
use crate::tasks::{add_stage_task, generate_daily, generate_for_plan};
use crate::tracker::{record_day, update_day};
use crate::utils::dates::{days_since, format_date, is_today, parse_date, to_db};
use crate::utils::format::{format_compact, format_currency, pad_display, progress_bar};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const LEAF: &str = "\x1b[38;2;110;170;110m";

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn date_or_today(s: Option<&str>) -> Result<NaiveDate> {
    s.map(parse_date).transpose().map(|d| d.unwrap_or_else(today))
}

// ─── Setup wizard ────────────────────────────────────────────────────────────

pub fn handle_setup(conn: &Connection, config: &mut AppConfig, reset: bool) -> Result<()> {
    if !reset {
        if let Some(session) = Session::current(conn)? {
            if SmokingStatusRepo::latest(conn, session.user_id)?.is_some() {
                println!(
                    "{} is already set up. Use --reset to enter a new habit and plan.",
                    session.username
                );
                return Ok(());
            }
        }
    }
    crate::cli::setup_tui::run_setup_tui(conn, config)
}

// ─── Session ─────────────────────────────────────────────────────────────────

pub fn handle_register(conn: &Connection, username: &str) -> Result<()> {
    let session = Session::register(conn, username)?;
    println_colored!(GREEN, "  ✓ Welcome, {}! You are logged in.", session.username);
    println_colored!(DIM, "  Next: `smokefree setup` to enter your habit and plan");
    Ok(())
}

pub fn handle_login(conn: &Connection, username: &str) -> Result<()> {
    let session = Session::login(conn, username)?;
    println_colored!(GREEN, "  ✓ Logged in as {}", session.username);
    Ok(())
}

pub fn handle_logout(conn: &Connection) -> Result<()> {
    match Session::current(conn)? {
        Some(session) => {
            Session::logout(conn)?;
            println_colored!(DIM, "  Logged out {}", session.username);
        }
        None => println_colored!(DIM, "  Nobody is logged in"),
    }
    Ok(())
}

pub fn handle_whoami(conn: &Connection, config: &AppConfig) -> Result<()> {
    match Session::current(conn)? {
        Some(session) => {
            let hour = Local::now().hour();
            println!("  {}, {}", greeting(hour), session.username);
        }
        None => println!("  Not logged in (hello, {})", config.profile.display_name),
    }
    Ok(())
}

// ─── Smoking status ──────────────────────────────────────────────────────────

pub fn handle_status(
    conn: &Connection,
    session: &Session,
    config: &AppConfig,
    action: &StatusCommands,
) -> Result<()> {
    let suffix = &config.currency.suffix;
    match action {
        StatusCommands::Set {
            cigarettes,
            cost,
            start,
        } => {
            let status = SmokingStatusRepo::add(
                conn,
                session.user_id,
                &NewSmokingStatus {
                    cigarettes_per_day: *cigarettes,
                    cost_per_pack: *cost,
                    start_date: date_or_today(start.as_deref())?,
                },
            )?;
            println_colored!(
                GREEN,
                "  ✓ Saved: {} cigarettes/day at {} per pack",
                status.cigarettes_per_day,
                format_currency(status.cost_per_pack, suffix)
            );
            println_colored!(
                DIM,
                "  That habit costs about {} a month",
                format_currency(monthly_cost(&status), suffix)
            );
        }
        StatusCommands::Show => {
            let history = SmokingStatusRepo::history(conn, session.user_id)?;
            println!();
            let Some((current, older)) = history.split_first() else {
                println_colored!(AMBER, "  No smoking status yet. Run `smokefree status set`.");
                println!();
                return Ok(());
            };
            println_colored!(LEAF, "  Smoking Habit");
            println!();
            print_status(current, suffix);
            if !older.is_empty() {
                println!();
                println_colored!(DIM, "  Earlier snapshots");
                for s in older {
                    println_colored!(
                        DIM,
                        "  {}  {:>3}/day  {}",
                        format_date(s.start_date),
                        s.cigarettes_per_day,
                        format_currency(s.cost_per_pack, suffix)
                    );
                }
            }
            println!();
        }
    }
    Ok(())
}

fn print_status(status: &SmokingStatus, suffix: &str) {
    println!("  Cigarettes/day:  {}", status.cigarettes_per_day);
    println!("  Cost per pack:   {}", format_currency(status.cost_per_pack, suffix));
    println!("  Since:           {}", format_date(status.start_date));
    println!("  Monthly cost:    {}", format_currency(monthly_cost(status), suffix));
}

// ─── Plan & stages ───────────────────────────────────────────────────────────

fn require_plan(conn: &Connection, session: &Session) -> Result<QuitPlan> {
    PlanRepo::active(conn, session.user_id)?
        .ok_or_else(|| anyhow!("No quit plan yet. Create one with `smokefree plan create`"))
}

pub fn handle_plan(conn: &Connection, session: &Session, action: &PlanCommands) -> Result<()> {
    match action {
        PlanCommands::Create {
            name,
            start,
            target,
            reason,
        } => {
            let status = SmokingStatusRepo::latest(conn, session.user_id)?;
            let plan = PlanRepo::create(
                conn,
                session.user_id,
                &NewQuitPlan {
                    name: name.clone(),
                    start_date: date_or_today(start.as_deref())?,
                    target_quit_date: parse_date(target)?,
                    reason: reason.clone(),
                    smoking_status_id: status.map(|s| s.id),
                },
            )?;
            println_colored!(
                GREEN,
                "  ✓ Plan '{}' created: {} → {} ({} days)",
                plan.name,
                format_date(plan.start_date),
                format_date(plan.target_quit_date),
                plan.total_days()
            );
            let tasks = generate_for_plan(conn, session, &plan)?;
            println_colored!(DIM, "  {} checklist tasks added (see `smokefree task list`)", tasks.len());
        }
        PlanCommands::Show { id } => {
            let plan = match id {
                Some(id) => PlanRepo::get(conn, session.user_id, *id)?
                    .ok_or_else(|| anyhow!("Plan {} not found", id))?,
                None => require_plan(conn, session)?,
            };
            let stages = StageRepo::list_for_plan(conn, plan.id)?;
            print_plan(&plan, &stages, today());
        }
        PlanCommands::List => {
            let plans = PlanRepo::list(conn, session.user_id)?;
            println!();
            if plans.is_empty() {
                println_colored!(DIM, "  No plans yet");
            }
            for (i, plan) in plans.iter().enumerate() {
                let color = if i == 0 { GREEN } else { DIM };
                let marker = if i == 0 { "active" } else { "" };
                println_colored!(
                    color,
                    "  {:>4}  {:<24} {} → {}  {}",
                    plan.id,
                    plan.name,
                    format_date(plan.start_date),
                    format_date(plan.target_quit_date),
                    marker
                );
            }
            println!();
        }
        PlanCommands::Update {
            name,
            start,
            target,
            reason,
        } => {
            let mut plan = require_plan(conn, session)?;
            if let Some(name) = name {
                plan.name = name.clone();
            }
            if let Some(start) = start {
                plan.start_date = parse_date(start)?;
            }
            if let Some(target) = target {
                plan.target_quit_date = parse_date(target)?;
            }
            if let Some(reason) = reason {
                plan.reason = reason.clone();
            }
            PlanRepo::update(conn, &plan)?;
            println_colored!(GREEN, "  ✓ Plan '{}' updated", plan.name);
        }
    }
    Ok(())
}

fn print_plan(plan: &QuitPlan, stages: &[Stage], today: NaiveDate) {
    let elapsed = days_since(plan.start_date, today);
    let total = plan.total_days();
    println!();
    println_colored!(LEAF, "  {}", plan.name);
    println!();
    println!("  Start:    {}", format_date(plan.start_date));
    println!("  Target:   {}", format_date(plan.target_quit_date));
    println!("  Reason:   {}", plan.reason);
    println!(
        "  Progress: {} {}/{} days",
        progress_bar(elapsed.min(total) as u32, total as u32, 20),
        elapsed.min(total),
        total
    );
    if !stages.is_empty() {
        println!();
        println_colored!(DIM, "  Stages");
        for s in stages {
            let marker = if s.contains(today) { "▸" } else { " " };
            println!(
                "  {} {}. {:<24} {} → {}",
                marker,
                s.stage_number,
                s.title,
                format_date(s.start_date),
                format_date(s.end_date)
            );
        }
    }
    println!();
}

pub fn handle_stage(conn: &Connection, session: &Session, action: &StageCommands) -> Result<()> {
    let plan = require_plan(conn, session)?;
    match action {
        StageCommands::Add {
            title,
            description,
            start,
            end,
        } => {
            let stage = StageRepo::add(
                conn,
                plan.id,
                &NewStage {
                    title: title.clone(),
                    description: description.clone(),
                    start_date: parse_date(start)?,
                    end_date: parse_date(end)?,
                },
            )?;
            println_colored!(
                GREEN,
                "  ✓ Stage {} '{}' added to {}",
                stage.stage_number,
                stage.title,
                plan.name
            );
            add_stage_task(conn, session, &stage)?;
        }
        StageCommands::List => {
            let stages = StageRepo::list_for_plan(conn, plan.id)?;
            println!();
            if stages.is_empty() {
                println_colored!(DIM, "  No stages in '{}'", plan.name);
            }
            for s in &stages {
                println_colored!(BOLD, "  Stage {}: {}", s.stage_number, s.title);
                println_colored!(
                    DIM,
                    "    {} → {}",
                    format_date(s.start_date),
                    format_date(s.end_date)
                );
                if !s.description.is_empty() {
                    println!("    {}", s.description);
                }
            }
            println!();
        }
    }
    Ok(())
}

// ─── Progress ────────────────────────────────────────────────────────────────

pub fn handle_record(
    conn: &Connection,
    session: &Session,
    config: &AppConfig,
    cigarettes: u32,
    health: Option<&str>,
    date: Option<&str>,
) -> Result<()> {
    let date = date_or_today(date)?;
    let rec = record_day(conn, session, date, cigarettes, health.unwrap_or(""))?;
    if rec.is_smoke_free() {
        println_colored!(
            GREEN,
            "  ✓ {} smoke-free — saved {}",
            format_date(rec.date),
            format_currency(rec.money_saved, &config.currency.suffix)
        );
    } else {
        println_colored!(
            AMBER,
            "  ◑ {} — {} cigarettes recorded. Tomorrow is a fresh start.",
            format_date(rec.date),
            rec.cigarettes_smoked
        );
    }
    Ok(())
}

pub fn handle_progress(
    conn: &Connection,
    session: &Session,
    config: &AppConfig,
    action: &ProgressCommands,
) -> Result<()> {
    match action {
        ProgressCommands::List { last } => {
            let records = ProgressRepo::list(conn, session.user_id)?;
            let skip = last.map(|n| records.len().saturating_sub(n)).unwrap_or(0);
            println!();
            if records.is_empty() {
                println_colored!(DIM, "  Nothing recorded yet. Try `smokefree record 0`.");
            }
            let today = today();
            for r in &records[skip..] {
                print_record(r, &config.currency.suffix, is_today(r.date, today));
            }
            if !records.is_empty() {
                let total = ProgressRepo::total_money_saved(conn, session.user_id)?;
                println!();
                println_colored!(
                    GREEN,
                    "  Saved across {} recorded days: {}",
                    records.len(),
                    format_currency(total, &config.currency.suffix)
                );
            }
            println!();
        }
        ProgressCommands::Update {
            id,
            cigarettes,
            health,
        } => {
            let rec = update_day(conn, session, *id, *cigarettes, health.as_deref())?;
            println_colored!(GREEN, "  ✓ Updated {}", format_date(rec.date));
        }
        ProgressCommands::Delete { id } => {
            if ProgressRepo::delete(conn, session.user_id, *id)? {
                println_colored!(DIM, "  Deleted record {}", id);
            } else {
                return Err(anyhow!("Progress record {} not found", id));
            }
        }
    }
    Ok(())
}

fn print_record(r: &ProgressRecord, suffix: &str, today: bool) {
    let (icon, color) = if r.is_smoke_free() {
        ("●", GREEN)
    } else {
        ("○", AMBER)
    };
    println!(
        "  {:>4}  {}{}\x1b[0m  {}{}  {:>2} cig  {:>14}  {}",
        r.id,
        color,
        icon,
        format_date(r.date),
        if today { "*" } else { " " },
        r.cigarettes_smoked,
        format_currency(r.money_saved, suffix),
        r.health_status
    );
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats(
    conn: &Connection,
    session: &Session,
    config: &AppConfig,
    week: bool,
) -> Result<()> {
    let today = today();
    let overview = Overview::load(conn, session, today)?;
    let suffix = &config.currency.suffix;

    println!();
    println_colored!(LEAF, "  Statistics — {}", session.username);
    println!();
    println_colored!(BOLD, "  Days smoke-free:   {}", overview.days_quit);
    println!(
        "  Money saved:       {}",
        format_currency(overview.savings.money_saved, suffix)
    );
    println!("  Cigarettes avoided: {}", overview.savings.cigarettes_avoided);
    println!(
        "  Streak:            {} days current  |  {} days best",
        overview.streak.current, overview.streak.best
    );
    if let Some(plan) = &overview.plan {
        println!(
            "  Plan:              {} {}% ({})",
            progress_bar(overview.plan_progress_pct, 100, 12),
            overview.plan_progress_pct,
            plan.name
        );
        if let Some(left) = overview.days_until_target {
            if left > 0 {
                println!("  Target quit date:  in {} days", left);
            } else {
                println_colored!(GREEN, "  Target quit date:  reached");
            }
        }
    }
    if let Some(stage) = &overview.stage {
        println!("  Stage:             {}. {}", stage.stage_number, stage.title);
    }
    if let Some(note) = &overview.latest_health_status {
        println!("  Latest feeling:    {}", note);
    }
    println!();
    println_colored!(AMBER, "  {}", overview.motivation);

    if week {
        let start = today - chrono::Duration::days(6);
        let daily = ProgressRepo::daily_stats(conn, session.user_id, start, today)?;
        println!();
        println_colored!(DIM, "  Last 7 days  (● = smoke-free, ◑ = smoked, · = not recorded)");
        println!();
        print!("  ");
        let recorded = daily.iter().filter(|d| d.is_recorded()).count();
        for stat in &daily {
            let icon = match stat.cigarettes_smoked {
                Some(0) => format!("{}●\x1b[0m ", GREEN),
                Some(_) => format!("{}◑\x1b[0m ", AMBER),
                None => format!("{}·\x1b[0m ", DIM),
            };
            print!("{}", icon);
        }
        println_colored!(DIM, "  {}/7 recorded", recorded);
    }

    println!();
    Ok(())
}

// ─── Badges ──────────────────────────────────────────────────────────────────

pub fn handle_badges(
    conn: &Connection,
    session: &Session,
    all: bool,
    kind: Option<&str>,
) -> Result<()> {
    let kinds: Vec<BadgeKind> = match kind {
        Some(k) => vec![k.parse()?],
        None => BadgeKind::all().to_vec(),
    };
    let overview = Overview::load(conn, session, today())?;

    println!();
    for kind in kinds {
        let value = overview.metric_for(kind);
        println_colored!(LEAF, "  {}", kind.display_name());
        println!();

        if all {
            let earned = earned_badges(kind, value).len();
            for (i, badge) in kind.ladder().iter().enumerate() {
                let line = format!(
                    "{} {}",
                    badge.icon,
                    pad_display(badge.title, 20)
                );
                if i < earned {
                    println_colored!(GREEN, "  ✓ {} {}", line, badge.description);
                } else {
                    println_colored!(DIM, "  ○ {} {}", line, badge.description);
                }
            }
        } else {
            match earned_badges(kind, value).last() {
                Some(badge) => println_colored!(
                    GREEN,
                    "  {} {} — {}",
                    badge.icon,
                    badge.title,
                    badge.description
                ),
                None => println_colored!(DIM, "  No badge yet"),
            }
        }

        if let Some(next) = next_badge(kind, value) {
            let remaining = next.threshold - value;
            let remaining = match kind {
                BadgeKind::Days => format!("{} days", remaining.ceil() as i64),
                BadgeKind::Money => format_compact(remaining),
            };
            println_colored!(DIM, "  Next: {} {} in {}", next.icon, next.title, remaining);
        }
        println!();
    }
    Ok(())
}

// ─── Health ──────────────────────────────────────────────────────────────────

pub fn handle_health(conn: &Connection, session: &Session) -> Result<()> {
    let overview = Overview::load(conn, session, today())?;

    println!();
    println_colored!(LEAF, "  Health Improvements — day {}", overview.days_quit);
    println!();
    if overview.health.is_empty() {
        println_colored!(DIM, "  Keep going! Health improvements will show up soon.");
    }
    for m in &overview.health {
        println_colored!(GREEN, "  ✓ {:<40} {}", m.title, m.timeline);
        println_colored!(DIM, "    {}", m.description);
    }
    if let Some(next) = &overview.next_milestone {
        println!();
        println_colored!(
            AMBER,
            "  Next: {} in {} days",
            next.title,
            next.threshold_days.saturating_sub(overview.days_quit)
        );
    }
    println!();
    Ok(())
}

// ─── Tasks ───────────────────────────────────────────────────────────────────

pub fn handle_task(conn: &Connection, session: &Session, action: &TaskCommands) -> Result<()> {
    let today = today();
    match action {
        TaskCommands::Add {
            title,
            description,
            due,
            priority,
            r#type,
            points,
        } => {
            let task = TaskRepo::create(
                conn,
                session.user_id,
                &NewTask {
                    plan_id: None,
                    title: title.clone(),
                    description: description.clone(),
                    task_type: r#type.parse::<TaskType>()?,
                    priority: priority.parse::<TaskPriority>()?,
                    due_date: due.as_deref().map(parse_date).transpose()?,
                    points_reward: *points,
                },
            )?;
            println_colored!(GREEN, "  ✓ Task {} '{}' added", task.id, task.title);
        }
        TaskCommands::List {
            upcoming,
            overdue,
            all,
            limit,
        } => {
            let (heading, tasks) = if *overdue {
                ("Overdue", TaskRepo::overdue(conn, session.user_id, today)?)
            } else if *upcoming {
                ("Upcoming", TaskRepo::upcoming(conn, session.user_id, today, *limit)?)
            } else if *all {
                ("All tasks", TaskRepo::list(conn, session.user_id, true)?)
            } else {
                ("Pending", TaskRepo::list(conn, session.user_id, false)?)
            };
            println!();
            println_colored!(LEAF, "  {}", heading);
            if tasks.is_empty() {
                println_colored!(DIM, "  No tasks! You're doing great");
            }
            for task in &tasks {
                print_task(task, today);
            }
            println!();
            let points = TaskRepo::points_earned(conn, session.user_id)?;
            println_colored!(DIM, "  {} points earned from completed tasks", points);
            println!();
        }
        TaskCommands::Update {
            id,
            title,
            description,
            due,
            priority,
        } => {
            let mut task = TaskRepo::get(conn, session.user_id, *id)?
                .ok_or_else(|| anyhow!("Task {} not found", id))?;
            if let Some(title) = title {
                task.title = title.clone();
            }
            if let Some(description) = description {
                task.description = description.clone();
            }
            if let Some(due) = due {
                task.due_date = Some(parse_date(due)?);
            }
            if let Some(priority) = priority {
                task.priority = priority.parse()?;
            }
            TaskRepo::update(conn, &task)?;
            println_colored!(GREEN, "  ✓ Task {} updated", task.id);
        }
        TaskCommands::Done { id } => {
            let task = TaskRepo::close(conn, session.user_id, *id, TaskStatus::Completed)?;
            println_colored!(
                GREEN,
                "  ✓ '{}' completed (+{} points)",
                task.title,
                task.points_reward
            );
        }
        TaskCommands::Skip { id } => {
            let task = TaskRepo::close(conn, session.user_id, *id, TaskStatus::Skipped)?;
            println_colored!(AMBER, "  – '{}' skipped", task.title);
        }
        TaskCommands::Delete { id } => {
            if TaskRepo::delete(conn, session.user_id, *id)? {
                println_colored!(GREEN, "  ✓ Task {} deleted", id);
            } else {
                return Err(anyhow!("Task {} not found", id));
            }
        }
        TaskCommands::Generate => {
            let mut created = generate_daily(conn, session, today)?;
            if let Some(plan) = PlanRepo::active(conn, session.user_id)? {
                created.extend(generate_for_plan(conn, session, &plan)?);
            }
            if created.is_empty() {
                println_colored!(DIM, "  Nothing new to add");
            } else {
                println_colored!(GREEN, "  ✓ {} tasks added", created.len());
            }
        }
    }
    Ok(())
}

fn print_task(task: &Task, today: NaiveDate) {
    let (mark, color) = match task.status {
        TaskStatus::Completed => ("✓", DIM),
        TaskStatus::Skipped => ("–", DIM),
        TaskStatus::Pending if task.is_overdue(today) => ("!", AMBER),
        TaskStatus::Pending => ("○", BOLD),
    };
    let due = task
        .due_date
        .map(|d| if is_today(d, today) { "today".to_string() } else { format_date(d) })
        .unwrap_or_default();
    println_colored!(
        color,
        "  {} {:>4}  {}  {:<6}  {}",
        mark,
        task.id,
        pad_display(&task.title, 34),
        task.priority.as_str(),
        due
    );
    if !task.description.is_empty() && task.is_pending() {
        println_colored!(DIM, "          {}", task.description);
    }
}

// ─── Export ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Export<'a> {
    username: &'a str,
    overview: &'a Overview,
    stages: Vec<Stage>,
    progress: Vec<ProgressRecord>,
    tasks: Vec<Task>,
}

pub fn handle_export(
    conn: &Connection,
    session: &Session,
    config: &AppConfig,
    json: bool,
) -> Result<()> {
    let today = today();
    let overview = Overview::load(conn, session, today)?;
    let stages = match &overview.plan {
        Some(plan) => StageRepo::list_for_plan(conn, plan.id)?,
        None => Vec::new(),
    };
    let progress = ProgressRepo::list(conn, session.user_id)?;

    if json {
        let export = Export {
            username: &session.username,
            overview: &overview,
            stages,
            progress,
            tasks: TaskRepo::list(conn, session.user_id, true)?,
        };
        println!("{}", serde_json::to_string_pretty(&export)?);
        return Ok(());
    }

    let suffix = &config.currency.suffix;
    let week_start = today - chrono::Duration::days(6);
    let daily = ProgressRepo::daily_stats(conn, session.user_id, week_start, today)?;

    println!("# smokefree — Summary for {}", session.username);
    println!("# {}", to_db(today));
    println!();
    if let Some(status) = &overview.status {
        println!("Habit:  {} cigarettes/day, {} per pack", status.cigarettes_per_day,
            format_currency(status.cost_per_pack, suffix));
    }
    if let Some(plan) = &overview.plan {
        println!("Plan:   {} ({} → {})", plan.name, to_db(plan.start_date), to_db(plan.target_quit_date));
        println!("Reason: {}", plan.reason);
    }
    println!();
    println!("## Last 7 days");
    for stat in &daily {
        let cell = match stat.cigarettes_smoked {
            Some(0) => "smoke-free".to_string(),
            Some(n) => format!("{} cigarettes", n),
            None => "-".to_string(),
        };
        println!("  {}  {}", stat.date, cell);
    }
    println!();
    println!("## Summary");
    println!("  Days quit:   {}", overview.days_quit);
    println!("  Saved:       {}", format_currency(overview.savings.money_saved, suffix));
    println!("  Avoided:     {} cigarettes", overview.savings.cigarettes_avoided);
    println!("  Streak:      {} days (best: {})", overview.streak.current, overview.streak.best);
    if let Some(badge) = overview.day_badge {
        println!("  Day badge:   {} {}", badge.icon, badge.title);
    }
    if let Some(badge) = overview.money_badge {
        println!("  Money badge: {} {}", badge.icon, badge.title);
    }
    Ok(())
}
