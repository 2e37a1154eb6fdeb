use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params, types::Type};
use std::str::FromStr;

use crate::models::{
    DailyStats, NewProgress, NewQuitPlan, NewSmokingStatus, NewStage, NewTask, ProgressRecord,
    QuitPlan, SmokingStatus, Stage, Task, TaskStatus, User,
};
use crate::utils::dates::{DATE_FORMAT, to_db};

fn date_col(row: &Row, idx: usize) -> rusqlite::Result<NaiveDate> {
    let s: String = row.get(idx)?;
    NaiveDate::parse_from_str(&s, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

// ─── Users ───────────────────────────────────────────────────────────────────

pub struct UserRepo;

impl UserRepo {
    fn map(row: &Row) -> rusqlite::Result<User> {
        Ok(User {
            id: row.get(0)?,
            username: row.get(1)?,
            created_at: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        })
    }

    pub fn create(conn: &Connection, username: &str) -> Result<User> {
        conn.execute("INSERT INTO users (username) VALUES (?1)", params![username])
            .map_err(|e| match e {
                rusqlite::Error::SqliteFailure(err, _)
                    if err.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    anyhow!("User '{}' already exists", username)
                }
                other => anyhow::Error::from(other),
            })?;
        let id = conn.last_insert_rowid();
        log::info!("Created user {} ({})", username, id);
        Self::get(conn, id)?.ok_or_else(|| anyhow!("User {} vanished after insert", id))
    }

    pub fn get(conn: &Connection, id: i64) -> Result<Option<User>> {
        conn.query_row(
            "SELECT id, username, created_at FROM users WHERE id = ?1",
            params![id],
            Self::map,
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn find_by_name(conn: &Connection, username: &str) -> Result<Option<User>> {
        conn.query_row(
            "SELECT id, username, created_at FROM users WHERE username = ?1 COLLATE NOCASE",
            params![username],
            Self::map,
        )
        .optional()
        .map_err(anyhow::Error::from)
    }
}

// ─── Smoking status ──────────────────────────────────────────────────────────

pub struct SmokingStatusRepo;

impl SmokingStatusRepo {
    fn map(row: &Row) -> rusqlite::Result<SmokingStatus> {
        Ok(SmokingStatus {
            id: row.get(0)?,
            user_id: row.get(1)?,
            cigarettes_per_day: row.get(2)?,
            cost_per_pack: row.get(3)?,
            start_date: date_col(row, 4)?,
            created_at: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        })
    }

    /// Append a new snapshot; earlier ones are kept as history.
    pub fn add(conn: &Connection, user_id: i64, status: &NewSmokingStatus) -> Result<SmokingStatus> {
        status.validate()?;
        conn.execute(
            "INSERT INTO smoking_status (user_id, cigarettes_per_day, cost_per_pack, start_date)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                user_id,
                status.cigarettes_per_day,
                status.cost_per_pack,
                to_db(status.start_date)
            ],
        )?;
        let id = conn.last_insert_rowid();
        log::debug!("Stored smoking status {} for user {}", id, user_id);
        Self::latest(conn, user_id)?.ok_or_else(|| anyhow!("Smoking status {} not found", id))
    }

    pub fn latest(conn: &Connection, user_id: i64) -> Result<Option<SmokingStatus>> {
        conn.query_row(
            "SELECT id, user_id, cigarettes_per_day, cost_per_pack, start_date, created_at
             FROM smoking_status WHERE user_id = ?1
             ORDER BY id DESC LIMIT 1",
            params![user_id],
            Self::map,
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    /// All snapshots, newest first.
    pub fn history(conn: &Connection, user_id: i64) -> Result<Vec<SmokingStatus>> {
        let mut stmt = conn.prepare(
            "SELECT id, user_id, cigarettes_per_day, cost_per_pack, start_date, created_at
             FROM smoking_status WHERE user_id = ?1
             ORDER BY id DESC",
        )?;
        let rows = stmt.query_map(params![user_id], Self::map)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }
}

// ─── Quit plans ──────────────────────────────────────────────────────────────

pub struct PlanRepo;

impl PlanRepo {
    fn map(row: &Row) -> rusqlite::Result<QuitPlan> {
        Ok(QuitPlan {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            start_date: date_col(row, 3)?,
            target_quit_date: date_col(row, 4)?,
            reason: row.get(5)?,
            smoking_status_id: row.get(6)?,
        })
    }

    pub fn create(conn: &Connection, user_id: i64, plan: &NewQuitPlan) -> Result<QuitPlan> {
        plan.validate()?;
        conn.execute(
            "INSERT INTO quit_plans (user_id, name, start_date, target_quit_date, reason, smoking_status_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user_id,
                plan.name.trim(),
                to_db(plan.start_date),
                to_db(plan.target_quit_date),
                plan.reason.trim(),
                plan.smoking_status_id
            ],
        )?;
        let id = conn.last_insert_rowid();
        log::info!("Created quit plan {} for user {}", id, user_id);
        Self::get(conn, user_id, id)?.ok_or_else(|| anyhow!("Quit plan {} not found", id))
    }

    pub fn get(conn: &Connection, user_id: i64, id: i64) -> Result<Option<QuitPlan>> {
        conn.query_row(
            "SELECT id, user_id, name, start_date, target_quit_date, reason, smoking_status_id
             FROM quit_plans WHERE user_id = ?1 AND id = ?2",
            params![user_id, id],
            Self::map,
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    /// The newest plan is the one in effect.
    pub fn active(conn: &Connection, user_id: i64) -> Result<Option<QuitPlan>> {
        conn.query_row(
            "SELECT id, user_id, name, start_date, target_quit_date, reason, smoking_status_id
             FROM quit_plans WHERE user_id = ?1
             ORDER BY id DESC LIMIT 1",
            params![user_id],
            Self::map,
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn list(conn: &Connection, user_id: i64) -> Result<Vec<QuitPlan>> {
        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, start_date, target_quit_date, reason, smoking_status_id
             FROM quit_plans WHERE user_id = ?1 ORDER BY id DESC",
        )?;
        let rows = stmt.query_map(params![user_id], Self::map)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn update(conn: &Connection, plan: &QuitPlan) -> Result<()> {
        NewQuitPlan {
            name: plan.name.clone(),
            start_date: plan.start_date,
            target_quit_date: plan.target_quit_date,
            reason: plan.reason.clone(),
            smoking_status_id: plan.smoking_status_id,
        }
        .validate()?;

        let changed = conn.execute(
            "UPDATE quit_plans
             SET name = ?1, start_date = ?2, target_quit_date = ?3, reason = ?4, smoking_status_id = ?5
             WHERE id = ?6 AND user_id = ?7",
            params![
                plan.name.trim(),
                to_db(plan.start_date),
                to_db(plan.target_quit_date),
                plan.reason.trim(),
                plan.smoking_status_id,
                plan.id,
                plan.user_id
            ],
        )?;
        if changed == 0 {
            return Err(anyhow!("Quit plan {} not found", plan.id));
        }
        Ok(())
    }
}

// ─── Stages ──────────────────────────────────────────────────────────────────

pub struct StageRepo;

impl StageRepo {
    fn map(row: &Row) -> rusqlite::Result<Stage> {
        Ok(Stage {
            id: row.get(0)?,
            plan_id: row.get(1)?,
            stage_number: row.get(2)?,
            title: row.get(3)?,
            description: row.get(4)?,
            start_date: date_col(row, 5)?,
            end_date: date_col(row, 6)?,
        })
    }

    /// Append a stage to a plan; numbering continues from the last stage.
    pub fn add(conn: &Connection, plan_id: i64, stage: &NewStage) -> Result<Stage> {
        stage.validate()?;
        let next_number: u32 = conn.query_row(
            "SELECT COALESCE(MAX(stage_number), 0) + 1 FROM stages WHERE plan_id = ?1",
            params![plan_id],
            |row| row.get(0),
        )?;

        conn.execute(
            "INSERT INTO stages (plan_id, stage_number, title, description, start_date, end_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                plan_id,
                next_number,
                stage.title.trim(),
                stage.description.trim(),
                to_db(stage.start_date),
                to_db(stage.end_date)
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(Stage {
            id,
            plan_id,
            stage_number: next_number,
            title: stage.title.trim().to_string(),
            description: stage.description.trim().to_string(),
            start_date: stage.start_date,
            end_date: stage.end_date,
        })
    }

    pub fn list_for_plan(conn: &Connection, plan_id: i64) -> Result<Vec<Stage>> {
        let mut stmt = conn.prepare(
            "SELECT id, plan_id, stage_number, title, description, start_date, end_date
             FROM stages WHERE plan_id = ?1 ORDER BY stage_number",
        )?;
        let rows = stmt.query_map(params![plan_id], Self::map)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    /// Stage whose range covers `date`; the latest-numbered wins on overlap.
    pub fn for_date(conn: &Connection, plan_id: i64, date: NaiveDate) -> Result<Option<Stage>> {
        let date = to_db(date);
        conn.query_row(
            "SELECT id, plan_id, stage_number, title, description, start_date, end_date
             FROM stages WHERE plan_id = ?1 AND start_date <= ?2 AND end_date >= ?2
             ORDER BY stage_number DESC LIMIT 1",
            params![plan_id, date],
            Self::map,
        )
        .optional()
        .map_err(anyhow::Error::from)
    }
}

// ─── Progress ────────────────────────────────────────────────────────────────

pub struct ProgressRepo;

impl ProgressRepo {
    fn map(row: &Row) -> rusqlite::Result<ProgressRecord> {
        Ok(ProgressRecord {
            id: row.get(0)?,
            user_id: row.get(1)?,
            date: date_col(row, 2)?,
            cigarettes_smoked: row.get(3)?,
            money_saved: row.get(4)?,
            health_status: row.get(5)?,
            stage_id: row.get(6)?,
        })
    }

    /// Store a day's progress. Recording the same day again replaces it.
    pub fn record(conn: &Connection, user_id: i64, progress: &NewProgress) -> Result<ProgressRecord> {
        let date = to_db(progress.date);
        conn.execute(
            "INSERT INTO progress (user_id, date, cigarettes_smoked, money_saved, health_status, stage_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(user_id, date) DO UPDATE SET
                cigarettes_smoked = ?3, money_saved = ?4, health_status = ?5, stage_id = ?6",
            params![
                user_id,
                date,
                progress.cigarettes_smoked,
                progress.money_saved,
                progress.health_status.trim(),
                progress.stage_id
            ],
        )?;
        log::debug!(
            "Recorded {} cigarettes on {} for user {}",
            progress.cigarettes_smoked,
            date,
            user_id
        );

        conn.query_row(
            "SELECT id, user_id, date, cigarettes_smoked, money_saved, health_status, stage_id
             FROM progress WHERE user_id = ?1 AND date = ?2",
            params![user_id, date],
            Self::map,
        )
        .map_err(anyhow::Error::from)
    }

    pub fn get(conn: &Connection, user_id: i64, id: i64) -> Result<Option<ProgressRecord>> {
        conn.query_row(
            "SELECT id, user_id, date, cigarettes_smoked, money_saved, health_status, stage_id
             FROM progress WHERE user_id = ?1 AND id = ?2",
            params![user_id, id],
            Self::map,
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    /// Full history, oldest first.
    pub fn list(conn: &Connection, user_id: i64) -> Result<Vec<ProgressRecord>> {
        let mut stmt = conn.prepare(
            "SELECT id, user_id, date, cigarettes_smoked, money_saved, health_status, stage_id
             FROM progress WHERE user_id = ?1 ORDER BY date",
        )?;
        let rows = stmt.query_map(params![user_id], Self::map)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn range(
        conn: &Connection,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ProgressRecord>> {
        let mut stmt = conn.prepare(
            "SELECT id, user_id, date, cigarettes_smoked, money_saved, health_status, stage_id
             FROM progress WHERE user_id = ?1 AND date >= ?2 AND date <= ?3 ORDER BY date",
        )?;
        let rows = stmt.query_map(params![user_id, to_db(start), to_db(end)], Self::map)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    /// One entry per calendar day in `start..=end`, unrecorded days included.
    pub fn daily_stats(
        conn: &Connection,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyStats>> {
        let records = Self::range(conn, user_id, start, end)?;
        Ok(start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|day| DailyStats {
                date: to_db(day),
                cigarettes_smoked: records
                    .iter()
                    .find(|r| r.date == day)
                    .map(|r| r.cigarettes_smoked),
            })
            .collect())
    }

    pub fn total_money_saved(conn: &Connection, user_id: i64) -> Result<f64> {
        conn.query_row(
            "SELECT COALESCE(SUM(money_saved), 0) FROM progress WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )
        .map_err(anyhow::Error::from)
    }

    pub fn update(
        conn: &Connection,
        user_id: i64,
        id: i64,
        cigarettes_smoked: u32,
        money_saved: f64,
        health_status: &str,
    ) -> Result<bool> {
        let changed = conn.execute(
            "UPDATE progress SET cigarettes_smoked = ?1, money_saved = ?2, health_status = ?3
             WHERE id = ?4 AND user_id = ?5",
            params![cigarettes_smoked, money_saved, health_status.trim(), id, user_id],
        )?;
        Ok(changed > 0)
    }

    pub fn delete(conn: &Connection, user_id: i64, id: i64) -> Result<bool> {
        let changed = conn.execute(
            "DELETE FROM progress WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        if changed > 0 {
            log::info!("Deleted progress record {}", id);
        }
        Ok(changed > 0)
    }
}

// ─── Tasks ───────────────────────────────────────────────────────────────────

fn opt_date_col(row: &Row, idx: usize) -> rusqlite::Result<Option<NaiveDate>> {
    match row.get::<_, Option<String>>(idx)? {
        Some(s) => NaiveDate::parse_from_str(&s, DATE_FORMAT)
            .map(Some)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))),
        None => Ok(None),
    }
}

fn enum_col<T: FromStr<Err = anyhow::Error>>(row: &Row, idx: usize) -> rusqlite::Result<T> {
    let s: String = row.get(idx)?;
    s.parse()
        .map_err(|e: anyhow::Error| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

const TASK_COLUMNS: &str = "id, user_id, plan_id, title, description, task_type, priority, status,
     due_date, points_reward, completed_at";

/// Pending first, then by due date (undated last), then highest priority.
const TASK_ORDER: &str = "ORDER BY status != 'pending', due_date IS NULL, due_date,
     CASE priority WHEN 'high' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END, id";

pub struct TaskRepo;

impl TaskRepo {
    fn map(row: &Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: row.get(0)?,
            user_id: row.get(1)?,
            plan_id: row.get(2)?,
            title: row.get(3)?,
            description: row.get(4)?,
            task_type: enum_col(row, 5)?,
            priority: enum_col(row, 6)?,
            status: enum_col(row, 7)?,
            due_date: opt_date_col(row, 8)?,
            points_reward: row.get(9)?,
            completed_at: row.get(10)?,
        })
    }

    fn query(conn: &Connection, filter: &str, args: impl rusqlite::Params) -> Result<Vec<Task>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE {filter} {TASK_ORDER}");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(args, Self::map)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn create(conn: &Connection, user_id: i64, task: &NewTask) -> Result<Task> {
        task.validate()?;
        conn.execute(
            "INSERT INTO tasks
             (user_id, plan_id, title, description, task_type, priority, due_date, points_reward)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                user_id,
                task.plan_id,
                task.title.trim(),
                task.description.trim(),
                task.task_type.as_str(),
                task.priority.as_str(),
                task.due_date.map(to_db),
                task.points_reward
            ],
        )?;
        let id = conn.last_insert_rowid();
        log::debug!("Created task {} '{}' for user {}", id, task.title.trim(), user_id);
        Self::get(conn, user_id, id)?.ok_or_else(|| anyhow!("Task {} vanished after insert", id))
    }

    pub fn get(conn: &Connection, user_id: i64, id: i64) -> Result<Option<Task>> {
        conn.query_row(
            &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ?1 AND id = ?2"),
            params![user_id, id],
            Self::map,
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    /// Every task when `include_closed`, otherwise only pending ones.
    pub fn list(conn: &Connection, user_id: i64, include_closed: bool) -> Result<Vec<Task>> {
        if include_closed {
            Self::query(conn, "user_id = ?1", params![user_id])
        } else {
            Self::query(conn, "user_id = ?1 AND status = 'pending'", params![user_id])
        }
    }

    /// Pending tasks due today or later, plus undated ones.
    pub fn upcoming(
        conn: &Connection,
        user_id: i64,
        today: NaiveDate,
        limit: usize,
    ) -> Result<Vec<Task>> {
        let mut tasks = Self::query(
            conn,
            "user_id = ?1 AND status = 'pending' AND (due_date IS NULL OR due_date >= ?2)",
            params![user_id, to_db(today)],
        )?;
        tasks.truncate(limit);
        Ok(tasks)
    }

    pub fn overdue(conn: &Connection, user_id: i64, today: NaiveDate) -> Result<Vec<Task>> {
        Self::query(
            conn,
            "user_id = ?1 AND status = 'pending' AND due_date < ?2",
            params![user_id, to_db(today)],
        )
    }

    /// True when the user already has a task with this title on this due date
    /// (and plan, when given).
    pub fn exists(
        conn: &Connection,
        user_id: i64,
        plan_id: Option<i64>,
        title: &str,
        due_date: Option<NaiveDate>,
    ) -> Result<bool> {
        conn.query_row(
            "SELECT COUNT(*) FROM tasks
             WHERE user_id = ?1 AND plan_id IS ?2 AND title = ?3 AND due_date IS ?4",
            params![user_id, plan_id, title.trim(), due_date.map(to_db)],
            |row| row.get::<_, i64>(0),
        )
        .map(|n| n > 0)
        .map_err(anyhow::Error::from)
    }

    pub fn update(conn: &Connection, task: &Task) -> Result<()> {
        NewTask {
            plan_id: task.plan_id,
            title: task.title.clone(),
            description: task.description.clone(),
            task_type: task.task_type,
            priority: task.priority,
            due_date: task.due_date,
            points_reward: task.points_reward,
        }
        .validate()?;

        let changed = conn.execute(
            "UPDATE tasks
             SET title = ?1, description = ?2, task_type = ?3, priority = ?4, due_date = ?5,
                 points_reward = ?6
             WHERE id = ?7 AND user_id = ?8",
            params![
                task.title.trim(),
                task.description.trim(),
                task.task_type.as_str(),
                task.priority.as_str(),
                task.due_date.map(to_db),
                task.points_reward,
                task.id,
                task.user_id
            ],
        )?;
        if changed == 0 {
            return Err(anyhow!("Task {} not found", task.id));
        }
        Ok(())
    }

    /// Moves a pending task to `status`. Completing stamps `completed_at`.
    pub fn close(conn: &Connection, user_id: i64, id: i64, status: TaskStatus) -> Result<Task> {
        if status == TaskStatus::Pending {
            return Err(anyhow!("A task can only be closed as completed or skipped"));
        }
        let task = Self::get(conn, user_id, id)?.ok_or_else(|| anyhow!("Task {} not found", id))?;
        if !task.is_pending() {
            return Err(anyhow!("Task {} is already {}", id, task.status.as_str()));
        }

        conn.execute(
            "UPDATE tasks
             SET status = ?1,
                 completed_at = CASE WHEN ?1 = 'completed' THEN datetime('now') END
             WHERE id = ?2 AND user_id = ?3",
            params![status.as_str(), id, user_id],
        )?;
        log::info!("Task {} marked {}", id, status.as_str());
        Self::get(conn, user_id, id)?.ok_or_else(|| anyhow!("Task {} not found", id))
    }

    pub fn delete(conn: &Connection, user_id: i64, id: i64) -> Result<bool> {
        let changed = conn.execute(
            "DELETE FROM tasks WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        if changed > 0 {
            log::info!("Deleted task {}", id);
        }
        Ok(changed > 0)
    }

    /// Sum of `points_reward` over completed tasks.
    pub fn points_earned(conn: &Connection, user_id: i64) -> Result<u32> {
        conn.query_row(
            "SELECT COALESCE(SUM(points_reward), 0) FROM tasks
             WHERE user_id = ?1 AND status = 'completed'",
            params![user_id],
            |row| row.get(0),
        )
        .map_err(anyhow::Error::from)
    }
}

// ─── App meta ────────────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn delete(conn: &Connection, key: &str) -> Result<()> {
        conn.execute("DELETE FROM app_meta WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::{TaskPriority, TaskType};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn setup() -> (Connection, User) {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let user = UserRepo::create(&conn, "lan").unwrap();
        (conn, user)
    }

    fn progress(date: NaiveDate, smoked: u32) -> NewProgress {
        NewProgress {
            date,
            cigarettes_smoked: smoked,
            money_saved: 0.0,
            health_status: String::new(),
            stage_id: None,
        }
    }

    #[test]
    fn duplicate_username_rejected() {
        let (conn, _) = setup();
        let err = UserRepo::create(&conn, "lan").unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(UserRepo::find_by_name(&conn, "LAN").unwrap().is_some());
    }

    #[test]
    fn smoking_status_history_is_append_only() {
        let (conn, user) = setup();
        assert!(SmokingStatusRepo::latest(&conn, user.id).unwrap().is_none());

        for cigs in [20, 12] {
            SmokingStatusRepo::add(
                &conn,
                user.id,
                &NewSmokingStatus {
                    cigarettes_per_day: cigs,
                    cost_per_pack: 30_000.0,
                    start_date: d(2024, 1, 1),
                },
            )
            .unwrap();
        }

        let latest = SmokingStatusRepo::latest(&conn, user.id).unwrap().unwrap();
        assert_eq!(latest.cigarettes_per_day, 12);
        let history = SmokingStatusRepo::history(&conn, user.id).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].cigarettes_per_day, 20);
    }

    #[test]
    fn invalid_status_never_reaches_the_table() {
        let (conn, user) = setup();
        let res = SmokingStatusRepo::add(
            &conn,
            user.id,
            &NewSmokingStatus {
                cigarettes_per_day: 0,
                cost_per_pack: 30_000.0,
                start_date: d(2024, 1, 1),
            },
        );
        assert!(res.is_err());
        assert!(SmokingStatusRepo::history(&conn, user.id).unwrap().is_empty());
    }

    #[test]
    fn newest_plan_is_active_and_updatable() {
        let (conn, user) = setup();
        let new_plan = |name: &str| NewQuitPlan {
            name: name.to_string(),
            start_date: d(2024, 3, 1),
            target_quit_date: d(2024, 4, 1),
            reason: "Health".to_string(),
            smoking_status_id: None,
        };
        PlanRepo::create(&conn, user.id, &new_plan("First")).unwrap();
        let second = PlanRepo::create(&conn, user.id, &new_plan("Second")).unwrap();

        let mut active = PlanRepo::active(&conn, user.id).unwrap().unwrap();
        assert_eq!(active.id, second.id);

        active.target_quit_date = d(2024, 5, 1);
        PlanRepo::update(&conn, &active).unwrap();
        let reloaded = PlanRepo::get(&conn, user.id, active.id).unwrap().unwrap();
        assert_eq!(reloaded.target_quit_date, d(2024, 5, 1));

        active.target_quit_date = d(2024, 2, 1);
        assert!(PlanRepo::update(&conn, &active).is_err());
        assert_eq!(PlanRepo::list(&conn, user.id).unwrap().len(), 2);
    }

    #[test]
    fn stages_number_sequentially_and_resolve_by_date() {
        let (conn, user) = setup();
        let plan = PlanRepo::create(
            &conn,
            user.id,
            &NewQuitPlan {
                name: "Plan".to_string(),
                start_date: d(2024, 3, 1),
                target_quit_date: d(2024, 3, 31),
                reason: "Money".to_string(),
                smoking_status_id: None,
            },
        )
        .unwrap();

        let stage = |title: &str, start, end| NewStage {
            title: title.to_string(),
            description: String::new(),
            start_date: start,
            end_date: end,
        };
        let first = StageRepo::add(&conn, plan.id, &stage("Taper", d(2024, 3, 1), d(2024, 3, 10))).unwrap();
        let second = StageRepo::add(&conn, plan.id, &stage("Stop", d(2024, 3, 11), d(2024, 3, 31))).unwrap();
        assert_eq!(first.stage_number, 1);
        assert_eq!(second.stage_number, 2);

        let found = StageRepo::for_date(&conn, plan.id, d(2024, 3, 15)).unwrap().unwrap();
        assert_eq!(found.title, "Stop");
        assert!(StageRepo::for_date(&conn, plan.id, d(2024, 4, 2)).unwrap().is_none());
        assert_eq!(StageRepo::list_for_plan(&conn, plan.id).unwrap().len(), 2);
    }

    #[test]
    fn recording_same_day_replaces() {
        let (conn, user) = setup();
        let first = ProgressRepo::record(&conn, user.id, &progress(d(2024, 5, 1), 4)).unwrap();
        let again = ProgressRepo::record(&conn, user.id, &progress(d(2024, 5, 1), 0)).unwrap();

        assert_eq!(first.id, again.id);
        assert_eq!(again.cigarettes_smoked, 0);
        assert_eq!(ProgressRepo::list(&conn, user.id).unwrap().len(), 1);
    }

    #[test]
    fn progress_is_scoped_per_user() {
        let (conn, user) = setup();
        let other = UserRepo::create(&conn, "minh").unwrap();
        let rec = ProgressRepo::record(&conn, user.id, &progress(d(2024, 5, 1), 1)).unwrap();

        assert!(ProgressRepo::get(&conn, other.id, rec.id).unwrap().is_none());
        assert!(!ProgressRepo::delete(&conn, other.id, rec.id).unwrap());
        assert!(ProgressRepo::delete(&conn, user.id, rec.id).unwrap());
        assert!(ProgressRepo::list(&conn, user.id).unwrap().is_empty());
    }

    #[test]
    fn update_and_totals() {
        let (conn, user) = setup();
        let mut p = progress(d(2024, 5, 1), 2);
        p.money_saved = 27_000.0;
        let rec = ProgressRepo::record(&conn, user.id, &p).unwrap();
        let mut p2 = progress(d(2024, 5, 2), 0);
        p2.money_saved = 30_000.0;
        ProgressRepo::record(&conn, user.id, &p2).unwrap();

        assert_eq!(ProgressRepo::total_money_saved(&conn, user.id).unwrap(), 57_000.0);
        assert!(ProgressRepo::update(&conn, user.id, rec.id, 0, 30_000.0, "better").unwrap());
        let updated = ProgressRepo::get(&conn, user.id, rec.id).unwrap().unwrap();
        assert_eq!(updated.health_status, "better");
        assert!(!ProgressRepo::update(&conn, user.id, 999, 0, 0.0, "").unwrap());
    }

    #[test]
    fn daily_stats_fill_unrecorded_days() {
        let (conn, user) = setup();
        ProgressRepo::record(&conn, user.id, &progress(d(2024, 5, 1), 0)).unwrap();
        ProgressRepo::record(&conn, user.id, &progress(d(2024, 5, 3), 2)).unwrap();

        let stats = ProgressRepo::daily_stats(&conn, user.id, d(2024, 5, 1), d(2024, 5, 4)).unwrap();
        assert_eq!(stats.len(), 4);
        assert!(stats[0].is_smoke_free());
        assert!(!stats[1].is_recorded());
        assert_eq!(stats[2].cigarettes_smoked, Some(2));
        assert_eq!(stats[3].date, "2024-05-04");
    }

    fn new_task(title: &str, due: Option<NaiveDate>, priority: TaskPriority) -> NewTask {
        NewTask {
            plan_id: None,
            title: title.to_string(),
            description: String::new(),
            task_type: TaskType::Custom,
            priority,
            due_date: due,
            points_reward: 5,
        }
    }

    #[test]
    fn tasks_split_into_upcoming_and_overdue() {
        let (conn, user) = setup();
        let today = d(2024, 6, 10);
        TaskRepo::create(&conn, user.id, &new_task("Late", Some(d(2024, 6, 8)), TaskPriority::Low))
            .unwrap();
        TaskRepo::create(&conn, user.id, &new_task("Undated", None, TaskPriority::High)).unwrap();
        TaskRepo::create(&conn, user.id, &new_task("Later", Some(d(2024, 6, 12)), TaskPriority::Low))
            .unwrap();
        TaskRepo::create(&conn, user.id, &new_task("Today low", Some(today), TaskPriority::Low))
            .unwrap();
        TaskRepo::create(&conn, user.id, &new_task("Today high", Some(today), TaskPriority::High))
            .unwrap();

        let titles = |tasks: Vec<Task>| tasks.into_iter().map(|t| t.title).collect::<Vec<_>>();
        assert_eq!(
            titles(TaskRepo::upcoming(&conn, user.id, today, 10).unwrap()),
            ["Today high", "Today low", "Later", "Undated"]
        );
        assert_eq!(titles(TaskRepo::upcoming(&conn, user.id, today, 2).unwrap()).len(), 2);
        assert_eq!(titles(TaskRepo::overdue(&conn, user.id, today).unwrap()), ["Late"]);
    }

    #[test]
    fn closing_a_task_is_one_way() {
        let (conn, user) = setup();
        let task =
            TaskRepo::create(&conn, user.id, &new_task("Walk", None, TaskPriority::Medium)).unwrap();
        assert!(task.is_pending());

        let done = TaskRepo::close(&conn, user.id, task.id, TaskStatus::Completed).unwrap();
        assert_eq!(done.status, TaskStatus::Completed);
        assert!(done.completed_at.is_some());
        let err = TaskRepo::close(&conn, user.id, task.id, TaskStatus::Skipped).unwrap_err();
        assert!(err.to_string().contains("already completed"));
        assert!(TaskRepo::close(&conn, user.id, 999, TaskStatus::Completed).is_err());

        let other =
            TaskRepo::create(&conn, user.id, &new_task("Read", None, TaskPriority::Low)).unwrap();
        let skipped = TaskRepo::close(&conn, user.id, other.id, TaskStatus::Skipped).unwrap();
        assert!(skipped.completed_at.is_none());

        assert_eq!(TaskRepo::points_earned(&conn, user.id).unwrap(), 5);
        assert!(TaskRepo::list(&conn, user.id, false).unwrap().is_empty());
        assert_eq!(TaskRepo::list(&conn, user.id, true).unwrap().len(), 2);
    }

    #[test]
    fn task_update_and_delete_are_scoped_to_owner() {
        let (conn, user) = setup();
        let intruder = UserRepo::create(&conn, "minh").unwrap();
        let mut task =
            TaskRepo::create(&conn, user.id, &new_task("Walk", None, TaskPriority::Low)).unwrap();

        assert!(TaskRepo::get(&conn, intruder.id, task.id).unwrap().is_none());
        assert!(!TaskRepo::delete(&conn, intruder.id, task.id).unwrap());

        task.title = "Walk 20 minutes".to_string();
        task.due_date = Some(d(2024, 6, 11));
        TaskRepo::update(&conn, &task).unwrap();
        let stored = TaskRepo::get(&conn, user.id, task.id).unwrap().unwrap();
        assert_eq!(stored.title, "Walk 20 minutes");
        assert_eq!(stored.due_date, Some(d(2024, 6, 11)));
        assert!(TaskRepo::exists(&conn, user.id, None, "Walk 20 minutes", Some(d(2024, 6, 11))).unwrap());
        assert!(!TaskRepo::exists(&conn, user.id, None, "Walk 20 minutes", None).unwrap());

        task.title = String::new();
        assert!(TaskRepo::update(&conn, &task).is_err());
        assert!(TaskRepo::delete(&conn, user.id, task.id).unwrap());
    }

    #[test]
    fn meta_set_get_delete() {
        let (conn, _) = setup();
        MetaRepo::set(&conn, "k", "1").unwrap();
        MetaRepo::set(&conn, "k", "2").unwrap();
        assert_eq!(MetaRepo::get(&conn, "k").unwrap().as_deref(), Some("2"));
        MetaRepo::delete(&conn, "k").unwrap();
        assert!(MetaRepo::get(&conn, "k").unwrap().is_none());
    }
}
