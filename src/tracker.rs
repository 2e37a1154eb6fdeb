use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use rusqlite::Connection;

use crate::db::repository::{PlanRepo, ProgressRepo, SmokingStatusRepo, StageRepo};
use crate::metrics::record_money_saved;
use crate::models::{NewProgress, ProgressRecord};
use crate::session::Session;

/// Record a day's cigarettes: values the unsmoked ones against the current
/// habit and attaches the plan stage covering that day.
pub fn record_day(
    conn: &Connection,
    session: &Session,
    date: NaiveDate,
    cigarettes_smoked: u32,
    health_status: &str,
) -> Result<ProgressRecord> {
    let status = SmokingStatusRepo::latest(conn, session.user_id)?;
    if status.is_none() {
        log::warn!("Recording progress without a smoking status; money saved will be 0");
    }
    let stage_id = match PlanRepo::active(conn, session.user_id)? {
        Some(plan) => StageRepo::for_date(conn, plan.id, date)?.map(|s| s.id),
        None => None,
    };

    ProgressRepo::record(
        conn,
        session.user_id,
        &NewProgress {
            date,
            cigarettes_smoked,
            money_saved: record_money_saved(status.as_ref(), cigarettes_smoked),
            health_status: health_status.to_string(),
            stage_id,
        },
    )
}

/// Edit a recorded day, re-valuing it when the cigarette count changes.
pub fn update_day(
    conn: &Connection,
    session: &Session,
    id: i64,
    cigarettes_smoked: Option<u32>,
    health_status: Option<&str>,
) -> Result<ProgressRecord> {
    let existing = ProgressRepo::get(conn, session.user_id, id)?
        .ok_or_else(|| anyhow!("Progress record {} not found", id))?;

    let cigarettes = cigarettes_smoked.unwrap_or(existing.cigarettes_smoked);
    let money_saved = if cigarettes_smoked.is_some() {
        let status = SmokingStatusRepo::latest(conn, session.user_id)?;
        record_money_saved(status.as_ref(), cigarettes)
    } else {
        existing.money_saved
    };
    let health = health_status.unwrap_or(&existing.health_status);

    ProgressRepo::update(conn, session.user_id, id, cigarettes, money_saved, health)?;
    ProgressRepo::get(conn, session.user_id, id)?
        .ok_or_else(|| anyhow!("Progress record {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::{NewQuitPlan, NewSmokingStatus, NewStage};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn setup() -> (Connection, Session) {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let session = Session::register(&conn, "lan").unwrap();
        (conn, session)
    }

    #[test]
    fn values_unsmoked_cigarettes_and_finds_stage() {
        let (conn, session) = setup();
        SmokingStatusRepo::add(
            &conn,
            session.user_id,
            &NewSmokingStatus {
                cigarettes_per_day: 20,
                cost_per_pack: 40_000.0,
                start_date: d(2024, 5, 1),
            },
        )
        .unwrap();
        let plan = PlanRepo::create(
            &conn,
            session.user_id,
            &NewQuitPlan {
                name: "May".to_string(),
                start_date: d(2024, 5, 1),
                target_quit_date: d(2024, 6, 1),
                reason: "Breathe".to_string(),
                smoking_status_id: None,
            },
        )
        .unwrap();
        let stage = StageRepo::add(
            &conn,
            plan.id,
            &NewStage {
                title: "Week one".to_string(),
                description: String::new(),
                start_date: d(2024, 5, 1),
                end_date: d(2024, 5, 7),
            },
        )
        .unwrap();

        let rec = record_day(&conn, &session, d(2024, 5, 3), 5, "tired").unwrap();
        assert_eq!(rec.money_saved, 30_000.0);
        assert_eq!(rec.stage_id, Some(stage.id));

        let outside = record_day(&conn, &session, d(2024, 5, 20), 0, "").unwrap();
        assert_eq!(outside.stage_id, None);
        assert_eq!(outside.money_saved, 40_000.0);
    }

    #[test]
    fn without_status_saves_nothing() {
        let (conn, session) = setup();
        let rec = record_day(&conn, &session, d(2024, 5, 3), 0, "").unwrap();
        assert_eq!(rec.money_saved, 0.0);
    }

    #[test]
    fn update_revalues_only_on_count_change() {
        let (conn, session) = setup();
        SmokingStatusRepo::add(
            &conn,
            session.user_id,
            &NewSmokingStatus {
                cigarettes_per_day: 10,
                cost_per_pack: 20_000.0,
                start_date: d(2024, 5, 1),
            },
        )
        .unwrap();
        let rec = record_day(&conn, &session, d(2024, 5, 3), 10, "").unwrap();
        assert_eq!(rec.money_saved, 0.0);

        let noted = update_day(&conn, &session, rec.id, None, Some("calmer")).unwrap();
        assert_eq!(noted.money_saved, 0.0);
        assert_eq!(noted.health_status, "calmer");

        let fixed = update_day(&conn, &session, rec.id, Some(0), None).unwrap();
        assert_eq!(fixed.money_saved, 10_000.0);
        assert_eq!(fixed.health_status, "calmer");

        assert!(update_day(&conn, &session, 999, Some(0), None).is_err());
    }
}
