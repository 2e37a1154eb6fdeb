use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

use crate::db::repository::{PlanRepo, ProgressRepo, SmokingStatusRepo, StageRepo};
use crate::metrics::{
    Badge, BadgeKind, HealthMilestone, badge_for, calculate_savings, calculate_streak,
    health_timeline, motivation_message, next_milestone,
};
use crate::models::{ProgressRecord, QuitPlan, Savings, SmokingStatus, Stage, Streak};
use crate::session::Session;
use crate::utils::dates::{days_since, days_until, progress_percentage};

/// Everything the stats, export and dashboard views derive from one user's
/// records on a given day.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub today: NaiveDate,
    pub status: Option<SmokingStatus>,
    pub plan: Option<QuitPlan>,
    pub stage: Option<Stage>,
    pub days_quit: u32,
    pub savings: Savings,
    /// Sum of the per-day values stored on progress records.
    pub recorded_savings: f64,
    pub streak: Streak,
    pub day_badge: Option<&'static Badge>,
    pub money_badge: Option<&'static Badge>,
    pub motivation: String,
    pub health: Vec<HealthMilestone>,
    pub next_milestone: Option<HealthMilestone>,
    pub plan_progress_pct: u32,
    pub days_until_target: Option<i64>,
    pub latest_health_status: Option<String>,
}

impl Overview {
    /// Quit date: the active plan's start, else the smoking status start.
    pub fn quit_date(status: Option<&SmokingStatus>, plan: Option<&QuitPlan>) -> Option<NaiveDate> {
        plan.map(|p| p.start_date).or(status.map(|s| s.start_date))
    }

    pub fn compute(
        status: Option<SmokingStatus>,
        plan: Option<QuitPlan>,
        stage: Option<Stage>,
        records: &[ProgressRecord],
        today: NaiveDate,
    ) -> Self {
        let days = Self::quit_date(status.as_ref(), plan.as_ref())
            .map(|start| days_since(start, today))
            .unwrap_or(0);
        let days_quit = u32::try_from(days).unwrap_or(u32::MAX);

        let savings = calculate_savings(status.as_ref(), days);
        let (plan_progress_pct, days_until_target) = match &plan {
            Some(p) => (
                progress_percentage(days, p.total_days()),
                Some(days_until(p.target_quit_date, today)),
            ),
            None => (0, None),
        };

        let latest_health_status = records
            .iter()
            .filter(|r| !r.health_status.is_empty())
            .max_by_key(|r| r.date)
            .map(|r| r.health_status.clone());

        Overview {
            today,
            days_quit,
            savings,
            recorded_savings: records.iter().map(|r| r.money_saved).sum(),
            streak: calculate_streak(records),
            day_badge: badge_for(BadgeKind::Days, days_quit as f64),
            money_badge: badge_for(BadgeKind::Money, savings.money_saved),
            motivation: motivation_message(days_quit),
            health: health_timeline(days_quit),
            next_milestone: next_milestone(days_quit),
            plan_progress_pct,
            days_until_target,
            latest_health_status,
            status,
            plan,
            stage,
        }
    }

    pub fn load(conn: &Connection, session: &Session, today: NaiveDate) -> Result<Self> {
        let status = SmokingStatusRepo::latest(conn, session.user_id)?;
        let plan = PlanRepo::active(conn, session.user_id)?;
        let stage = match &plan {
            Some(p) => StageRepo::for_date(conn, p.id, today)?,
            None => None,
        };
        let records = ProgressRepo::list(conn, session.user_id)?;
        Ok(Self::compute(status, plan, stage, &records, today))
    }

    pub fn metric_for(&self, kind: BadgeKind) -> f64 {
        match kind {
            BadgeKind::Days => self.days_quit as f64,
            BadgeKind::Money => self.savings.money_saved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn status(start: NaiveDate) -> SmokingStatus {
        SmokingStatus {
            id: 1,
            user_id: 1,
            cigarettes_per_day: 20,
            cost_per_pack: 50_000.0,
            start_date: start,
            created_at: String::new(),
        }
    }

    fn plan(start: NaiveDate, target: NaiveDate) -> QuitPlan {
        QuitPlan {
            id: 1,
            user_id: 1,
            name: "Plan".to_string(),
            start_date: start,
            target_quit_date: target,
            reason: "Family".to_string(),
            smoking_status_id: Some(1),
        }
    }

    #[test]
    fn empty_user_is_all_zero() {
        let o = Overview::compute(None, None, None, &[], d(2024, 6, 1));
        assert_eq!(o.days_quit, 0);
        assert_eq!(o.savings, Savings::default());
        assert!(o.day_badge.is_none());
        assert!(o.health.is_empty());
        assert_eq!(o.plan_progress_pct, 0);
        assert!(o.days_until_target.is_none());
    }

    #[test]
    fn ten_days_on_a_pack_a_day() {
        let o = Overview::compute(
            Some(status(d(2024, 1, 1))),
            Some(plan(d(2024, 6, 1), d(2024, 7, 1))),
            None,
            &[],
            d(2024, 6, 11),
        );
        // plan start wins over status start
        assert_eq!(o.days_quit, 10);
        assert_eq!(o.savings.money_saved, 500_000.0);
        assert_eq!(o.day_badge.unwrap().threshold, 7.0);
        assert_eq!(o.money_badge.unwrap().threshold, 500_000.0);
        assert_eq!(o.plan_progress_pct, 33);
        assert_eq!(o.days_until_target, Some(20));
        assert_eq!(o.health.len(), 3);
    }

    #[test]
    fn status_start_used_without_plan() {
        let o = Overview::compute(Some(status(d(2024, 6, 1))), None, None, &[], d(2024, 6, 3));
        assert_eq!(o.days_quit, 2);
        assert_eq!(o.metric_for(BadgeKind::Days), 2.0);
        assert_eq!(o.metric_for(BadgeKind::Money), 100_000.0);
    }

    #[test]
    fn latest_health_note_wins() {
        let rec = |day: u32, note: &str| ProgressRecord {
            id: day as i64,
            user_id: 1,
            date: d(2024, 6, day),
            cigarettes_smoked: 0,
            money_saved: 10.0,
            health_status: note.to_string(),
            stage_id: None,
        };
        let records = vec![rec(2, "coughing"), rec(4, "breathing easier"), rec(5, "")];
        let o = Overview::compute(None, None, None, &records, d(2024, 6, 5));
        assert_eq!(o.latest_health_status.as_deref(), Some("breathing easier"));
        assert_eq!(o.recorded_savings, 30.0);
        assert_eq!(o.streak.current, 3);
    }
}
