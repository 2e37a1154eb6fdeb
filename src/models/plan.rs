use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::utils::dates::days_between;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuitPlan {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub target_quit_date: NaiveDate,
    pub reason: String,
    pub smoking_status_id: Option<i64>,
}

impl QuitPlan {
    pub fn total_days(&self) -> i64 {
        days_between(self.start_date, self.target_quit_date)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewQuitPlan {
    pub name: String,
    pub start_date: NaiveDate,
    pub target_quit_date: NaiveDate,
    pub reason: String,
    pub smoking_status_id: Option<i64>,
}

impl NewQuitPlan {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Empty { field: "Plan name" });
        }
        if self.reason.trim().is_empty() {
            return Err(ValidationError::Empty { field: "Reason" });
        }
        if self.target_quit_date <= self.start_date {
            return Err(ValidationError::TargetBeforeStart {
                start: self.start_date,
                target: self.target_quit_date,
            });
        }
        Ok(())
    }
}

/// A time-boxed phase of a quit plan. Progress records point at the stage
/// whose date range contains them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub id: i64,
    pub plan_id: i64,
    pub stage_number: u32,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Stage {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewStage {
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl NewStage {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Empty { field: "Stage title" });
        }
        if self.end_date < self.start_date {
            return Err(ValidationError::StageEndsBeforeStart {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn plan(start: NaiveDate, target: NaiveDate) -> NewQuitPlan {
        NewQuitPlan {
            name: "Spring".to_string(),
            start_date: start,
            target_quit_date: target,
            reason: "My kids".to_string(),
            smoking_status_id: None,
        }
    }

    #[test]
    fn target_must_follow_start() {
        assert!(plan(d(2024, 3, 1), d(2024, 4, 1)).validate().is_ok());
        assert_eq!(
            plan(d(2024, 3, 1), d(2024, 3, 1)).validate(),
            Err(ValidationError::TargetBeforeStart {
                start: d(2024, 3, 1),
                target: d(2024, 3, 1)
            })
        );
    }

    #[test]
    fn blank_reason_rejected() {
        let mut p = plan(d(2024, 3, 1), d(2024, 4, 1));
        p.reason = "   ".to_string();
        assert_eq!(p.validate(), Err(ValidationError::Empty { field: "Reason" }));
    }

    #[test]
    fn stage_range_is_inclusive() {
        let stage = Stage {
            id: 1,
            plan_id: 1,
            stage_number: 1,
            title: "Cut down".to_string(),
            description: String::new(),
            start_date: d(2024, 3, 1),
            end_date: d(2024, 3, 7),
        };
        assert!(stage.contains(d(2024, 3, 1)));
        assert!(stage.contains(d(2024, 3, 7)));
        assert!(!stage.contains(d(2024, 3, 8)));
    }

    #[test]
    fn stage_may_not_end_before_it_starts() {
        let s = NewStage {
            title: "Taper".to_string(),
            description: String::new(),
            start_date: d(2024, 3, 7),
            end_date: d(2024, 3, 1),
        };
        assert!(matches!(
            s.validate(),
            Err(ValidationError::StageEndsBeforeStart { .. })
        ));
    }
}
