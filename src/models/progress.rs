use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of tracked progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub cigarettes_smoked: u32,
    pub money_saved: f64,
    pub health_status: String,
    pub stage_id: Option<i64>,
}

impl ProgressRecord {
    pub fn is_smoke_free(&self) -> bool {
        self.cigarettes_smoked == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProgress {
    pub date: NaiveDate,
    pub cigarettes_smoked: u32,
    pub money_saved: f64,
    pub health_status: String,
    pub stage_id: Option<i64>,
}
