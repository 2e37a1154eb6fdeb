use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Snapshot of a smoking habit, used as the baseline for savings.
///
/// Records are never edited in place: a change of habit adds a new row and
/// the newest one becomes current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmokingStatus {
    pub id: i64,
    pub user_id: i64,
    pub cigarettes_per_day: u32,
    pub cost_per_pack: f64,
    pub start_date: NaiveDate,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSmokingStatus {
    pub cigarettes_per_day: u32,
    pub cost_per_pack: f64,
    pub start_date: NaiveDate,
}

impl NewSmokingStatus {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cigarettes_per_day == 0 {
            return Err(ValidationError::NoCigarettes);
        }
        if !(self.cost_per_pack > 0.0) || !self.cost_per_pack.is_finite() {
            return Err(ValidationError::InvalidCost(self.cost_per_pack));
        }
        Ok(())
    }
}
