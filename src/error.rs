use chrono::NaiveDate;

/// Rejections raised when a new record fails boundary validation.
///
/// The metric functions never produce these; they only guard what gets
/// written to the database.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Cigarettes per day must be greater than 0")]
    NoCigarettes,

    #[error("Cost per pack must be greater than 0 (got {0})")]
    InvalidCost(f64),

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("Target quit date {target} must be after start date {start}")]
    TargetBeforeStart { start: NaiveDate, target: NaiveDate },

    #[error("Stage end date {end} is before its start date {start}")]
    StageEndsBeforeStart { start: NaiveDate, end: NaiveDate },

    #[error("Username may only contain letters, digits, '-' and '_' (got '{0}')")]
    InvalidUsername(String),
}
