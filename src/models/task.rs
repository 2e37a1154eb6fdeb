use anyhow::anyhow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Daily,
    HabitBuilding,
    Milestone,
    Custom,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Daily => "daily",
            TaskType::HabitBuilding => "habit_building",
            TaskType::Milestone => "milestone",
            TaskType::Custom => "custom",
        }
    }
}

impl FromStr for TaskType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "daily" => Ok(TaskType::Daily),
            "habit" | "habit_building" => Ok(TaskType::HabitBuilding),
            "milestone" => Ok(TaskType::Milestone),
            "custom" => Ok(TaskType::Custom),
            _ => Err(anyhow!("Unknown task type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl FromStr for TaskPriority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" | "med" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            _ => Err(anyhow!("Unknown priority: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
    Skipped,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
            TaskStatus::Skipped => "skipped",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "completed" => Ok(TaskStatus::Completed),
            "skipped" => Ok(TaskStatus::Skipped),
            _ => Err(anyhow!("Unknown task status: {}", s)),
        }
    }
}

/// A checklist item, optionally tied to a quit plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub user_id: i64,
    pub plan_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub task_type: TaskType,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    pub points_reward: u32,
    pub completed_at: Option<String>,
}

impl Task {
    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }

    /// Pending and due before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_pending() && self.due_date.is_some_and(|d| d < today)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub plan_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub task_type: TaskType,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub points_reward: u32,
}

impl NewTask {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Empty { field: "Task title" });
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

    fn task(status: TaskStatus, due: Option<NaiveDate>) -> Task {
        Task {
            id: 1,
            user_id: 1,
            plan_id: None,
            title: "Drink water".to_string(),
            description: String::new(),
            task_type: TaskType::Daily,
            priority: TaskPriority::Medium,
            status,
            due_date: due,
            points_reward: 3,
            completed_at: None,
        }
    }

    #[test]
    fn only_pending_past_due_is_overdue() {
        let today = d(2024, 6, 10);
        assert!(task(TaskStatus::Pending, Some(d(2024, 6, 9))).is_overdue(today));
        assert!(!task(TaskStatus::Pending, Some(today)).is_overdue(today));
        assert!(!task(TaskStatus::Pending, None).is_overdue(today));
        assert!(!task(TaskStatus::Skipped, Some(d(2024, 6, 1))).is_overdue(today));
    }

    #[test]
    fn parses_loose_names() {
        assert_eq!("habit-building".parse::<TaskType>().unwrap(), TaskType::HabitBuilding);
        assert_eq!("HIGH".parse::<TaskPriority>().unwrap(), TaskPriority::High);
        assert!("urgent".parse::<TaskPriority>().is_err());
        assert_eq!("skipped".parse::<TaskStatus>().unwrap(), TaskStatus::Skipped);
    }

    #[test]
    fn title_is_required() {
        let new = NewTask {
            plan_id: None,
            title: "  ".to_string(),
            description: String::new(),
            task_type: TaskType::Custom,
            priority: TaskPriority::Low,
            due_date: None,
            points_reward: 0,
        };
        assert_eq!(new.validate(), Err(ValidationError::Empty { field: "Task title" }));
    }
}
