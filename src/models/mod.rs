pub mod plan;
pub mod progress;
pub mod smoking;
pub mod stats;
pub mod task;
pub mod user;

pub use plan::{NewQuitPlan, NewStage, QuitPlan, Stage};
pub use progress::{NewProgress, ProgressRecord};
pub use smoking::{NewSmokingStatus, SmokingStatus};
pub use stats::{DailyStats, Savings, Streak};
pub use task::{NewTask, Task, TaskPriority, TaskStatus, TaskType};
pub use user::User;
