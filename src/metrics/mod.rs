//! Derived quit-smoking metrics.
//!
//! Everything here is a pure function of its arguments: no I/O, no clock
//! reads, no hidden state. Missing or non-positive inputs degrade to a zero,
//! empty or `None` result rather than an error.

pub mod badges;
pub mod health;
pub mod motivation;
pub mod savings;
pub mod streak;

pub use badges::{Badge, BadgeKind, badge_for, earned_badges, next_badge};
pub use health::{HealthMilestone, health_timeline, next_milestone};
pub use motivation::{greeting, motivation_message};
pub use savings::{calculate_savings, daily_cost, monthly_cost, record_money_saved};
pub use streak::calculate_streak;
