pub mod badges;
pub mod header;
pub mod health;
pub mod plan;
pub mod savings;
pub mod statusbar;
pub mod streak;
pub mod tasks;
