use serde::{Deserialize, Serialize};

/// Money and cigarettes not spent since the quit date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Savings {
    pub money_saved: f64,
    pub cigarettes_avoided: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub best: u32,
}

/// Per-day summary used by the weekly views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: String,
    pub cigarettes_smoked: Option<u32>,
}

impl DailyStats {
    pub fn is_recorded(&self) -> bool {
        self.cigarettes_smoked.is_some()
    }

    pub fn is_smoke_free(&self) -> bool {
        self.cigarettes_smoked == Some(0)
    }
}
