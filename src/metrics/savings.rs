use crate::models::{Savings, SmokingStatus};

pub const CIGARETTES_PER_PACK: f64 = 20.0;

/// Cost of one day of the recorded habit.
pub fn daily_cost(status: &SmokingStatus) -> f64 {
    let packs_per_day = status.cigarettes_per_day as f64 / CIGARETTES_PER_PACK;
    packs_per_day * status.cost_per_pack
}

/// 30-day projection shown when entering a habit.
pub fn monthly_cost(status: &SmokingStatus) -> f64 {
    daily_cost(status) * 30.0
}

/// Money saved and cigarettes avoided after `days_since_start` days.
///
/// A missing status or a non-positive day count yields zero for both.
pub fn calculate_savings(status: Option<&SmokingStatus>, days_since_start: i64) -> Savings {
    let Some(status) = status else {
        return Savings::default();
    };
    if days_since_start <= 0 {
        return Savings::default();
    }

    Savings {
        money_saved: daily_cost(status) * days_since_start as f64,
        cigarettes_avoided: status.cigarettes_per_day as u64 * days_since_start as u64,
    }
}

/// Value stored on a daily progress record: the price of the cigarettes that
/// were not smoked that day.
pub fn record_money_saved(status: Option<&SmokingStatus>, cigarettes_smoked: u32) -> f64 {
    let Some(status) = status else {
        return 0.0;
    };
    let avoided = status.cigarettes_per_day.saturating_sub(cigarettes_smoked);
    avoided as f64 / CIGARETTES_PER_PACK * status.cost_per_pack
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn status(cigs: u32, cost: f64) -> SmokingStatus {
        SmokingStatus {
            id: 1,
            user_id: 1,
            cigarettes_per_day: cigs,
            cost_per_pack: cost,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            created_at: String::new(),
        }
    }

    #[test]
    fn pack_a_day_for_ten_days() {
        let s = status(20, 50_000.0);
        let savings = calculate_savings(Some(&s), 10);
        assert_eq!(savings.money_saved, 500_000.0);
        assert_eq!(savings.cigarettes_avoided, 200);
    }

    #[test]
    fn half_pack_uses_fractional_packs() {
        let s = status(10, 30_000.0);
        assert_eq!(daily_cost(&s), 15_000.0);
        assert_eq!(monthly_cost(&s), 450_000.0);
        assert_eq!(calculate_savings(Some(&s), 3).money_saved, 45_000.0);
    }

    #[test]
    fn missing_status_is_zero() {
        assert_eq!(calculate_savings(None, 10), Savings::default());
    }

    #[test]
    fn non_positive_days_are_zero() {
        let s = status(20, 50_000.0);
        assert_eq!(calculate_savings(Some(&s), 0), Savings::default());
        assert_eq!(calculate_savings(Some(&s), -4), Savings::default());
    }

    #[test]
    fn same_inputs_same_outputs() {
        let s = status(15, 25_000.0);
        assert_eq!(calculate_savings(Some(&s), 42), calculate_savings(Some(&s), 42));
    }

    #[test]
    fn record_value_counts_only_unsmoked() {
        let s = status(20, 40_000.0);
        assert_eq!(record_money_saved(Some(&s), 0), 40_000.0);
        assert_eq!(record_money_saved(Some(&s), 5), 30_000.0);
        assert_eq!(record_money_saved(Some(&s), 25), 0.0);
        assert_eq!(record_money_saved(None, 0), 0.0);
    }
}
