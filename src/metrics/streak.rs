use crate::models::{ProgressRecord, Streak};

/// Smoke-free run ending at the most recent record.
///
/// Records are ordered newest first and counted until the first day with a
/// cigarette. Dates are not checked for gaps: an unrecorded day neither
/// breaks nor extends the run.
fn current_streak(records: &[ProgressRecord]) -> u32 {
    let mut sorted: Vec<&ProgressRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    sorted
        .iter()
        .take_while(|r| r.is_smoke_free())
        .count() as u32
}

/// Longest smoke-free run anywhere in the history, with the same gap
/// semantics as [`current_streak`].
fn best_streak(records: &[ProgressRecord]) -> u32 {
    let mut sorted: Vec<&ProgressRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.date);

    let mut best = 0u32;
    let mut run = 0u32;
    for record in sorted {
        if record.is_smoke_free() {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best
}

pub fn calculate_streak(records: &[ProgressRecord]) -> Streak {
    Streak {
        current: current_streak(records),
        best: best_streak(records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(day: u32, smoked: u32) -> ProgressRecord {
        ProgressRecord {
            id: day as i64,
            user_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            cigarettes_smoked: smoked,
            money_saved: 0.0,
            health_status: String::new(),
            stage_id: None,
        }
    }

    #[test]
    fn empty_history_has_no_streak() {
        assert_eq!(current_streak(&[]), 0);
        assert_eq!(calculate_streak(&[]), Streak::default());
    }

    #[test]
    fn counts_trailing_zero_days() {
        let records = vec![rec(3, 0), rec(2, 0), rec(1, 3)];
        assert_eq!(current_streak(&records), 2);
    }

    #[test]
    fn input_order_does_not_matter() {
        let records = vec![rec(1, 3), rec(3, 0), rec(2, 0)];
        assert_eq!(current_streak(&records), 2);
    }

    #[test]
    fn latest_day_smoked_resets_current() {
        let records = vec![rec(1, 0), rec(2, 0), rec(3, 1)];
        assert_eq!(current_streak(&records), 0);
        assert_eq!(best_streak(&records), 2);
    }

    #[test]
    fn gaps_are_not_reconciled() {
        // 5th and 6th missing, still one unbroken run
        let records = vec![rec(4, 0), rec(7, 0), rec(8, 0)];
        assert_eq!(current_streak(&records), 3);
    }

    #[test]
    fn best_tracks_longest_run() {
        let records = vec![
            rec(1, 0),
            rec(2, 0),
            rec(3, 0),
            rec(4, 2),
            rec(5, 0),
            rec(6, 0),
        ];
        assert_eq!(
            calculate_streak(&records),
            Streak {
                current: 2,
                best: 3
            }
        );
    }

    #[test]
    fn metrics_summary_combines_both_runs() {
        let records = vec![rec(1, 0), rec(2, 1), rec(3, 0)];
        let streak = crate::metrics::calculate_streak(&records);
        assert_eq!(streak.current, current_streak(&records));
        assert_eq!(streak.best, best_streak(&records));
        assert_eq!(streak.best, 1);
    }
}
