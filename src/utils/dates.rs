use anyhow::{Context, Result};
use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn to_db(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Display form, day first.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Absolute number of days between two dates.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days().abs()
}

/// Days elapsed since `start`, never negative.
pub fn days_since(start: NaiveDate, today: NaiveDate) -> i64 {
    (today - start).num_days().max(0)
}

/// Days left until `target`; negative once the target has passed.
pub fn days_until(target: NaiveDate, today: NaiveDate) -> i64 {
    (target - today).num_days()
}

pub fn is_today(date: NaiveDate, today: NaiveDate) -> bool {
    date == today
}

/// Rounded completion percentage, capped at 100.
pub fn progress_percentage(current: i64, total: i64) -> u32 {
    if total <= 0 || current <= 0 {
        return 0;
    }
    let pct = (current as f64 / total as f64 * 100.0).round();
    pct.min(100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date("2024-02-29").unwrap(), d(2024, 2, 29));
        assert_eq!(parse_date(" 2024-01-05 ").unwrap(), d(2024, 1, 5));
        assert!(parse_date("05/01/2024").is_err());
    }

    #[test]
    fn display_is_day_first() {
        assert_eq!(format_date(d(2024, 1, 5)), "05/01/2024");
        assert_eq!(to_db(d(2024, 1, 5)), "2024-01-05");
    }

    #[test]
    fn day_arithmetic() {
        assert_eq!(days_between(d(2024, 1, 10), d(2024, 1, 1)), 9);
        assert_eq!(days_since(d(2024, 1, 1), d(2024, 1, 11)), 10);
        assert_eq!(days_since(d(2024, 2, 1), d(2024, 1, 11)), 0);
        assert_eq!(days_until(d(2024, 1, 15), d(2024, 1, 11)), 4);
        assert_eq!(days_until(d(2024, 1, 10), d(2024, 1, 11)), -1);
        assert!(is_today(d(2024, 1, 11), d(2024, 1, 11)));
    }

    #[test]
    fn percentage_is_capped_and_safe() {
        assert_eq!(progress_percentage(15, 30), 50);
        assert_eq!(progress_percentage(1, 3), 33);
        assert_eq!(progress_percentage(45, 30), 100);
        assert_eq!(progress_percentage(5, 0), 0);
        assert_eq!(progress_percentage(-2, 30), 0);
    }
}
