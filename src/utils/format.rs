use unicode_width::UnicodeWidthStr;

/// Format a money amount with `.` thousands separators and a currency suffix,
/// e.g. `1.500.000 VNĐ`. Fractions are rounded away.
pub fn format_currency(amount: f64, suffix: &str) -> String {
    if !amount.is_finite() || amount == 0.0 {
        return format!("0 {}", suffix);
    }
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0 { "-" } else { "" };
    format!("{}{} {}", sign, grouped, suffix)
}

/// Parse a typed money amount.
///
/// A `.` or `,` followed by groups of exactly three digits is a thousands
/// separator (`25.000`, `1,500,000`); otherwise it is the decimal point
/// (`12.50`). With both present, the last one is the decimal point.
pub fn parse_amount(input: &str) -> Option<f64> {
    let s: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if s.is_empty() {
        return None;
    }

    let normalized = match (s.rfind('.'), s.rfind(',')) {
        (Some(dot), Some(comma)) => {
            let (group, decimal) = if dot > comma { (',', '.') } else { ('.', ',') };
            if s.matches(decimal).count() > 1 {
                return None;
            }
            s.replace(group, "").replace(decimal, ".")
        }
        (Some(_), None) => ungroup(&s, '.')?,
        (None, Some(_)) => ungroup(&s, ',')?,
        (None, None) => s,
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn ungroup(s: &str, sep: char) -> Option<String> {
    let parts: Vec<&str> = s.split(sep).collect();
    let grouped = parts[1..].iter().all(|p| p.len() == 3);
    match parts.len() {
        2 if !grouped => Some(s.replace(sep, ".")),
        _ if grouped => Some(parts.concat()),
        // 1.50.000 and the like
        _ => None,
    }
}

/// Short form used on badges and in tight widgets: `100K`, `1.5M`.
pub fn format_compact(amount: f64) -> String {
    if amount >= 1_000_000.0 {
        let m = amount / 1_000_000.0;
        if m == m.floor() {
            format!("{}M", m as i64)
        } else {
            format!("{:.1}M", m)
        }
    } else if amount >= 1_000.0 {
        format!("{}K", (amount / 1_000.0).floor() as i64)
    } else {
        format!("{}", amount.round() as i64)
    }
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Left-align `s` in a column of `width` terminal cells.
///
/// `format!("{:<w$}")` counts chars, which misaligns emoji and wide glyphs.
pub fn pad_display(s: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(used)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(500_000.0, "VNĐ"), "500.000 VNĐ");
        assert_eq!(format_currency(1_500_000.0, "VNĐ"), "1.500.000 VNĐ");
        assert_eq!(format_currency(999.0, "VNĐ"), "999 VNĐ");
        assert_eq!(format_currency(1_000.0, "VNĐ"), "1.000 VNĐ");
    }

    #[test]
    fn currency_zero_and_rounding() {
        assert_eq!(format_currency(0.0, "VNĐ"), "0 VNĐ");
        assert_eq!(format_currency(f64::NAN, "VNĐ"), "0 VNĐ");
        assert_eq!(format_currency(12_345.6, "₫"), "12.346 ₫");
        assert_eq!(format_currency(-2_500.0, "VNĐ"), "-2.500 VNĐ");
    }

    #[test]
    fn amounts_keep_decimals_and_drop_grouping() {
        assert_eq!(parse_amount("30000"), Some(30_000.0));
        assert_eq!(parse_amount("25.000"), Some(25_000.0));
        assert_eq!(parse_amount("1.500.000"), Some(1_500_000.0));
        assert_eq!(parse_amount("1,500,000"), Some(1_500_000.0));
        assert_eq!(parse_amount("12.50"), Some(12.5));
        assert_eq!(parse_amount("12,5"), Some(12.5));
        assert_eq!(parse_amount("1,234.56"), Some(1_234.56));
        assert_eq!(parse_amount("1.234,56"), Some(1_234.56));
        assert_eq!(parse_amount(" 45 000 "), Some(45_000.0));
    }

    #[test]
    fn ambiguous_amounts_are_rejected() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("1.50.000"), None);
        assert_eq!(parse_amount("1.2.3"), None);
        assert_eq!(parse_amount("1,2.3,4"), None);
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn compact_amounts() {
        assert_eq!(format_compact(100_000.0), "100K");
        assert_eq!(format_compact(1_000_000.0), "1M");
        assert_eq!(format_compact(1_500_000.0), "1.5M");
        assert_eq!(format_compact(450.0), "450");
    }

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(progress_bar(5, 10, 4), "██░░");
        assert_eq!(progress_bar(20, 10, 3), "███");
        assert_eq!(progress_bar(1, 0, 3), "░░░");
    }

    #[test]
    fn pad_counts_wide_glyphs() {
        assert_eq!(pad_display("ab", 4), "ab  ");
        assert_eq!(pad_display("🌱", 4), "🌱  ");
        assert_eq!(pad_display("toolong", 3), "toolong");
    }
}
