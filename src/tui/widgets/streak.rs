use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::models::{DailyStats, Streak};
use crate::tui::theme;
use crate::utils::format::progress_bar;

/// Dot for one day of the weekly strip.
pub fn day_dot(day: &DailyStats) -> (&'static str, ratatui::style::Style) {
    match day.cigarettes_smoked {
        Some(0) => ("●", theme::green().add_modifier(Modifier::BOLD)),
        Some(1..=3) => ("◑", theme::amber()),
        Some(_) => ("●", theme::red()),
        None => ("○", theme::dim()),
    }
}

pub fn render(frame: &mut Frame, area: Rect, streak: &Streak, weekly: &[DailyStats]) {
    let block = Block::default()
        .title(Span::styled(" Streak ", theme::leaf()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let mut dot_spans = vec![Span::styled("  ", theme::dim())];
    for day in weekly.iter().rev().take(7).rev() {
        let (dot, style) = day_dot(day);
        dot_spans.push(Span::styled(dot, style));
        dot_spans.push(Span::styled("  ", theme::dim()));
    }

    // Bar fills over the first month
    let bar = progress_bar(streak.current.min(30), 30, 12);
    let smoke_free_this_week = weekly.iter().rev().take(7).filter(|d| d.is_smoke_free()).count();

    let streak_line = Line::from(vec![
        Span::styled("  ", theme::dim()),
        Span::styled(bar, theme::green()),
        Span::styled(
            format!("  {} days", streak.current),
            theme::green().add_modifier(Modifier::BOLD),
        ),
    ]);

    let meta_line = Line::from(vec![Span::styled(
        format!("  Best: {}  ·  Week: {}/7", streak.best, smoke_free_this_week),
        theme::dim(),
    )]);

    let text = vec![
        Line::from(""),
        streak_line,
        Line::from(dot_spans),
        meta_line,
    ];
    frame.render_widget(Paragraph::new(text).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dots_follow_the_count() {
        let day = |n: Option<u32>| DailyStats {
            date: "2024-06-01".to_string(),
            cigarettes_smoked: n,
        };
        assert_eq!(day_dot(&day(Some(0))).0, "●");
        assert_eq!(day_dot(&day(Some(2))).0, "◑");
        assert_eq!(day_dot(&day(None)).0, "○");
    }
}
