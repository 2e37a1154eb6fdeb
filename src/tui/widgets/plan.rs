use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::overview::Overview;
use crate::tui::theme;
use crate::utils::dates::format_date;
use crate::utils::format::progress_bar;

pub fn render(frame: &mut Frame, area: Rect, overview: &Overview) {
    let block = Block::default()
        .title(Span::styled(" Plan ", theme::leaf()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let mut lines = vec![Line::from("")];

    match &overview.plan {
        Some(plan) => {
            lines.push(Line::from(vec![
                Span::styled("  ", theme::dim()),
                Span::styled(plan.name.as_str(), theme::bold()),
                Span::styled(
                    format!(
                        "  {} → {}",
                        format_date(plan.start_date),
                        format_date(plan.target_quit_date)
                    ),
                    theme::dim(),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  ", theme::dim()),
                Span::styled(
                    progress_bar(overview.plan_progress_pct, 100, 20),
                    theme::green(),
                ),
                Span::styled(
                    format!("  {}%", overview.plan_progress_pct),
                    theme::green().add_modifier(Modifier::BOLD),
                ),
            ]));
            let remaining = match overview.days_until_target {
                Some(d) if d > 0 => format!("  {} days to target", d),
                Some(0) => "  Target day is today".to_string(),
                _ => "  Target date reached".to_string(),
            };
            lines.push(Line::from(Span::styled(remaining, theme::dim())));
            if let Some(stage) = &overview.stage {
                lines.push(Line::from(vec![
                    Span::styled(format!("  Stage {}: ", stage.stage_number), theme::dim()),
                    Span::styled(stage.title.as_str(), theme::sky()),
                ]));
            }
            lines.push(Line::from(vec![
                Span::styled("  Why: ", theme::dim()),
                Span::styled(plan.reason.as_str(), theme::amber()),
            ]));
        }
        None => lines.push(Line::from(Span::styled(
            "  No plan yet. Run `smokefree plan create`",
            theme::dim(),
        ))),
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  {}", overview.motivation),
        theme::leaf(),
    )));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
