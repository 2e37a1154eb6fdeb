use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::metrics::daily_cost;
use crate::overview::Overview;
use crate::tui::theme;
use crate::utils::format::format_currency;

pub fn render(frame: &mut Frame, area: Rect, overview: &Overview, suffix: &str) {
    let block = Block::default()
        .title(Span::styled(" Savings ", theme::leaf()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Money kept      ", theme::dim()),
            Span::styled(
                format_currency(overview.savings.money_saved, suffix),
                theme::green().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Not smoked      ", theme::dim()),
            Span::styled(
                format!("{} cigarettes", overview.savings.cigarettes_avoided),
                theme::bold(),
            ),
        ]),
        Line::from(vec![
            Span::styled("  From records    ", theme::dim()),
            Span::styled(format_currency(overview.recorded_savings, suffix), theme::sky()),
        ]),
    ];

    match &overview.status {
        Some(status) => lines.push(Line::from(vec![
            Span::styled("  Habit cost/day  ", theme::dim()),
            Span::styled(format_currency(daily_cost(status), suffix), theme::amber()),
        ])),
        None => lines.push(Line::from(Span::styled(
            "  Run `smokefree status set` to track savings",
            theme::dim(),
        ))),
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
