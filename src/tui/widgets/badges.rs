use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::metrics::{BadgeKind, badge_for, next_badge};
use crate::overview::Overview;
use crate::tui::theme;
use crate::utils::format::format_compact;

fn target_label(kind: BadgeKind, threshold: f64) -> String {
    match kind {
        BadgeKind::Days => format!("{} days", threshold),
        BadgeKind::Money => format_compact(threshold),
    }
}

pub fn render(frame: &mut Frame, area: Rect, overview: &Overview) {
    let block = Block::default()
        .title(Span::styled(" Badges ", theme::leaf()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let mut lines = vec![Line::from("")];
    for kind in BadgeKind::all() {
        let value = overview.metric_for(kind);
        let current = match badge_for(kind, value) {
            Some(b) => Span::styled(
                format!("{} {}", b.icon, b.title),
                theme::amber().add_modifier(Modifier::BOLD),
            ),
            None => Span::styled("not yet", theme::dim()),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<17}", kind.display_name()), theme::dim()),
            current,
        ]));
        if let Some(next) = next_badge(kind, value) {
            lines.push(Line::from(Span::styled(
                format!("  {:<17}next: {} at {}", "", next.title, target_label(kind, next.threshold)),
                theme::dim(),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
