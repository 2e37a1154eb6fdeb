use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::metrics::HealthMilestone;
use crate::tui::theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    reached: &[HealthMilestone],
    next: Option<&HealthMilestone>,
) {
    let block = Block::default()
        .title(Span::styled(" Health ", theme::leaf()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let mut lines = vec![Line::from("")];
    if reached.is_empty() {
        lines.push(Line::from(Span::styled(
            "  Your body starts healing after the first day",
            theme::dim(),
        )));
    }
    for m in reached {
        lines.push(Line::from(vec![
            Span::styled("  ✓ ", theme::green()),
            Span::styled(format!("{:<12}", m.timeline), theme::leaf()),
            Span::styled(m.title, theme::bold()),
        ]));
    }
    if let Some(m) = next {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  ○ ", theme::dim()),
            Span::styled(format!("{:<12}", m.timeline), theme::dim()),
            Span::styled(
                format!("{} (day {})", m.title, m.threshold_days),
                theme::dim(),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
