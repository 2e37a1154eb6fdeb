use chrono::{Local, Timelike};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::metrics::greeting;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, name: &str, days_quit: u32) {
    let now = Local::now();
    let date_str = now.format("%A, %b %d, %Y").to_string();

    let title_line = Line::from(vec![
        Span::styled("  smokefree  ", theme::leaf().add_modifier(Modifier::BOLD)),
        Span::styled(format!("{}, {}", greeting(now.hour()), name), theme::bold()),
    ]);

    let day_word = if days_quit == 1 { "day" } else { "days" };
    let counter_line = Line::from(vec![
        Span::styled(
            format!("{}", days_quit),
            theme::leaf().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {} smoke-free", day_word), theme::leaf()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(date_str, theme::dim()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::leaf().add_modifier(Modifier::BOLD))
        .style(theme::base());

    let paragraph = Paragraph::new(vec![title_line, Line::from(""), counter_line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
