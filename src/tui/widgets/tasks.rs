use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::models::{Task, TaskPriority};
use crate::tui::theme;
use crate::utils::dates::format_date;
use crate::utils::format::pad_display;

fn due_label(task: &Task, today: NaiveDate) -> String {
    match task.due_date {
        Some(d) if d == today => "today".to_string(),
        Some(d) => format_date(d),
        None => String::new(),
    }
}

/// Overdue tasks first (in red), then upcoming ones, clipped to the panel.
pub fn render(frame: &mut Frame, area: Rect, overdue: &[Task], upcoming: &[Task], today: NaiveDate) {
    let block = Block::default()
        .title(Span::styled(" Tasks ", theme::leaf()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let rows = area.height.saturating_sub(2) as usize;
    let mut lines = Vec::new();
    if overdue.is_empty() && upcoming.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No tasks! You're doing great",
            theme::dim(),
        )));
    }

    for task in overdue {
        lines.push(Line::from(vec![
            Span::styled("  ! ", theme::red()),
            Span::styled(pad_display(&task.title, 30), theme::red()),
            Span::styled(due_label(task, today), theme::red()),
        ]));
    }
    for task in upcoming {
        let mark = match task.priority {
            TaskPriority::High => Span::styled("  ● ", theme::amber()),
            _ => Span::styled("  ○ ", theme::dim()),
        };
        lines.push(Line::from(vec![
            mark,
            Span::styled(pad_display(&task.title, 30), theme::bold()),
            Span::styled(due_label(task, today), theme::dim()),
        ]));
    }
    lines.truncate(rows);

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
