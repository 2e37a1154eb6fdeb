use ratatui::style::{Color, Modifier, Style};

pub const BG: Color = Color::Rgb(14, 18, 16);
pub const SURFACE: Color = Color::Rgb(21, 28, 24);
pub const BORDER: Color = Color::Rgb(44, 60, 50);
pub const TEXT: Color = Color::Rgb(214, 228, 218);
pub const TEXT_DIM: Color = Color::Rgb(110, 132, 118);
pub const LEAF: Color = Color::Rgb(118, 196, 128);
pub const GREEN: Color = Color::Rgb(80, 160, 96);
pub const AMBER: Color = Color::Rgb(214, 168, 72);
pub const RED: Color = Color::Rgb(196, 90, 74);
pub const SKY: Color = Color::Rgb(110, 170, 210);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn leaf() -> Style {
    Style::default().fg(LEAF)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn sky() -> Style {
    Style::default().fg(SKY)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border() -> Style {
    Style::default().fg(BORDER)
}
