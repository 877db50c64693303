use ratatui::style::{Color, Modifier, Style};

pub const NAVY: Color = Color::Rgb(30, 58, 138);
pub const NAVY_DEEP: Color = Color::Rgb(17, 33, 82);
pub const ROW: Color = Color::Rgb(37, 68, 158);
pub const BORDER: Color = Color::Rgb(59, 92, 180);
pub const TEXT: Color = Color::Rgb(255, 255, 255);
pub const SKY: Color = Color::Rgb(147, 197, 253);
pub const SKY_DIM: Color = Color::Rgb(96, 165, 250);
pub const GOLD: Color = Color::Rgb(251, 191, 36);
pub const AMBER_SOFT: Color = Color::Rgb(254, 243, 199);
pub const AMBER_TEXT: Color = Color::Rgb(146, 64, 14);
pub const RED: Color = Color::Rgb(248, 113, 113);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(NAVY_DEEP)
}

pub fn panel() -> Style {
    Style::default().fg(TEXT).bg(NAVY)
}

pub fn label() -> Style {
    Style::default().fg(SKY)
}

pub fn dim() -> Style {
    Style::default().fg(SKY_DIM)
}

pub fn gold() -> Style {
    Style::default().fg(GOLD)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn next_row() -> Style {
    Style::default().fg(GOLD).bg(ROW).add_modifier(Modifier::BOLD)
}

pub fn banner() -> Style {
    Style::default()
        .fg(AMBER_TEXT)
        .bg(AMBER_SOFT)
        .add_modifier(Modifier::BOLD)
}

pub fn error() -> Style {
    Style::default().fg(RED)
}
