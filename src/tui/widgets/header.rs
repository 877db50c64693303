use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, mosque_name: &str, date_line: &str, clock: &str) {
    let title_line = Line::from(vec![
        Span::styled("  مسجد  ", theme::gold().add_modifier(Modifier::BOLD)),
        Span::styled(mosque_name, theme::bold()),
    ]);

    let date_line = Line::from(vec![
        Span::styled(date_line, theme::label()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(clock, theme::gold()),
    ]);

    let text = vec![title_line, Line::from(""), date_line];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::gold().add_modifier(Modifier::BOLD))
        .style(theme::panel());

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
