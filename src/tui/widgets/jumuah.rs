use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::models::JumuahSlot;
use crate::models::jumuah::slot_title;
use crate::prayer_times::resolver::UNKNOWN_TIME;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, slots: &[JumuahSlot]) {
    let block = Block::default()
        .title(Span::styled(" Friday Prayer (Jumu'ah) ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(ratatui::style::Style::default().fg(theme::BORDER))
        .style(theme::panel());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if slots.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No Jumu'ah times set", theme::dim())),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(inner);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, slots.len() as u32); slots.len()])
        .split(rows[0]);

    for (i, (slot, card)) in slots.iter().zip(cards.iter()).enumerate() {
        let text = vec![
            Line::from(Span::styled(
                slot_title(i, slots.len()),
                theme::gold().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled("KHUTBAH", theme::label())),
            Line::from(Span::styled(slot.khutbah.as_str(), theme::bold())),
            Line::from(Span::styled("PRAYER", theme::label())),
            Line::from(Span::styled(
                slot.prayer.as_deref().unwrap_or(UNKNOWN_TIME),
                theme::gold(),
            )),
        ];
        let card_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::dim());
        frame.render_widget(
            Paragraph::new(text)
                .block(card_block)
                .alignment(Alignment::Center),
            *card,
        );
    }

    let note = Paragraph::new(Line::from(Span::styled(
        "Please arrive 10-15 minutes before Khutbah",
        theme::label().add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(note, rows[1]);
}
