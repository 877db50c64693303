use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::models::Event;
use crate::models::event::{EventCategory, group_by_category};
use crate::tui::theme;
use crate::utils::format::format_event_date;

/// Upcoming events grouped by category, or just one category when `filter` is set.
pub fn render(frame: &mut Frame, area: Rect, events: &[Event], filter: Option<&EventCategory>) {
    let title = match filter {
        Some(c) => format!(" Upcoming Events · {} ", c.label),
        None => " Upcoming Events · All ".to_string(),
    };
    let block = Block::default()
        .title(Span::styled(title, theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::BORDER))
        .style(theme::panel());

    let shown: Vec<Event> = events
        .iter()
        .filter(|e| filter.is_none_or(|c| e.category == c.id))
        .cloned()
        .collect();

    if shown.is_empty() {
        let message = match filter {
            Some(c) => format!("No upcoming {} events", c.label),
            None => "No upcoming events".to_string(),
        };
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(message, theme::dim())),
        ])
        .block(block)
        .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let mut lines = Vec::new();
    for (label, group) in group_by_category(&shown) {
        lines.push(Line::from(Span::styled(
            format!(" {} ", label.to_uppercase()),
            theme::banner(),
        )));
        for event in group {
            lines.push(Line::from(Span::styled(
                event.title.as_str(),
                theme::bold(),
            )));
            let mut detail = vec![Span::styled(
                format!("  {} at {}", format_event_date(event.date), event.time),
                theme::label(),
            )];
            if let Some(location) = &event.location {
                detail.push(Span::styled(format!("  ·  {}", location), theme::dim()));
            }
            if let Some(speaker) = &event.speaker {
                detail.push(Span::styled(format!("  ·  Speaker: {}", speaker), theme::dim()));
            }
            lines.push(Line::from(detail));
            if let Some(description) = &event.description {
                lines.push(Line::from(Span::styled(
                    format!("  {}", description),
                    theme::dim().add_modifier(Modifier::ITALIC),
                )));
            }
        }
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
