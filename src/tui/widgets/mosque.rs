use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::config::settings::MosqueConfig;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, mosque: &MosqueConfig) {
    let block = Block::default()
        .title(Span::styled(" Contact Us ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::BORDER))
        .style(theme::panel());

    let details = [
        ("Address", &mosque.address),
        ("Phone", &mosque.phone),
        ("Email", &mosque.email),
        ("Website", &mosque.website),
        ("Imam", &mosque.imam),
    ];

    let mut lines = vec![
        Line::from(Span::styled(
            mosque.name.as_str(),
            theme::gold().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (label, value) in details {
        if let Some(v) = value {
            lines.push(Line::from(vec![
                Span::styled(format!("{:>8}  ", label), theme::label()),
                Span::styled(v.as_str(), theme::bold()),
            ]));
        }
    }
    if lines.len() == 2 {
        lines.push(Line::from(Span::styled(
            "No contact details set. Use `iqama setup --address ... --phone ...`",
            theme::dim(),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
