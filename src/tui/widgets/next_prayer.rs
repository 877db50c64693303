use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::prayer_times::resolver::NextPrayer;
use crate::tui::theme;

/// Nothing is drawn when there is no countdown.
pub fn render(frame: &mut Frame, area: Rect, next: Option<&NextPrayer>) {
    let Some(next) = next else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::gold())
        .style(theme::banner());

    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled("⚡ ", theme::banner()),
        Span::styled(next.banner(), theme::banner()),
    ]))
    .block(block)
    .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
