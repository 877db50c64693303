use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
};

use crate::prayer_times::resolver::DisplayPrayer;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, prayers: &[DisplayPrayer]) {
    let block = Block::default()
        .title(Span::styled(" Prayer Times ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(ratatui::style::Style::default().fg(theme::BORDER))
        .style(theme::panel());

    let mut items = vec![ListItem::new(Line::from(vec![
        Span::styled(format!("    {:<10}", ""), theme::label()),
        Span::styled(format!("{:>10}", "Adhan"), theme::label()),
        Span::styled(format!("{:>10}", "Iqama"), theme::label()),
    ]))];

    items.extend(prayers.iter().map(|p| {
        let (marker, name_style, time_style) = if p.is_next {
            ("▸ ", theme::next_row(), theme::next_row())
        } else {
            ("  ", theme::bold(), theme::label())
        };

        ListItem::new(Line::from(vec![
            Span::styled(format!("  {}", marker), theme::gold()),
            Span::styled(format!("{:<10}", p.prayer.display_name()), name_style),
            Span::styled(format!("{:>10}", p.adhan), time_style),
            Span::styled(format!("{:>10}", p.iqama), time_style),
        ]))
    }));

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
