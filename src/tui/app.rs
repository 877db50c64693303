use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use rusqlite::Connection;
use std::time::Duration;

use crate::cli::handlers::auto_sync;
use crate::config::AppConfig;
use crate::db::repository::{EventRepo, JumuahRepo, PrayerRepo};
use crate::models::event::{CATEGORIES, EventCategory};
use crate::models::{Event, JumuahSlot, PrayerRecord};
use crate::prayer_times::resolver::{Schedule, build_schedule};
use crate::tui::events::{Event as TuiEvent, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{events, header, jumuah, mosque, next_prayer, prayers, statusbar};
use crate::utils::format::{format_clock, format_long_date};
use crate::utils::hijri::hijri_string;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Prayers,
    Jumuah,
    Events,
    Mosque,
}

impl View {
    fn next(self) -> Self {
        match self {
            View::Prayers => View::Jumuah,
            View::Jumuah => View::Events,
            View::Events => View::Mosque,
            View::Mosque => View::Prayers,
        }
    }
}

pub struct App {
    pub view: View,
    pub config: AppConfig,
    pub show_help: bool,
    pub should_quit: bool,

    // Refreshed on tick/reload
    pub now: NaiveDateTime,
    pub hijri_str: String,
    pub record: Option<PrayerRecord>,
    pub jumuah: Vec<JumuahSlot>,
    pub events: Vec<Event>,
    /// Index into `CATEGORIES`; `None` shows every category.
    pub event_filter: Option<usize>,
    pub schedule: Schedule,
    pub load_error: Option<String>,
}

impl App {
    pub fn new(config: AppConfig, now: NaiveDateTime) -> Self {
        let hijri_str = hijri_string(now.date(), config.location.hijri_offset);
        App {
            view: View::Prayers,
            config,
            show_help: false,
            should_quit: false,
            now,
            hijri_str,
            record: None,
            jumuah: Vec::new(),
            events: Vec::new(),
            event_filter: None,
            schedule: build_schedule(None, now),
            load_error: None,
        }
    }

    /// Re-reads the store and recomputes everything for `now`.
    pub fn load(&mut self, conn: &Connection, now: NaiveDateTime) -> Result<()> {
        if now.date() != self.now.date() {
            auto_sync(conn, &self.config, now.date());
            self.hijri_str = hijri_string(now.date(), self.config.location.hijri_offset);
        }
        self.now = now;
        self.record = PrayerRepo::get_effective(conn, now.date())?;
        self.jumuah = JumuahRepo::list(conn)?;
        self.events = EventRepo::upcoming(conn, now.date(), None)?;
        self.recompute();
        Ok(())
    }

    pub fn event_category(&self) -> Option<&'static EventCategory> {
        self.event_filter.and_then(|i| CATEGORIES.get(i))
    }

    fn cycle_event_filter(&mut self) {
        self.event_filter = match self.event_filter {
            None => Some(0),
            Some(i) if i + 1 < CATEGORIES.len() => Some(i + 1),
            Some(_) => None,
        };
    }

    fn recompute(&mut self) {
        self.schedule = build_schedule(self.record.as_ref(), self.now);
    }

    /// Periodic refresh. Failures keep the last good data on screen.
    pub fn tick(&mut self, conn: &Connection, now: NaiveDateTime) {
        match self.load(conn, now) {
            Ok(()) => self.load_error = None,
            Err(e) => {
                log::warn!("refresh failed: {:#}", e);
                self.load_error = Some(format!("Refresh failed: {}", e));
                self.now = now;
                self.recompute();
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, conn: &Connection) {
        // Some terminals also send release/repeat events
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab => self.view = self.view.next(),
            KeyCode::Char('1') => self.view = View::Prayers,
            KeyCode::Char('2') => self.view = View::Jumuah,
            KeyCode::Char('3') => self.view = View::Events,
            KeyCode::Char('4') => self.view = View::Mosque,
            KeyCode::Char('c') if self.view == View::Events => self.cycle_event_filter(),
            KeyCode::Char('r') => self.tick(conn, Local::now().naive_local()),
            _ => {}
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let banner_height = if self.view == View::Prayers && self.schedule.next.is_some() {
            3
        } else {
            0
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),             // header
                Constraint::Min(0),                // body
                Constraint::Length(banner_height), // next prayer
                Constraint::Length(1),             // status bar
            ])
            .split(area);

        let date_line = if self.hijri_str.is_empty() {
            format_long_date(self.now)
        } else {
            format!("{} | {}", format_long_date(self.now), self.hijri_str)
        };
        header::render(
            frame,
            chunks[0],
            &self.config.mosque.name,
            &date_line,
            &format_clock(self.now),
        );

        match self.view {
            View::Prayers => {
                prayers::render(frame, chunks[1], &self.schedule.prayers);
                next_prayer::render(frame, chunks[2], self.schedule.next.as_ref());
            }
            View::Jumuah => jumuah::render(frame, chunks[1], &self.jumuah),
            View::Events => events::render(frame, chunks[1], &self.events, self.event_category()),
            View::Mosque => mosque::render(frame, chunks[1], &self.config.mosque),
        }

        statusbar::render(frame, chunks[3], self.load_error.as_deref());

        if self.show_help {
            self.draw_help_overlay(frame);
        }
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();

        let width = (area.width / 2).max(44).min(area.width);
        let height = (area.height / 2).max(10).min(area.height);
        let popup_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
        .intersection(area);

        frame.render_widget(Clear, popup_area);

        let rows = [
            ("[Tab]   ", "Next view"),
            ("[1]-[4] ", "Prayers / Jumu'ah / Events / Contact"),
            ("[c]     ", "Cycle event category"),
            ("[r]     ", "Reload from the database"),
            ("[?]     ", "Toggle help"),
            ("[Esc] [q]", " Quit"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::gold().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        help_text.extend(rows.iter().map(|(key, label)| {
            Line::from(vec![
                Span::styled(format!("  {}  ", key), theme::gold()),
                Span::styled(*label, theme::label()),
            ])
        }));

        let block = Block::default()
            .title(Span::styled(" Help ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::gold())
            .style(theme::panel());

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, popup_area);
    }
}

/// Run the TUI event loop.
pub fn run(conn: Connection, config: AppConfig) -> Result<()> {
    let tick_rate = Duration::from_secs(config.display.refresh_secs.max(1));
    let mut app = App::new(config, Local::now().naive_local());
    app.load(&conn, Local::now().naive_local())?;

    let mut terminal = ratatui::init();
    let events = EventHandler::new(tick_rate);

    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|frame| app.draw(frame))?;

            match events.next()? {
                TuiEvent::Key(key) => {
                    app.handle_key(key, &conn);
                    if app.should_quit {
                        return Ok(());
                    }
                }
                TuiEvent::Resize => {}
                TuiEvent::Tick => app.tick(&conn, Local::now().naive_local()),
            }
        }
    })();

    ratatui::restore();
    result
}
