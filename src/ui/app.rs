use std::cmp::min;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{debug, info};

use crate::analytics::format_average;
use crate::models::{Rating, Song};
use crate::navigation::{Action, Screen};
use crate::store::SongStore;

use super::forms::{SongField, SongForm};
use super::helpers::{button, detail_lines, key_hints, song_card_lines};
use super::screens::{AnalyticsScreen, MainScreen, View};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Height allocation per song card on the playlist screen.
const SONG_CARD_HEIGHT: u16 = 5;
/// Rows moved by PageUp/PageDown.
const PAGE_STEP: isize = 5;

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    store: SongStore,
    view: View,
    /// Playlist selection to restore when coming back to the main screen.
    last_selected: usize,
    default_rating: Rating,
    status: Option<StatusMessage>,
    rng: StdRng,
}

impl App {
    pub fn new(store: SongStore, default_rating: Rating) -> Self {
        Self::with_rng(store, default_rating, StdRng::from_entropy())
    }

    /// Build with an explicit id generator, so song ids are reproducible.
    pub fn with_rng(store: SongStore, default_rating: Rating, rng: StdRng) -> Self {
        Self {
            store,
            view: View::Main(MainScreen::default()),
            last_selected: 0,
            default_rating,
            status: None,
            rng,
        }
    }

    /// Playlist contents in insertion order.
    pub fn songs(&self) -> &[Song] {
        self.store.list()
    }

    /// Screen currently shown.
    pub fn screen(&self) -> Screen {
        self.view.screen()
    }

    /// Process one key press. Returns `true` once the user chose to exit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match self.view.screen() {
            Screen::Main => self.handle_main_key(code),
            Screen::AddSong => {
                self.handle_add_song_key(code);
                false
            }
            Screen::Analytics => {
                self.handle_analytics_key(code);
                false
            }
        }
    }

    /// Process a full key event. Control chords never reach the per-screen
    /// handlers: Ctrl-U clears the focused form field and the rest are ignored.
    pub fn handle_key_event(&mut self, event: KeyEvent) -> bool {
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('u') | KeyCode::Char('U') = event.code {
                self.handle_ctrl_u();
            } else {
                debug!(code = ?event.code, "ignored control chord");
            }
            return false;
        }
        self.handle_key(event.code)
    }

    /// Ctrl-U wipes the focused text field on the add form.
    fn handle_ctrl_u(&mut self) {
        if let View::AddSong(form) = &mut self.view {
            form.clear_field();
        }
    }

    /// Move the navigation selector and rebuild the per-screen state. Actions
    /// that are not an edge from the current screen leave everything as is.
    fn navigate(&mut self, action: Action) -> bool {
        let current = self.view.screen();
        let Some(next) = current.next(action) else {
            debug!(screen = %current, ?action, "ignored navigation action");
            return false;
        };
        if let View::Main(main) = &self.view {
            self.last_selected = main.selected;
        }
        debug!(from = %current, to = %next, ?action, "screen transition");
        self.view = match next {
            Screen::Main => View::Main(MainScreen::with_selection(
                self.last_selected,
                self.store.len(),
            )),
            Screen::AddSong => View::AddSong(SongForm::with_rating(self.default_rating)),
            Screen::Analytics => View::Analytics(AnalyticsScreen::default()),
        };
        true
    }

    fn handle_main_key(&mut self, code: KeyCode) -> bool {
        let len = self.store.len();
        let mut status_to_set: Option<(String, StatusKind)> = None;
        let mut action: Option<Action> = None;

        if let View::Main(main) = &mut self.view {
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    info!("exit requested");
                    return true;
                }
                KeyCode::Up => main.move_selection(-1, len),
                KeyCode::Down => main.move_selection(1, len),
                KeyCode::PageUp => main.move_selection(-PAGE_STEP, len),
                KeyCode::PageDown => main.move_selection(PAGE_STEP, len),
                KeyCode::Home => main.select_first(),
                KeyCode::End => main.select_last(len),
                KeyCode::Enter => {
                    status_to_set = Some(match main.current(self.store.list()) {
                        Some(song) => (
                            format!("Selected {} (id {}).", song.display_title(), song.id),
                            StatusKind::Info,
                        ),
                        None => ("No song selected.".to_string(), StatusKind::Error),
                    });
                }
                KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('+') => {
                    action = Some(Action::Add);
                }
                KeyCode::Char('s') | KeyCode::Char('S') => {
                    action = Some(Action::OpenAnalytics);
                }
                _ => {}
            }
        }

        if let Some(action) = action {
            self.clear_status();
            self.navigate(action);
        } else if let Some((text, kind)) = status_to_set {
            self.set_status(text, kind);
        }
        false
    }

    fn handle_add_song_key(&mut self, code: KeyCode) {
        let View::AddSong(form) = &mut self.view else {
            return;
        };

        match code {
            KeyCode::Esc => {
                self.navigate(Action::Cancel);
                self.set_status("Song creation cancelled.", StatusKind::Info);
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Left if form.active == SongField::Rating => {
                form.adjust_rating(false);
            }
            KeyCode::Right if form.active == SongField::Rating => {
                form.adjust_rating(true);
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                // Disabled submit: nothing happens and nothing is reported.
                if let Some(song) = form.submit(&mut self.rng) {
                    let message = format!("Added {}.", song.display_title());
                    self.store.append(song);
                    self.last_selected = self.store.len().saturating_sub(1);
                    self.navigate(Action::Submit);
                    self.set_status(message, StatusKind::Info);
                }
            }
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }
    }

    fn handle_analytics_key(&mut self, code: KeyCode) {
        let max_scroll = detail_lines(self.store.list()).len().saturating_sub(1) as u16;
        let View::Analytics(analytics) = &mut self.view else {
            return;
        };

        match code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => {
                self.clear_status();
                self.navigate(Action::Back);
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                analytics.toggle_details();
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                let average = analytics.calculate(self.store.list());
                debug!(average, "average rating requested");
            }
            KeyCode::Up => analytics.scroll_by(-1, max_scroll),
            KeyCode::Down => analytics.scroll_by(1, max_scroll),
            KeyCode::PageUp => analytics.scroll_by(-(PAGE_STEP as i32), max_scroll),
            KeyCode::PageDown => analytics.scroll_by(PAGE_STEP as i32, max_scroll),
            _ => {}
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.view {
            View::Main(main) => self.draw_main(frame, content_area, main),
            View::AddSong(form) => self.draw_add_song(frame, content_area, form),
            View::Analytics(analytics) => self.draw_analytics(frame, content_area, analytics),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }
    }

    fn draw_main(&self, frame: &mut Frame, area: Rect, main: &MainScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let buttons = Paragraph::new(Line::from(vec![
            button("Add to Playlist", "a", true),
            Span::raw("   "),
            button("Second Screen", "s", true),
            Span::raw("   "),
            button("Exit", "q", true),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} • {} songs", Screen::Main, self.store.len())),
        );
        frame.render_widget(buttons, chunks[0]);

        if self.store.is_empty() {
            let message = Paragraph::new("No songs yet. Press 'a' to add one.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(message, chunks[1]);
            return;
        }

        self.render_song_cards(frame, chunks[1], self.store.list(), main.selected);
    }

    fn render_song_cards(&self, frame: &mut Frame, area: Rect, songs: &[Song], selected: usize) {
        if songs.is_empty() || area.height == 0 {
            return;
        }

        let card_height = SONG_CARD_HEIGHT as usize;
        let capacity = ((area.height as usize) / card_height).max(1);
        let len = songs.len();
        let mut start = if selected >= capacity {
            selected + 1 - capacity
        } else {
            0
        };
        if start + capacity > len {
            start = len.saturating_sub(capacity);
        }
        let end = min(start + capacity, len);
        let visible_len = end.saturating_sub(start);
        if visible_len == 0 {
            return;
        }

        let constraints: Vec<Constraint> = (0..visible_len)
            .map(|_| Constraint::Length(SONG_CARD_HEIGHT))
            .collect();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (idx, chunk) in rows.iter().enumerate() {
            if chunk.height == 0 {
                continue;
            }
            let song_index = start + idx;
            let Some(song) = songs.get(song_index) else {
                break;
            };

            let is_selected = song_index == selected;
            let mut block = Block::default().borders(Borders::ALL);
            if is_selected {
                block = block.style(Style::default().fg(Color::Yellow));
            }

            let paragraph = Paragraph::new(song_card_lines(song, is_selected, false))
                .block(block)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Left);
            frame.render_widget(paragraph, *chunk);
        }
    }

    fn draw_add_song(&self, frame: &mut Frame, area: Rect, form: &SongForm) {
        let block = Block::default()
            .title(Screen::AddSong.to_string())
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let fields = [
            SongField::Title,
            SongField::Artist,
            SongField::Rating,
            SongField::Comment,
        ];
        let mut lines: Vec<Line> = fields.iter().map(|&f| form.build_line(f)).collect();
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            button("Cancel", "Esc", true),
            Span::raw("   "),
            button("Add Song", "Enter", form.can_submit()),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Tab to switch • ←/→ adjust rating • Ctrl-U clears field",
            Style::default().fg(Color::Gray),
        )));

        frame.render_widget(Paragraph::new(lines), inner);

        if let Some(offset) = form.cursor_offset() {
            let row = fields
                .iter()
                .position(|&f| f == form.active)
                .unwrap_or_default() as u16;
            let cursor_x = inner
                .x
                .saturating_add(offset)
                .min(inner.right().saturating_sub(1));
            frame.set_cursor_position((cursor_x, inner.y.saturating_add(row)));
        }
    }

    fn draw_analytics(&self, frame: &mut Frame, area: Rect, analytics: &AnalyticsScreen) {
        let block = Block::default()
            .title(Screen::Analytics.to_string())
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let actions = Paragraph::new(Line::from(vec![
            button(analytics.details_label(), "d", true),
            Span::raw("   "),
            button("Calculate Average Rating", "c", true),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(actions, chunks[0]);

        let average_line = match analytics.average {
            Some(average) => Line::from(Span::styled(
                format!("Average Rating: {}", format_average(average)),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            None => Line::from(Span::styled(
                "Press 'c' to calculate the average rating.",
                Style::default().fg(Color::DarkGray),
            )),
        };
        frame.render_widget(
            Paragraph::new(average_line).alignment(Alignment::Center),
            chunks[2],
        );

        if analytics.show_details {
            let content = if self.store.is_empty() {
                vec![Line::from("No songs in the playlist.")]
            } else {
                detail_lines(self.store.list())
            };
            let details = Paragraph::new(content)
                .block(Block::default().borders(Borders::TOP).title("Song Details"))
                .wrap(Wrap { trim: false })
                .scroll((analytics.scroll, 0));
            frame.render_widget(details, chunks[4]);
        }

        let back = Paragraph::new(Line::from(button("Back to Main Screen", "b", true)))
            .alignment(Alignment::Center);
        frame.render_widget(back, chunks[5]);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        match &self.view {
            View::Main(_) => key_hints(&[
                ("↑↓", "Select"),
                ("Enter", "Details"),
                ("a", "Add"),
                ("s", "Analytics"),
                ("q", "Exit"),
            ]),
            View::AddSong(form) if form.active == SongField::Rating => key_hints(&[
                ("←→", "Rating"),
                ("Tab", "Next Field"),
                ("Enter", "Add Song"),
                ("Esc", "Cancel"),
            ]),
            View::AddSong(_) => key_hints(&[
                ("Tab", "Next Field"),
                ("Enter", "Add Song"),
                ("Esc", "Cancel"),
            ]),
            View::Analytics(_) => key_hints(&[
                ("d", "Details"),
                ("c", "Average"),
                ("↑↓", "Scroll"),
                ("b", "Back"),
            ]),
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
