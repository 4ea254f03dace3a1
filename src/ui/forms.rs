use rand::Rng;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::{Rating, Song};

use super::helpers::rating_bar;

/// Highest id handed out to songs created through the form (inclusive).
pub(crate) const MAX_GENERATED_ID: u32 = 1000;

/// Form state for the "Add New Song" screen.
#[derive(Default, Clone, Debug)]
pub(crate) struct SongForm {
    pub(crate) title: String,
    pub(crate) artist: String,
    pub(crate) rating: Rating,
    pub(crate) comment: String,
    pub(crate) active: SongField,
}

/// Enumerates the fields within the song form to drive focus management.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum SongField {
    #[default]
    Title,
    Artist,
    Rating,
    Comment,
}

impl SongField {
    /// Label rendered in front of the field value.
    pub(crate) fn label(self) -> &'static str {
        match self {
            SongField::Title => "Song Title",
            SongField::Artist => "Artist Name",
            SongField::Rating => "Rating",
            SongField::Comment => "Comments",
        }
    }
}

impl SongForm {
    /// Blank form with the slider parked on `rating`.
    pub(crate) fn with_rating(rating: Rating) -> Self {
        Self {
            rating,
            ..Self::default()
        }
    }

    /// Cycle focus forward across the four fields.
    pub(crate) fn next_field(&mut self) {
        self.active = match self.active {
            SongField::Title => SongField::Artist,
            SongField::Artist => SongField::Rating,
            SongField::Rating => SongField::Comment,
            SongField::Comment => SongField::Title,
        };
    }

    /// Cycle focus backward across the four fields.
    pub(crate) fn previous_field(&mut self) {
        self.active = match self.active {
            SongField::Title => SongField::Comment,
            SongField::Artist => SongField::Title,
            SongField::Rating => SongField::Artist,
            SongField::Comment => SongField::Rating,
        };
    }

    /// Text buffer behind the active field, if it is a text field.
    fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.active {
            SongField::Title => Some(&mut self.title),
            SongField::Artist => Some(&mut self.artist),
            SongField::Comment => Some(&mut self.comment),
            SongField::Rating => None,
        }
    }

    /// Insert a character into the active field. On the rating field `+` and
    /// `-` nudge the slider instead.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        if self.active == SongField::Rating {
            return match ch {
                '+' | '=' => self.adjust_rating(true),
                '-' | '_' => self.adjust_rating(false),
                _ => false,
            };
        }
        match self.active_text_mut() {
            Some(text) => {
                text.push(ch);
                true
            }
            None => false,
        }
    }

    /// Remove the last character from the active text field.
    pub(crate) fn backspace(&mut self) {
        if let Some(text) = self.active_text_mut() {
            text.pop();
        }
    }

    /// Empty the active text field.
    pub(crate) fn clear_field(&mut self) {
        if let Some(text) = self.active_text_mut() {
            text.clear();
        }
    }

    /// Move the slider one half-star. Returns whether the value changed.
    pub(crate) fn adjust_rating(&mut self, up: bool) -> bool {
        let before = self.rating;
        self.rating = if up {
            before.step_up()
        } else {
            before.step_down()
        };
        self.rating != before
    }

    /// Submission needs both a title and an artist; whitespace does not count.
    pub(crate) fn can_submit(&self) -> bool {
        !self.title.trim().is_empty() && !self.artist.trim().is_empty()
    }

    /// Turn the form into a song with the given id, or `None` while submission
    /// is disabled. Text is kept exactly as typed.
    pub(crate) fn build_song(&self, id: u32) -> Option<Song> {
        if !self.can_submit() {
            return None;
        }
        Some(Song::new(
            id,
            self.title.clone(),
            self.artist.clone(),
            self.rating,
            vec![self.comment.clone()],
        ))
    }

    /// Like [`SongForm::build_song`] but draws the id from `rng`. Ids are not
    /// checked against the playlist, so repeats are possible.
    pub(crate) fn submit<R: Rng>(&self, rng: &mut R) -> Option<Song> {
        if !self.can_submit() {
            return None;
        }
        self.build_song(rng.gen_range(0..=MAX_GENERATED_ID))
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: SongField) -> Line<'static> {
        let is_active = self.active == field;
        let label_style = if is_active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let mut spans = vec![Span::styled(format!("{}: ", field.label()), label_style)];

        if field == SongField::Rating {
            spans.push(Span::styled(
                format!("{} ", self.rating),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                rating_bar(self.rating),
                Style::default().fg(Color::Cyan),
            ));
            if is_active {
                spans.push(Span::styled(
                    "  ←/→ to adjust",
                    Style::default().fg(Color::DarkGray),
                ));
            }
            return Line::from(spans);
        }

        let (value, placeholder) = match field {
            SongField::Title => (&self.title, "<required>"),
            SongField::Artist => (&self.artist, "<required>"),
            _ => (&self.comment, "<optional>"),
        };

        if value.is_empty() {
            spans.push(Span::styled(
                placeholder.to_string(),
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            let style = if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            spans.push(Span::styled(value.clone(), style));
        }

        Line::from(spans)
    }

    /// Cursor column offset for the active text field, or `None` for the slider.
    pub(crate) fn cursor_offset(&self) -> Option<u16> {
        let value = match self.active {
            SongField::Title => &self.title,
            SongField::Artist => &self.artist,
            SongField::Comment => &self.comment,
            SongField::Rating => return None,
        };
        let prefix = self.active.label().chars().count() + 2;
        Some(u16::try_from(prefix + value.chars().count()).unwrap_or(u16::MAX))
    }
}
