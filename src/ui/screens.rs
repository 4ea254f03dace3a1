use crate::analytics::average_rating;
use crate::models::Song;
use crate::navigation::Screen;

use super::forms::SongForm;

/// Per-screen state. Rebuilt every time the navigation selector moves, so the
/// add form always starts blank and analytics always starts collapsed.
pub(crate) enum View {
    Main(MainScreen),
    AddSong(SongForm),
    Analytics(AnalyticsScreen),
}

impl View {
    pub(crate) fn screen(&self) -> Screen {
        match self {
            View::Main(_) => Screen::Main,
            View::AddSong(_) => Screen::AddSong,
            View::Analytics(_) => Screen::Analytics,
        }
    }
}

/// Selection state for the playlist screen.
#[derive(Default)]
pub(crate) struct MainScreen {
    pub(crate) selected: usize,
}

impl MainScreen {
    /// Restore a selection, pinned to the playlist length.
    pub(crate) fn with_selection(selected: usize, len: usize) -> Self {
        let mut screen = Self { selected };
        screen.ensure_in_bounds(len);
        screen
    }

    pub(crate) fn move_selection(&mut self, offset: isize, len: usize) {
        if len == 0 {
            return;
        }
        let len = len as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    pub(crate) fn ensure_in_bounds(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    pub(crate) fn current<'a>(&self, songs: &'a [Song]) -> Option<&'a Song> {
        songs.get(self.selected)
    }
}

/// Toggles and cached result for the analytics screen.
#[derive(Default)]
pub(crate) struct AnalyticsScreen {
    pub(crate) show_details: bool,
    /// Set once the user asks for it; stays until leaving the screen.
    pub(crate) average: Option<f32>,
    pub(crate) scroll: u16,
}

impl AnalyticsScreen {
    /// Flip the song details panel, returning the new visibility.
    pub(crate) fn toggle_details(&mut self) -> bool {
        self.show_details = !self.show_details;
        self.scroll = 0;
        self.show_details
    }

    /// Run the average over the current playlist and remember it for display.
    pub(crate) fn calculate(&mut self, songs: &[Song]) -> f32 {
        let average = average_rating(songs);
        self.average = Some(average);
        average
    }

    pub(crate) fn details_label(&self) -> &'static str {
        if self.show_details {
            "Hide Song Details"
        } else {
            "Show Song Details"
        }
    }

    pub(crate) fn scroll_by(&mut self, delta: i32, max_scroll: u16) {
        if !self.show_details {
            return;
        }
        let next = (self.scroll as i32 + delta).clamp(0, max_scroll as i32);
        self.scroll = next as u16;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed_songs;

    #[test]
    fn selection_is_clamped() {
        let mut screen = MainScreen::default();
        screen.move_selection(-3, 3);
        assert_eq!(screen.selected, 0);
        screen.move_selection(10, 3);
        assert_eq!(screen.selected, 2);
        screen.move_selection(1, 0);
        assert_eq!(screen.selected, 2);
        assert_eq!(MainScreen::with_selection(9, 4).selected, 3);
        assert_eq!(MainScreen::with_selection(9, 0).selected, 0);
    }

    #[test]
    fn current_song_follows_selection() {
        let songs = seed_songs();
        let mut screen = MainScreen::default();
        screen.select_last(songs.len());
        assert_eq!(screen.current(&songs).map(|s| s.title.as_str()), Some("Hotel California"));
        screen.select_first();
        assert_eq!(screen.current(&songs).map(|s| s.id), Some(1));
        assert!(screen.current(&[]).is_none());
    }

    #[test]
    fn average_is_hidden_until_calculated() {
        let mut analytics = AnalyticsScreen::default();
        assert!(analytics.average.is_none());
        analytics.calculate(&seed_songs());
        assert!(analytics.average.is_some());
    }

    #[test]
    fn details_toggle_flips_label() {
        let mut analytics = AnalyticsScreen::default();
        assert_eq!(analytics.details_label(), "Show Song Details");
        assert!(analytics.toggle_details());
        assert_eq!(analytics.details_label(), "Hide Song Details");
    }

    #[test]
    fn scrolling_requires_visible_details() {
        let mut analytics = AnalyticsScreen::default();
        analytics.scroll_by(2, 10);
        assert_eq!(analytics.scroll, 0);
        analytics.toggle_details();
        analytics.scroll_by(4, 3);
        assert_eq!(analytics.scroll, 3);
        analytics.scroll_by(-9, 3);
        assert_eq!(analytics.scroll, 0);
    }
}
