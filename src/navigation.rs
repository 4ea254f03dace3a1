//! Three-state screen selector. Only four edges exist between the states; any
//! other action is simply not a transition.

use std::fmt;

/// Which screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Main,
    AddSong,
    Analytics,
}

/// User intents that may move the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// "Add to Playlist" on the main screen.
    Add,
    /// "Cancel" on the add form.
    Cancel,
    /// "Add Song" on the add form once the form is valid.
    Submit,
    /// "Second Screen" on the main screen.
    OpenAnalytics,
    /// "Back to Main Screen" on the analytics screen.
    Back,
}

impl Screen {
    /// Follow `action` from the current screen, or `None` when that action
    /// does not apply here.
    pub fn next(self, action: Action) -> Option<Screen> {
        match (self, action) {
            (Screen::Main, Action::Add) => Some(Screen::AddSong),
            (Screen::AddSong, Action::Cancel | Action::Submit) => Some(Screen::Main),
            (Screen::Main, Action::OpenAnalytics) => Some(Screen::Analytics),
            (Screen::Analytics, Action::Back) => Some(Screen::Main),
            _ => None,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Main => "Playlist",
            Screen::AddSong => "Add New Song",
            Screen::Analytics => "Playlist Analytics",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_SCREENS: [Screen; 3] = [Screen::Main, Screen::AddSong, Screen::Analytics];
    const ALL_ACTIONS: [Action; 5] = [
        Action::Add,
        Action::Cancel,
        Action::Submit,
        Action::OpenAnalytics,
        Action::Back,
    ];

    #[test]
    fn starts_on_main() {
        assert_eq!(Screen::default(), Screen::Main);
    }

    #[test]
    fn add_flow_round_trips_through_main() {
        assert_eq!(Screen::Main.next(Action::Add), Some(Screen::AddSong));
        assert_eq!(Screen::AddSong.next(Action::Cancel), Some(Screen::Main));
        assert_eq!(Screen::AddSong.next(Action::Submit), Some(Screen::Main));
    }

    #[test]
    fn analytics_returns_with_back() {
        assert_eq!(Screen::Main.next(Action::OpenAnalytics), Some(Screen::Analytics));
        assert_eq!(Screen::Analytics.next(Action::Back), Some(Screen::Main));
    }

    #[test]
    fn only_four_edges_exist() {
        let edges = ALL_SCREENS
            .iter()
            .flat_map(|&screen| ALL_ACTIONS.iter().map(move |&action| (screen, action)))
            .filter(|&(screen, action)| screen.next(action).is_some())
            .count();
        // Cancel and Submit share the AddSong -> Main edge.
        assert_eq!(edges, 5);
        assert_eq!(Screen::AddSong.next(Action::OpenAnalytics), None);
        assert_eq!(Screen::Analytics.next(Action::Add), None);
        assert_eq!(Screen::Main.next(Action::Back), None);
    }
}
