use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::{Rating, Song};

/// Five-slot star meter: full stars, an optional half star, then empty slots.
/// Partial halves round down, so only a true 5.0 fills every slot.
pub(crate) fn rating_bar(rating: Rating) -> String {
    let halves = (rating.value() * 2.0).floor() as usize;
    let full = halves / 2;
    let half = halves % 2;
    let empty = 5usize.saturating_sub(full + half);
    let mut bar = String::with_capacity(5 * 3);
    bar.push_str(&"★".repeat(full));
    if half == 1 {
        bar.push('½');
    }
    bar.push_str(&"☆".repeat(empty));
    bar
}

/// Footer hint line made of `[key] description` pairs.
pub(crate) fn key_hints(pairs: &[(&str, &str)]) -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::with_capacity(pairs.len() * 2);
    for (idx, (key, description)) in pairs.iter().enumerate() {
        spans.push(Span::styled(format!("[{key}]"), key_style));
        let separator = if idx + 1 == pairs.len() { "" } else { "   " };
        spans.push(Span::raw(format!(" {description}{separator}")));
    }
    Line::from(spans)
}

/// Render a button label, dimmed when the action is unavailable.
pub(crate) fn button(label: &str, key: &str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    };
    Span::styled(format!(" {label} ({key}) "), style)
}

/// Lines shown for a song card. `detailed` adds the comment list used on the
/// analytics screen.
pub(crate) fn song_card_lines(song: &Song, selected: bool, detailed: bool) -> Vec<Line<'static>> {
    let title = if selected {
        format!("▶ {}", song.title)
    } else {
        song.title.clone()
    };
    let mut title_style = Style::default().add_modifier(Modifier::BOLD);
    if detailed {
        title_style = title_style.fg(Color::Cyan);
    }

    let mut lines = vec![
        Line::from(Span::styled(title, title_style)),
        Line::from(format!("Artist: {}", song.artist)),
        Line::from(vec![
            Span::raw(format!("Rating: {}  ", song.rating)),
            Span::styled(rating_bar(song.rating), Style::default().fg(Color::Yellow)),
        ]),
    ];

    if detailed {
        lines.push(Line::from(Span::styled(
            "Comments:",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for comment in &song.comments {
            lines.push(Line::from(format!("  • {comment}")));
        }
    }

    lines
}

/// Detail cards for every song, separated by blank lines, as one scrollable
/// block of text.
pub(crate) fn detail_lines(songs: &[Song]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (idx, song) in songs.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::from(""));
        }
        lines.extend(song_card_lines(song, false, true));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn rating_bar_fills_whole_and_half_stars() {
        assert_eq!(rating_bar(Rating::clamped(5.0)), "★★★★★");
        assert_eq!(rating_bar(Rating::clamped(3.5)), "★★★½☆");
        assert_eq!(rating_bar(Rating::clamped(1.0)), "★☆☆☆☆");
    }

    #[test]
    fn rating_bar_rounds_partial_halves_down() {
        assert_eq!(rating_bar(Rating::seeded(4.8).unwrap()), "★★★★½");
        assert_eq!(rating_bar(Rating::seeded(4.6).unwrap()), "★★★★½");
        assert_eq!(rating_bar(Rating::seeded(1.4).unwrap()), "★☆☆☆☆");
    }

    #[test]
    fn key_hints_separates_pairs() {
        let line = key_hints(&[("a", "Add"), ("q", "Exit")]);
        assert_eq!(text(&line), "[a] Add   [q] Exit");
    }

    #[test]
    fn detailed_card_lists_comments() {
        let song = Song::new(
            1,
            "Imagine",
            "John Lennon",
            Rating::clamped(4.5),
            vec!["Timeless classic".to_string()],
        );
        let lines = song_card_lines(&song, false, true);
        let rendered: Vec<String> = lines.iter().map(text).collect();
        assert_eq!(rendered[0], "Imagine");
        assert_eq!(rendered[1], "Artist: John Lennon");
        assert!(rendered[2].starts_with("Rating: 4.5"));
        assert_eq!(rendered[3], "Comments:");
        assert_eq!(rendered[4], "  • Timeless classic");
        assert_eq!(song_card_lines(&song, false, false).len(), 3);
    }

    #[test]
    fn detail_lines_separate_songs() {
        let songs = crate::store::seed_songs();
        let lines = detail_lines(&songs);
        // Six lines for the two-comment song, five for the others, plus gaps.
        assert_eq!(lines.len(), 6 + 5 + 5 + 2);
        assert!(detail_lines(&[]).is_empty());
    }
}
