//! Playlist statistics shown on the analytics screen.

use tracing::debug;

use crate::models::Song;

/// Arithmetic mean of every song's rating, or `0.0` for an empty playlist.
pub fn average_rating(songs: &[Song]) -> f32 {
    if songs.is_empty() {
        return 0.0;
    }
    let total: f32 = songs.iter().map(|song| song.rating.value()).sum();
    let average = total / songs.len() as f32;
    debug!(count = songs.len(), average, "computed average rating");
    average
}

/// One decimal place, the precision the analytics screen displays.
pub fn format_average(average: f32) -> String {
    format!("{average:.1}")
}
