use tracing::{debug, info};

use crate::models::Song;

use super::seed::seed_songs;

/// Ordered, append-only playlist held for the lifetime of the process.
///
/// There is no removal or edit path: songs only ever join the end
/// of the list, and nothing checks whether an id is already taken.
#[derive(Debug, Default, Clone)]
pub struct SongStore {
    songs: Vec<Song>,
}

impl SongStore {
    /// Start with an empty playlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the built-in starter songs.
    pub fn seeded() -> Self {
        let songs = seed_songs();
        debug!(count = songs.len(), "seeded song store");
        Self { songs }
    }

    /// Current contents in insertion order.
    pub fn list(&self) -> &[Song] {
        &self.songs
    }

    /// Add a song to the end of the playlist. Always succeeds.
    pub fn append(&mut self, song: Song) {
        info!(id = song.id, title = %song.title, "appended song");
        self.songs.push(song);
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}
