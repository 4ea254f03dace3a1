//! In-memory song store split across logical submodules.

mod seed;
mod songs;

pub use seed::seed_songs;
pub use songs::SongStore;
