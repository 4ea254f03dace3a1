//! Binary entry point: load settings, start logging, build the playlist and
//! drive the Ratatui event loop until the user exits.
use playlist_rater::{init_logging, run_app, App, AppConfig, SongStore};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config)?;
    match &config.source {
        Some(path) => info!(path = %path.display(), "loaded configuration"),
        None => info!("no configuration file, using defaults"),
    }

    let store = if config.seed_library {
        SongStore::seeded()
    } else {
        SongStore::new()
    };
    info!(songs = store.len(), "starting playlist rater");

    let mut app = App::new(store, config.default_rating);
    run_app(&mut app)
}
