//! Core library surface for the Playlist Rater TUI application.
//!
//! The `bin` target only wires configuration and logging together; everything
//! it drives lives behind these modules so tests can exercise it directly.
pub mod analytics;
pub mod config;
pub mod logging;
pub mod models;
pub mod navigation;
pub mod store;
pub mod ui;

/// Statistics over the playlist.
pub use analytics::{average_rating, format_average};

/// Start-up settings and the logging bootstrap.
pub use config::{AppConfig, ConfigError};
pub use logging::init_logging;

/// The domain types other layers manipulate.
pub use models::{Rating, RatingError, Song};
pub use navigation::{Action, Screen};
pub use store::SongStore;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
