//! Ratatui front-end: one controller (`App`) owning the playlist and the
//! active screen, plus the terminal loop that feeds it key presses.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
