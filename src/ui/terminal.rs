use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info, warn};

use super::app::App;

/// How long to wait for input before redrawing anyway.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Spin up the terminal backend, enter the draw loop, and keep processing input
/// until the user exits. The terminal is restored even when the loop fails.
pub fn run_app(app: &mut App) -> Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode().context("failed to enable raw mode")?;
    if let Err(err) = execute!(stdout, EnterAlternateScreen) {
        restore_after_setup_failure();
        return Err(err).context("failed to enter alternate screen");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(terminal) => terminal,
        Err(err) => {
            restore_after_setup_failure();
            return Err(err).context("failed to create terminal backend");
        }
    };
    info!("terminal ready");

    let result = event_loop(&mut terminal, app);
    let cleanup = cleanup_terminal(&mut terminal);
    info!("terminal restored");
    merge_outcomes(result, cleanup)
}

/// Combine the loop result with the cleanup result. A loop failure is the
/// error worth surfacing; a cleanup failure on top of it only gets logged.
fn merge_outcomes(result: Result<()>, cleanup: Result<()>) -> Result<()> {
    match (result, cleanup) {
        (Ok(()), cleanup) => cleanup,
        (Err(err), Ok(())) => {
            error!("event loop failed: {err:#}");
            Err(err)
        }
        (Err(err), Err(cleanup_err)) => {
            error!("event loop failed: {err:#}");
            error!("failed to restore terminal: {cleanup_err:#}");
            Err(err)
        }
    }
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal
            .draw(|frame| app.draw(frame))
            .context("failed to draw frame")?;

        if !event::poll(POLL_INTERVAL).context("event polling failed")? {
            continue;
        }
        let Event::Key(key_event) = event::read().context("failed to read event")? else {
            continue;
        };
        if key_event.kind != KeyEventKind::Press {
            continue;
        }

        if app.handle_key_event(key_event) {
            return Ok(());
        }
    }
}

/// Best-effort undo of raw mode and the alternate screen when setup fails
/// before a `Terminal` exists to clean up through.
fn restore_after_setup_failure() {
    if let Err(err) = disable_raw_mode() {
        warn!("failed to disable raw mode: {err}");
    }
    if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen) {
        warn!("failed to leave alternate screen: {err}");
    }
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal
        .show_cursor()
        .context("failed to restore cursor visibility")
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;

    #[test]
    fn loop_error_wins_over_cleanup_error() {
        let merged = merge_outcomes(Err(anyhow!("draw failed")), Err(anyhow!("raw mode stuck")));
        assert_eq!(merged.unwrap_err().to_string(), "draw failed");
    }

    #[test]
    fn cleanup_error_surfaces_after_clean_exit() {
        let merged = merge_outcomes(Ok(()), Err(anyhow!("raw mode stuck")));
        assert_eq!(merged.unwrap_err().to_string(), "raw mode stuck");
    }

    #[test]
    fn loop_error_kept_when_cleanup_succeeds() {
        let merged = merge_outcomes(Err(anyhow!("poll failed")), Ok(()));
        assert_eq!(merged.unwrap_err().to_string(), "poll failed");
        assert!(merge_outcomes(Ok(()), Ok(())).is_ok());
    }
}
