use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Install the global `tracing` subscriber. Output goes to the configured log
/// file because the terminal itself belongs to the TUI; with no log file the
/// subscriber is skipped entirely.
pub fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let env_filter = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(config, env_filter.as_deref())?;
    let file = open_log_file(path)?;

    tracing::subscriber::set_global_default(file_subscriber(filter, Mutex::new(file)))
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}

/// Pick the filter directives: `RUST_LOG` when set and non-empty, otherwise
/// the configured `log_filter`. Malformed directives are an error.
pub fn build_filter(config: &AppConfig, env_filter: Option<&str>) -> Result<EnvFilter> {
    let directives = env_filter
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(&config.log_filter);
    EnvFilter::try_new(directives).with_context(|| format!("invalid log filter {directives:?}"))
}

/// Plain-text formatter writing to `writer`. ANSI colours are off since the
/// output ends up in a file.
pub fn file_subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .finish()
}

/// Open `path` for appending, creating missing parent directories.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create log directory")?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}
