//! Optional user configuration read from `~/.playlist-rater/config.toml`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{Rating, RatingError};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".playlist-rater";
/// Configuration file name inside the data directory.
const CONFIG_FILE_NAME: &str = "config.toml";
/// Log file name inside the data directory.
const LOG_FILE_NAME: &str = "playlist-rater.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid default_rating")]
    InvalidRating(#[from] RatingError),
}

/// Raw file contents; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    seed_library: Option<bool>,
    default_rating: Option<f32>,
    log_filter: Option<String>,
    log_file: Option<PathBuf>,
}

/// Settings resolved at start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Start with the built-in songs instead of an empty playlist.
    pub seed_library: bool,
    /// Initial slider position on the add form.
    pub default_rating: Rating,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Where log lines go. `None` disables file logging.
    pub log_file: Option<PathBuf>,
    /// The file the values came from, if one existed.
    pub source: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed_library: true,
            default_rating: Rating::DEFAULT,
            log_filter: String::from("info"),
            log_file: None,
            source: None,
        }
    }
}

impl AppConfig {
    /// Resolve the data directory and load the config file inside it, falling
    /// back to defaults when there is no file.
    pub fn load() -> Result<Self> {
        Self::load_in(&data_dir()?)
    }

    /// Load `config.toml` from `data_dir`, defaulting the log file to
    /// `playlist-rater.log` in the same directory.
    pub fn load_in(data_dir: &Path) -> Result<Self> {
        let mut config = Self::load_from(&data_dir.join(CONFIG_FILE_NAME))
            .context("failed to load configuration")?;
        if config.log_file.is_none() {
            config.log_file = Some(data_dir.join(LOG_FILE_NAME));
        }
        Ok(config)
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let mut config = Self::parse(&contents).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Interpret TOML text on top of the defaults.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        let defaults = Self::default();
        let default_rating = match raw.default_rating {
            Some(value) => Rating::new(value)?,
            None => defaults.default_rating,
        };
        Ok(Self {
            seed_library: raw.seed_library.unwrap_or(defaults.seed_library),
            default_rating,
            log_filter: raw.log_filter.unwrap_or(defaults.log_filter),
            log_file: raw.log_file,
            source: None,
        })
    }
}

/// Absolute path to the application data directory inside the user's home.
fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.seed_library);
        assert_eq!(config.default_rating, Rating::DEFAULT);
    }

    #[test]
    fn data_dir_supplies_default_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_in(dir.path()).unwrap();
        assert_eq!(config.log_file, Some(dir.path().join("playlist-rater.log")));
        assert!(config.source.is_none());
    }

    #[test]
    fn data_dir_config_keeps_explicit_log_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "log_file = \"/var/tmp/custom.log\"\n",
        )
        .unwrap();
        let config = AppConfig::load_in(dir.path()).unwrap();
        assert_eq!(config.log_file, Some(PathBuf::from("/var/tmp/custom.log")));
        assert_eq!(config.source, Some(dir.path().join("config.toml")));
    }

    #[test]
    fn data_dir_with_bad_config_fails_with_context() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "default_rating = 9.0\n").unwrap();
        let err = AppConfig::load_in(dir.path()).unwrap_err();
        assert_eq!(err.to_string(), "failed to load configuration");
    }

    #[test]
    fn reads_values_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "seed_library = false\ndefault_rating = 4.5\nlog_filter = \"debug\"\nlog_file = \"/tmp/rater.log\""
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert!(!config.seed_library);
        assert_eq!(config.default_rating.value(), 4.5);
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/rater.log")));
        assert_eq!(config.source.as_deref(), Some(file.path()));
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config = AppConfig::parse("seed_library = false").unwrap();
        assert!(!config.seed_library);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.default_rating, Rating::DEFAULT);
    }

    #[test]
    fn rejects_invalid_rating() {
        let err = AppConfig::parse("default_rating = 7.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidRating(RatingError::OutOfRange(_))
        ));
        let err = AppConfig::parse("default_rating = 3.2").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRating(RatingError::OffGrid(_))));
    }

    #[test]
    fn malformed_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed_library = ").unwrap();
        match AppConfig::load_from(file.path()) {
            Err(ConfigError::Parse { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            AppConfig::parse("colour = \"blue\""),
            Err(ConfigError::Parse { .. })
        ));
    }
}
