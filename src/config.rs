use crate::consts;
use log::LevelFilter;
use serde::Deserialize;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub(crate) struct Config {
    /// Milliseconds between movements of the snake
    tick_ms: NonZeroU64,

    /// Directory containing the sprite sheets
    pub(crate) sprites_dir: PathBuf,

    /// File to write logs to.  If not set, the default log file path is used.
    log_file: Option<PathBuf>,

    pub(crate) log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Config {
        let tick_ms = u64::try_from(consts::TICK_PERIOD.as_millis())
            .ok()
            .and_then(NonZeroU64::new)
            .unwrap_or(NonZeroU64::MIN);
        Config {
            tick_ms,
            sprites_dir: PathBuf::from(consts::SPRITES_DIR),
            log_file: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("tilesnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    pub(crate) fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms.get())
    }

    /// Return the file to log to: the file given in the configuration or, if
    /// that is not set, `tilesnake.log` in the local data directory.  Returns
    /// `None` if neither is available.
    pub(crate) fn log_file(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::data_local_dir().map(|p| p.join("tilesnake").join("tilesnake.log"))
        })
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
