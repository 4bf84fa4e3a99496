//! Process-wide wait settings.
//!
//! Polls that don't specify a timeout or interval fall back to these values.
//! Sources are layered with figment, lowest priority first:
//!
//! 1. Built-in defaults (500ms interval, 5000ms timeout)
//! 2. A settings file (`fob-wait.toml` in the working directory, or an
//!    explicit `.toml` / `.json` path)
//! 3. `FOB_WAIT_*` environment variables (`FOB_WAIT_POLL_INTERVAL_MS`,
//!    `FOB_WAIT_TIMEOUT_MS`)
//!
//! Values are kept as signed milliseconds so that a negative number in a
//! file or the environment is reported as an invalid configuration rather
//! than a parse error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WaitError};

/// Default poll interval in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: i64 = 500;

/// Default timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: i64 = 5000;

/// Settings file looked up in the working directory when no path is given.
pub const DEFAULT_SETTINGS_FILE: &str = "fob-wait.toml";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "FOB_WAIT_";

/// Default timing for polls, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitSettings {
    /// Interval between probes when a poll doesn't set its own.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: i64,

    /// Timeout used when a poll doesn't set its own.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: i64,
}

impl Default for WaitSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl WaitSettings {
    /// Load settings from defaults, an optional file, and the environment.
    ///
    /// When `path` is `None`, `fob-wait.toml` is used if it exists in the
    /// current directory. The result is validated before it is returned.
    ///
    /// # Errors
    ///
    /// Returns `Settings` if a source fails to parse,
    /// `UnsupportedSettingsFormat` for an unknown file extension, and
    /// `InvalidConfiguration` if the merged values are out of range.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings: Self = Self::figment(path)?.extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Build the layered figment without extracting it.
    ///
    /// Exposed so callers can merge additional providers on top.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let settings_file = path.map(Path::to_path_buf).or_else(|| {
            let default_path = PathBuf::from(DEFAULT_SETTINGS_FILE);
            default_path.exists().then_some(default_path)
        });

        if let Some(file) = settings_file {
            figment = match file.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => figment.merge(Toml::file(file)),
                Some("json") => figment.merge(Json::file(file)),
                _ => return Err(WaitError::UnsupportedSettingsFormat(file)),
            };
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Check both values are in range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the interval is not positive or the
    /// timeout is negative.
    pub fn validate(&self) -> Result<()> {
        self.poll_interval()?;
        self.timeout()?;
        Ok(())
    }

    /// The default poll interval as a `Duration`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the interval is zero or negative.
    pub fn poll_interval(&self) -> Result<Duration> {
        if self.poll_interval_ms <= 0 {
            return Err(WaitError::invalid(
                "poll_interval_ms",
                format!("must be greater than zero, got {}", self.poll_interval_ms),
            ));
        }
        Ok(Duration::from_millis(self.poll_interval_ms.unsigned_abs()))
    }

    /// The default timeout as a `Duration`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the timeout is negative.
    pub fn timeout(&self) -> Result<Duration> {
        if self.timeout_ms < 0 {
            return Err(WaitError::invalid(
                "timeout_ms",
                format!("must not be negative, got {}", self.timeout_ms),
            ));
        }
        Ok(Duration::from_millis(self.timeout_ms.unsigned_abs()))
    }
}

fn default_poll_interval_ms() -> i64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_timeout_ms() -> i64 {
    DEFAULT_TIMEOUT_MS
}
