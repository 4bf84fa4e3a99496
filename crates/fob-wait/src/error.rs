//! Error types for condition polling.
//!
//! Only failures that stop a poll from ever resolving are errors here:
//! bad configuration (rejected before the first probe), cancellation, and
//! settings that cannot be loaded. Everything that resolves a poll, including
//! a probe that errors out, is delivered as an [`Outcome`](crate::Outcome)
//! through the completion callback instead.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// The main error type for polling operations.
#[derive(Debug, Error)]
pub enum WaitError {
    /// A timing value was out of range.
    ///
    /// Raised before any probe is issued; the completion callback never fires.
    #[error("invalid configuration for '{field}': {reason}")]
    InvalidConfiguration {
        /// The offending field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// The poll was cancelled while waiting for its next tick.
    #[error("poll for '{selector}' cancelled after {elapsed:?}")]
    Cancelled {
        /// Selector of the cancelled poll
        selector: String,
        /// Time spent polling before cancellation
        elapsed: Duration,
    },

    /// A settings source could not be read or deserialized.
    #[error("failed to load wait settings: {0}")]
    Settings(#[source] Box<figment::Error>),

    /// The settings file has an extension we don't know how to parse.
    #[error("unsupported settings format: {} (expected .toml or .json)", .0.display())]
    UnsupportedSettingsFormat(PathBuf),
}

impl WaitError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

impl From<figment::Error> for WaitError {
    fn from(err: figment::Error) -> Self {
        Self::Settings(Box::new(err))
    }
}

/// A specialized Result type for polling operations.
pub type Result<T> = std::result::Result<T, WaitError>;

/// Error returned by a [`Probe`](crate::Probe) that could not give a
/// definitive found/absent answer.
///
/// Typically a transport or protocol failure. The poller never retries these.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ProbeError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProbeError {
    /// Creates a probe error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a probe error that wraps an underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the error message without the source chain.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
