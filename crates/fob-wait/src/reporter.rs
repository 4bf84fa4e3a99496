//! Outcomes and their delivery to the completion callback.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::message::format_message;

/// Callback invoked once when a poll resolves.
pub type CompletionCallback = Box<dyn FnOnce(&Outcome) + Send + 'static>;

/// How a poll resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeStatus {
    /// The condition held before the deadline.
    Found,
    /// Strict poll: the deadline passed without the condition holding.
    FailedTimeout,
    /// Optional poll: the deadline passed without the condition holding,
    /// which counts as a pass.
    OptionalNotFound,
    /// The probe errored instead of answering.
    ProbeFailed,
}

impl OutcomeStatus {
    /// Whether this status counts as a pass.
    #[must_use]
    pub fn passed(self) -> bool {
        matches!(self, Self::Found | Self::OptionalNotFound)
    }
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Found => "found",
            Self::FailedTimeout => "timed out",
            Self::OptionalNotFound => "optional not found",
            Self::ProbeFailed => "probe failed",
        };
        f.write_str(s)
    }
}

/// The single result of a poll.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// How the poll resolved.
    pub status: OutcomeStatus,

    /// Fully formatted message.
    pub message: String,

    /// Selector that was probed.
    pub selector: String,

    /// Time from the first probe to resolution.
    pub elapsed: Duration,

    /// The poll's total budget.
    pub timeout: Duration,

    /// Number of probes issued.
    pub attempts: u32,

    /// Whether the caller asked for a failure to abort its run.
    pub abort_on_failure: bool,

    /// Raw value of the last probe, or `false` when nothing was found.
    pub value: Value,
}

impl Outcome {
    /// Whether the poll counts as a pass.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status.passed()
    }

    /// Elapsed time in whole milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }

    /// True if the poll failed and the caller asked failures to abort.
    #[must_use]
    pub fn should_abort(&self) -> bool {
        !self.passed() && self.abort_on_failure
    }
}

/// Builds the final message for a poll.
///
/// The caller's template, when present, replaces the policy default.
pub(crate) fn render(
    custom: Option<&str>,
    default_template: &str,
    selector: &str,
    reported: Duration,
) -> String {
    format_message(custom.unwrap_or(default_template), selector, reported.as_millis())
}

/// Logs the outcome and hands it to the callback.
///
/// A panicking callback is caught and logged so it can't unwind into the
/// poller.
pub(crate) fn report(outcome: &Outcome, on_complete: Option<CompletionCallback>) {
    if outcome.passed() {
        info!(
            selector = %outcome.selector,
            status = %outcome.status,
            elapsed_ms = outcome.elapsed_ms(),
            attempts = outcome.attempts,
            "{}",
            outcome.message
        );
    } else {
        warn!(
            selector = %outcome.selector,
            status = %outcome.status,
            elapsed_ms = outcome.elapsed_ms(),
            attempts = outcome.attempts,
            abort = outcome.abort_on_failure,
            "{}",
            outcome.message
        );
    }

    let Some(callback) = on_complete else {
        return;
    };

    if catch_unwind(AssertUnwindSafe(|| callback(outcome))).is_err() {
        error!(selector = %outcome.selector, "completion callback panicked");
    }
}
