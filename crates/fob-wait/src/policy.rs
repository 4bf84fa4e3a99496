//! Resolution policies.
//!
//! A policy looks at one probe result and the time spent so far and decides
//! whether to try again, pass, or fail. The two variants differ only in what
//! happens when the deadline passes without the condition ever holding:
//! [`ResolutionPolicy::Strict`] fails, [`ResolutionPolicy::Optional`] passes
//! with a message saying the element was not found.

use std::time::Duration;

use crate::reporter::OutcomeStatus;

/// Message used when the condition holds.
pub const FOUND_MESSAGE: &str = "Element <%s> was present after %d milliseconds.";

/// Message used when a strict poll runs out of time.
pub const TIMEOUT_MESSAGE: &str =
    "Timed out while waiting for element <%s> to be present for %d milliseconds.";

/// Message used when an optional poll runs out of time.
pub const OPTIONAL_NOT_FOUND_MESSAGE: &str =
    "Optional element <%s> was not found after %d milliseconds.";

/// Message prefix used when the probe itself errors.
pub const PROBE_FAILED_MESSAGE: &str = "Failed to probe element <%s> after %d milliseconds";

/// How a poll resolves once its deadline passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionPolicy {
    /// Timing out is a failure.
    #[default]
    Strict,
    /// Timing out is still a pass, reported as "not found".
    Optional,
}

/// What the poller observed on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Whether the probe reported the condition as holding.
    pub found: bool,
    /// Time since the first probe was issued.
    pub elapsed: Duration,
    /// The poll's total budget.
    pub timeout: Duration,
}

impl Tick {
    /// True once no further probe may be scheduled.
    #[must_use]
    pub fn deadline_reached(&self) -> bool {
        self.elapsed >= self.timeout
    }
}

/// A terminal decision: which status to report and how to word it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    /// Status of the resulting outcome.
    pub status: OutcomeStatus,
    /// Template used when the caller didn't supply one.
    pub default_template: &'static str,
    /// Value substituted for the time placeholder.
    pub reported: Duration,
}

/// A policy's answer for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Probe again after the poll interval.
    Reschedule,
    /// Resolve as passed.
    Succeed(Verdict),
    /// Resolve as failed.
    Fail(Verdict),
}

impl ResolutionPolicy {
    /// Decides what to do with one tick.
    ///
    /// Never returns [`Directive::Reschedule`] once the deadline is reached.
    #[must_use]
    pub fn decide(self, tick: &Tick) -> Directive {
        if tick.found {
            return Directive::Succeed(Verdict {
                status: OutcomeStatus::Found,
                default_template: FOUND_MESSAGE,
                reported: tick.elapsed,
            });
        }

        if !tick.deadline_reached() {
            return Directive::Reschedule;
        }

        match self {
            Self::Strict => Directive::Fail(Verdict {
                status: OutcomeStatus::FailedTimeout,
                default_template: TIMEOUT_MESSAGE,
                reported: tick.timeout,
            }),
            Self::Optional => Directive::Succeed(Verdict {
                status: OutcomeStatus::OptionalNotFound,
                default_template: OPTIONAL_NOT_FOUND_MESSAGE,
                reported: tick.timeout,
            }),
        }
    }
}
