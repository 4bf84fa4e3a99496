//! The polling loop.
//!
//! A poll probes once, hands the answer to its [`ResolutionPolicy`], and
//! either sleeps and probes again or resolves. Probes never overlap: the next
//! one is only issued after the previous answer went through the policy.
//!
//! # Timing
//!
//! Time is read from tokio's monotonic clock. The wait before a tick is
//! `min(poll_interval, deadline - now)`, so the last probe lands on the
//! deadline rather than up to one interval past it. With a 15ms timeout and
//! a 10ms interval, probes go out at 0ms, 10ms and 15ms.

use std::time::Duration;

use serde_json::Value;
use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{Result, WaitError};
use crate::policy::{Directive, PROBE_FAILED_MESSAGE, Tick, Verdict};
use crate::probe::{Probe, ProbeResult};
use crate::reporter::{Outcome, OutcomeStatus, render, report};
use crate::request::PollRequest;
use crate::settings::WaitSettings;

/// Drives polls against one probe.
///
/// Default timing is resolved from [`WaitSettings`] once, at construction.
/// Each call to [`start`](Self::start) owns its own state, so one poller can
/// run several polls concurrently.
#[derive(Debug)]
pub struct ConditionPoller<P> {
    probe: P,
    default_interval: Duration,
    default_timeout: Duration,
    cancel: CancellationToken,
}

/// Mutable state of one in-flight poll.
#[derive(Debug)]
struct PollState {
    started: Instant,
    elapsed: Duration,
    attempts: u32,
    resolved: bool,
}

impl PollState {
    fn begin() -> Self {
        Self {
            started: Instant::now(),
            elapsed: Duration::ZERO,
            attempts: 0,
            resolved: false,
        }
    }
}

impl<P: Probe> ConditionPoller<P> {
    /// Creates a poller, taking default timing from `settings`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the settings are out of range.
    pub fn new(probe: P, settings: &WaitSettings) -> Result<Self> {
        Ok(Self {
            probe,
            default_interval: settings.poll_interval()?,
            default_timeout: settings.timeout()?,
            cancel: CancellationToken::new(),
        })
    }

    /// Uses `token` to cancel polls at their next reschedule point.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// The token that cancels this poller's polls.
    #[must_use]
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// The probe this poller drives.
    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Runs one poll to resolution.
    ///
    /// Every resolution, including a probe error, is returned as an
    /// [`Outcome`] and passed to the request's callback exactly once.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for a zero poll interval, before any
    /// probe is issued, and `Cancelled` if the cancellation token fires
    /// while waiting between probes. The callback is not invoked in either
    /// case.
    pub async fn start(&self, request: PollRequest) -> Result<Outcome> {
        let PollRequest {
            selector,
            policy,
            timeout,
            poll_interval,
            abort_on_failure,
            message,
            mut on_complete,
        } = request;

        let timeout = timeout.unwrap_or(self.default_timeout);
        let interval = poll_interval.unwrap_or(self.default_interval);
        if interval.is_zero() {
            return Err(WaitError::invalid(
                "poll_interval",
                "must be greater than zero",
            ));
        }

        debug!(%selector, ?policy, ?timeout, ?interval, "starting poll");

        let mut state = PollState::begin();

        loop {
            state.attempts += 1;
            let probed = self.probe.probe(&selector).await;
            state.elapsed = state.started.elapsed();

            let last = match probed {
                Ok(result) => result,
                Err(err) => {
                    let verdict = Verdict {
                        status: OutcomeStatus::ProbeFailed,
                        default_template: PROBE_FAILED_MESSAGE,
                        reported: state.elapsed,
                    };
                    let text = format!(
                        "{}: {err}",
                        render(None, verdict.default_template, &selector, verdict.reported)
                    );
                    let outcome = resolve(
                        &mut state,
                        &selector,
                        timeout,
                        abort_on_failure,
                        verdict.status,
                        text,
                        Value::Bool(false),
                    );
                    report(&outcome, on_complete.take());
                    return Ok(outcome);
                }
            };

            debug!(
                %selector,
                attempt = state.attempts,
                elapsed_ms = state.elapsed.as_millis(),
                found = last.found,
                "probe tick"
            );

            let tick = Tick {
                found: last.found,
                elapsed: state.elapsed,
                timeout,
            };

            let mut directive = policy.decide(&tick);
            if directive == Directive::Reschedule {
                // time may have passed while the policy ran
                let recheck = Tick {
                    elapsed: state.started.elapsed(),
                    ..tick
                };
                if recheck.deadline_reached() {
                    state.elapsed = recheck.elapsed;
                    directive = policy.decide(&recheck);
                }
            }

            match directive {
                Directive::Reschedule => {
                    let wait = interval.min(timeout.saturating_sub(state.started.elapsed()));
                    debug!(%selector, wait_ms = wait.as_millis(), "rescheduling probe");

                    tokio::select! {
                        biased;
                        () = self.cancel.cancelled() => {
                            return Err(WaitError::Cancelled {
                                selector,
                                elapsed: state.started.elapsed(),
                            });
                        }
                        () = sleep(wait) => {}
                    }
                }
                Directive::Succeed(verdict) | Directive::Fail(verdict) => {
                    let text = render(
                        message.as_deref(),
                        verdict.default_template,
                        &selector,
                        verdict.reported,
                    );
                    let outcome = resolve(
                        &mut state,
                        &selector,
                        timeout,
                        abort_on_failure,
                        verdict.status,
                        text,
                        outcome_value(verdict.status, last),
                    );
                    report(&outcome, on_complete.take());
                    return Ok(outcome);
                }
            }
        }
    }
}

fn resolve(
    state: &mut PollState,
    selector: &str,
    timeout: Duration,
    abort_on_failure: bool,
    status: OutcomeStatus,
    message: String,
    value: Value,
) -> Outcome {
    debug_assert!(!state.resolved, "poll resolved twice");
    state.resolved = true;

    Outcome {
        status,
        message,
        selector: selector.to_string(),
        elapsed: state.elapsed,
        timeout,
        attempts: state.attempts,
        abort_on_failure,
        value,
    }
}

fn outcome_value(status: OutcomeStatus, last: ProbeResult) -> Value {
    match status {
        OutcomeStatus::Found => last.raw,
        _ => Value::Bool(false),
    }
}
