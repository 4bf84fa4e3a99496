//! Poll requests.

use std::time::Duration;

use crate::policy::ResolutionPolicy;
use crate::reporter::{CompletionCallback, Outcome};

/// Everything the caller specifies about one poll.
///
/// Timeout and interval are optional; unset values come from the poller's
/// [`WaitSettings`](crate::WaitSettings).
///
/// # Example
///
/// ```
/// use fob_wait::PollRequest;
/// use std::time::Duration;
///
/// let request = PollRequest::optional_element_present("body")
///     .timeout(Duration::from_millis(1000))
///     .message("elemento %s no era presente en %d ms")
///     .on_complete(|outcome| println!("{}", outcome.message));
/// # let _ = request;
/// ```
pub struct PollRequest {
    pub(crate) selector: String,
    pub(crate) policy: ResolutionPolicy,
    pub(crate) timeout: Option<Duration>,
    pub(crate) poll_interval: Option<Duration>,
    pub(crate) abort_on_failure: bool,
    pub(crate) message: Option<String>,
    pub(crate) on_complete: Option<CompletionCallback>,
}

impl PollRequest {
    /// Creates a strict request for `selector`.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            policy: ResolutionPolicy::Strict,
            timeout: None,
            poll_interval: None,
            abort_on_failure: true,
            message: None,
            on_complete: None,
        }
    }

    /// Waits for an element to be present; timing out fails.
    pub fn element_present(selector: impl Into<String>) -> Self {
        Self::new(selector)
    }

    /// Waits for an element to be present; timing out still passes.
    pub fn optional_element_present(selector: impl Into<String>) -> Self {
        Self::new(selector).policy(ResolutionPolicy::Optional)
    }

    /// Sets the resolution policy.
    #[must_use]
    pub fn policy(mut self, policy: ResolutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the total time budget.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the interval between probes.
    #[must_use]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Whether a failed outcome should abort the caller's run (default: true).
    #[must_use]
    pub fn abort_on_failure(mut self, abort: bool) -> Self {
        self.abort_on_failure = abort;
        self
    }

    /// Replaces the default message. `%s` is the selector, `%d` the time.
    #[must_use]
    pub fn message(mut self, template: impl Into<String>) -> Self {
        self.message = Some(template.into());
        self
    }

    /// Registers a callback invoked once with the outcome.
    #[must_use]
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&Outcome) + Send + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// The selector being probed.
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// The chosen resolution policy.
    #[must_use]
    pub fn resolution_policy(&self) -> ResolutionPolicy {
        self.policy
    }
}

impl std::fmt::Debug for PollRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollRequest")
            .field("selector", &self.selector)
            .field("policy", &self.policy)
            .field("timeout", &self.timeout)
            .field("poll_interval", &self.poll_interval)
            .field("abort_on_failure", &self.abort_on_failure)
            .field("message", &self.message)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}
