//! The probe interface: a single asynchronous check of an external condition.

use std::future::Future;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ProbeError;

/// Answer from a single probe.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    /// Whether the condition currently holds.
    pub found: bool,

    /// Whatever the underlying check returned. Never inspected by the poller.
    pub raw: Value,
}

impl ProbeResult {
    /// Creates a result with an attached raw value.
    pub fn new(found: bool, raw: Value) -> Self {
        Self { found, raw }
    }

    /// The condition holds.
    #[must_use]
    pub fn found() -> Self {
        Self::new(true, Value::Bool(true))
    }

    /// The condition doesn't hold (yet).
    #[must_use]
    pub fn absent() -> Self {
        Self::new(false, Value::Bool(false))
    }
}

/// Checks whether the condition identified by `selector` currently holds.
///
/// Returning `Ok` with `found: false` means "not yet" and the poller will try
/// again. Returning `Err` means the check itself broke and ends the poll.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Performs one check.
    async fn probe(&self, selector: &str) -> Result<ProbeResult, ProbeError>;
}

#[async_trait]
impl<P: Probe + ?Sized> Probe for std::sync::Arc<P> {
    async fn probe(&self, selector: &str) -> Result<ProbeResult, ProbeError> {
        (**self).probe(selector).await
    }
}

/// A [`Probe`] backed by an async closure. Built with [`probe_fn`].
#[derive(Clone)]
pub struct FnProbe<F> {
    check: F,
}

impl<F> std::fmt::Debug for FnProbe<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnProbe").finish_non_exhaustive()
    }
}

/// Wraps an async closure as a [`Probe`].
///
/// # Example
///
/// ```
/// use fob_wait::{probe_fn, ProbeResult};
///
/// let probe = probe_fn(|selector: &str| {
///     let found = selector == "body";
///     async move { Ok(if found { ProbeResult::found() } else { ProbeResult::absent() }) }
/// });
/// # let _ = probe;
/// ```
pub fn probe_fn<F, Fut>(check: F) -> FnProbe<F>
where
    F: Fn(&str) -> Fut + Send + Sync,
    Fut: Future<Output = Result<ProbeResult, ProbeError>> + Send,
{
    FnProbe { check }
}

#[async_trait]
impl<F, Fut> Probe for FnProbe<F>
where
    F: Fn(&str) -> Fut + Send + Sync,
    Fut: Future<Output = Result<ProbeResult, ProbeError>> + Send,
{
    async fn probe(&self, selector: &str) -> Result<ProbeResult, ProbeError> {
        (self.check)(selector).await
    }
}
