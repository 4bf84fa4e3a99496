//! # fob-wait
//!
//! Condition polling with a deadline, for browser test commands such as
//! "wait for element present".
//!
//! A [`ConditionPoller`] repeatedly asks a [`Probe`] whether a condition
//! holds, sleeping a fixed interval between probes, until the condition
//! holds or the timeout passes. It then reports exactly one [`Outcome`]
//! through the request's completion callback.
//!
//! ## Architecture
//!
//! - **ConditionPoller**: owns timing and drives the probe loop
//! - **ResolutionPolicy**: decides reschedule / pass / fail per tick.
//!   `Strict` fails on timeout; `Optional` passes with a "not found" message
//! - **Reporter**: formats the message and invokes the callback
//! - **WaitSettings**: process-wide default interval and timeout
//! - **DomPresenceProbe**: element presence check over a chromiumoxide page
//!
//! ## Example Usage
//!
//! ```ignore
//! use fob_wait::{ConditionPoller, DomPresenceProbe, PollRequest, WaitSettings};
//! use std::time::Duration;
//!
//! let settings = WaitSettings::load(None)?;
//! let poller = ConditionPoller::new(DomPresenceProbe::new(page), &settings)?;
//!
//! let outcome = poller
//!     .start(
//!         PollRequest::optional_element_present("#cookie-banner")
//!             .timeout(Duration::from_millis(1000)),
//!     )
//!     .await?;
//!
//! assert!(outcome.passed());
//! ```
//!
//! ## Errors
//!
//! Bad timing values and cancellation come back as [`WaitError`]. Everything
//! else, probe failures included, is an [`Outcome`] so the callback always
//! sees it. Whether a failed outcome should stop the surrounding test run is
//! left to the caller via [`Outcome::should_abort`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dom;
pub mod error;
#[cfg(feature = "logging")]
pub mod logging;
pub mod message;
pub mod policy;
pub mod poller;
pub mod probe;
pub mod reporter;
pub mod request;
pub mod settings;

// Re-export main types for convenience
pub use dom::{DomPresenceProbe, LocateStrategy};
pub use error::{ProbeError, Result, WaitError};
pub use message::format_message;
pub use policy::{Directive, ResolutionPolicy, Tick, Verdict};
pub use poller::ConditionPoller;
pub use probe::{FnProbe, Probe, ProbeResult, probe_fn};
pub use reporter::{CompletionCallback, Outcome, OutcomeStatus};
pub use request::PollRequest;
pub use settings::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS, WaitSettings};
pub use tokio_util::sync::CancellationToken;
