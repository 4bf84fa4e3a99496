//! Element presence probe backed by a chromiumoxide page.
//!
//! Counts the elements matching a selector by evaluating a small script in
//! the page. Works with any page the caller already drives; this module
//! never launches or closes browsers.

use std::sync::Arc;

use async_trait::async_trait;
use chromiumoxide::page::Page as ChromePage;
use serde_json::json;

use crate::error::ProbeError;
use crate::probe::{Probe, ProbeResult};

/// How a selector string is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocateStrategy {
    /// CSS selector, via `document.querySelectorAll`.
    #[default]
    Css,
    /// XPath expression, via `document.evaluate`.
    XPath,
}

impl LocateStrategy {
    /// Builds a script that evaluates to the number of matches.
    ///
    /// The selector is JSON-encoded, which makes it a valid JavaScript
    /// string literal no matter what quotes or newlines it contains.
    pub fn count_script(self, selector: &str) -> Result<String, ProbeError> {
        let literal = serde_json::to_string(selector)
            .map_err(|e| ProbeError::with_source("failed to encode selector", e))?;

        Ok(match self {
            Self::Css => format!("document.querySelectorAll({literal}).length"),
            Self::XPath => format!(
                "document.evaluate({literal}, document, null, \
                 XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null).snapshotLength"
            ),
        })
    }
}

/// Probes whether an element exists on a page.
///
/// `raw` in the probe result is `{"count": n}`.
#[derive(Debug, Clone)]
pub struct DomPresenceProbe {
    page: Arc<ChromePage>,
    strategy: LocateStrategy,
}

impl DomPresenceProbe {
    /// Creates a CSS probe for `page`.
    pub fn new(page: Arc<ChromePage>) -> Self {
        Self {
            page,
            strategy: LocateStrategy::Css,
        }
    }

    /// Switches how selectors are interpreted.
    #[must_use]
    pub fn with_strategy(mut self, strategy: LocateStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The strategy in use.
    #[must_use]
    pub fn strategy(&self) -> LocateStrategy {
        self.strategy
    }
}

#[async_trait]
impl Probe for DomPresenceProbe {
    async fn probe(&self, selector: &str) -> Result<ProbeResult, ProbeError> {
        let script = self.strategy.count_script(selector)?;

        let result = self
            .page
            .evaluate(script.as_str())
            .await
            .map_err(|e| ProbeError::new(format!("element lookup for <{selector}> failed: {e}")))?;

        let count = result
            .value()
            .and_then(serde_json::Value::as_u64)
            .unwrap_or(0);

        Ok(ProbeResult::new(count > 0, json!({ "count": count })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_script_counts_matches() {
        let script = LocateStrategy::Css.count_script("#weblogin").unwrap();
        assert_eq!(script, r##"document.querySelectorAll("#weblogin").length"##);
    }

    #[test]
    fn xpath_script_uses_snapshot_length() {
        let script = LocateStrategy::XPath.count_script("//div[@id='x']").unwrap();
        assert!(script.starts_with(r#"document.evaluate("//div[@id='x']", document"#));
        assert!(script.ends_with(".snapshotLength"));
    }

    #[test]
    fn selector_cannot_break_out_of_the_literal() {
        let dangerous = r#"a"); alert("xss"); ("#;
        let script = LocateStrategy::Css.count_script(dangerous).unwrap();
        assert_eq!(
            script,
            r#"document.querySelectorAll("a\"); alert(\"xss\"); (").length"#
        );
    }
}
