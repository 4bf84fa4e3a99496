//! Element presence probing against a real browser.
//!
//! These tests require Chrome/Chromium to be installed and are marked #[ignore]
//! by default. Run with: cargo test --package fob-wait -- --ignored

use std::sync::Arc;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use fob_wait::{
    ConditionPoller, DomPresenceProbe, LocateStrategy, OutcomeStatus, PollRequest, Probe,
    WaitSettings,
};
use futures::StreamExt;

async fn launch() -> (Browser, Arc<Page>) {
    let config = BrowserConfig::builder()
        .arg("--no-sandbox")
        .arg("--disable-dev-shm-usage")
        .build()
        .expect("invalid browser config");

    let (browser, mut handler) = Browser::launch(config).await.expect("failed to launch");
    tokio::spawn(async move { while handler.next().await.is_some() {} });

    let page = browser.new_page("about:blank").await.expect("failed to create page");
    page.evaluate(r#"document.body.innerHTML = '<form id="weblogin"><input name="user"></form>'"#)
        .await
        .expect("failed to set content");

    (browser, Arc::new(page))
}

#[tokio::test]
#[ignore] // Requires Chrome to be installed
async fn css_probe_counts_elements() {
    let (mut browser, page) = launch().await;
    let probe = DomPresenceProbe::new(page);

    let present = probe.probe("#weblogin").await.expect("probe failed");
    assert!(present.found);
    assert_eq!(present.raw["count"], 1);

    let missing = probe.probe(".weblogin").await.expect("probe failed");
    assert!(!missing.found);

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn xpath_probe_counts_elements() {
    let (mut browser, page) = launch().await;
    let probe = DomPresenceProbe::new(page).with_strategy(LocateStrategy::XPath);

    let present = probe
        .probe("//form[@id='weblogin']/input")
        .await
        .expect("probe failed");
    assert!(present.found);

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn invalid_selector_is_a_probe_failure() {
    let (mut browser, page) = launch().await;
    let poller = ConditionPoller::new(DomPresenceProbe::new(page), &WaitSettings::default())
        .expect("valid settings");

    let outcome = poller
        .start(PollRequest::element_present("##not a selector").timeout(Duration::from_millis(200)))
        .await
        .expect("poll should resolve");

    assert_eq!(outcome.status, OutcomeStatus::ProbeFailed);
    assert_eq!(outcome.attempts, 1);

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn optional_wait_for_missing_element_passes() {
    let (mut browser, page) = launch().await;
    let poller = ConditionPoller::new(DomPresenceProbe::new(page), &WaitSettings::default())
        .expect("valid settings");

    let outcome = poller
        .start(
            PollRequest::optional_element_present("#cookie-banner")
                .timeout(Duration::from_millis(300))
                .poll_interval(Duration::from_millis(50)),
        )
        .await
        .expect("poll should resolve");

    assert_eq!(outcome.status, OutcomeStatus::OptionalNotFound);
    assert!(outcome.passed());
    assert!(outcome.elapsed >= Duration::from_millis(300));

    browser.close().await.expect("failed to close");
}
