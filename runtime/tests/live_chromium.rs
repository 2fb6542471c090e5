// Copyright 2026 AWB Tracker Contributors
// SPDX-License-Identifier: Apache-2.0

//! End-to-end fetches through a real headless Chromium.
//!
//! The tracking page is served by a local wiremock server. Run with
//! `--ignored` on a machine with Chromium installed.

use awb_tracker::config::FetchConfig;
use awb_tracker::error::TrackingError;
use awb_tracker::renderer::chromium::ChromiumRenderer;
use awb_tracker::tracking::TrackingFetcher;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMELINE_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
  <div class="flex items-start w-full"><p class="font-semibold">PICKED UP</p>
    <p class="font-normal">Shipment picked up</p><p class="text-descriptions-placeholder">01 Mar</p></div>
  <div class="flex items-start w-full"><p class="font-semibold">IN-TRANSIT</p>
    <p class="font-normal">D1</p><p class="text-descriptions-placeholder">T1</p></div>
  <div class="flex items-start w-full"><p class="font-semibold">DELIVERED</p>
    <p class="font-normal">D2</p><p class="text-descriptions-placeholder">T2</p></div>
</body></html>"#;

async fn fetcher_for(server: &MockServer, selector_timeout: Duration) -> TrackingFetcher {
    let config = FetchConfig {
        tracking_url: format!("{}/track-v2/package/", server.uri()),
        selector_timeout,
        ..FetchConfig::default()
    };
    TrackingFetcher::new(Arc::new(ChromiumRenderer::new(None)), config)
}

#[tokio::test]
#[ignore] // Requires Chromium to be installed
async fn test_live_fetch_extracts_relevant_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/track-v2/package/1234567890"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(TIMELINE_PAGE, "text/html"))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, Duration::from_secs(10)).await;
    let resp = fetcher.fetch(Some("1234567890")).await.expect("fetch failed");

    let statuses: Vec<&str> = resp
        .tracking_details
        .iter()
        .map(|e| e.status.as_str())
        .collect();
    assert_eq!(statuses, vec!["IN-TRANSIT", "DELIVERED"]);
}

#[tokio::test]
#[ignore] // Requires Chromium to be installed
async fn test_live_fetch_times_out_without_timeline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html><body>Loading…</body></html>", "text/html"),
        )
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, Duration::from_millis(500)).await;
    match fetcher.fetch(Some("1234567890")).await.unwrap_err() {
        TrackingError::Fetch(details) => assert!(details.contains("500ms exceeded"), "{details}"),
        other => panic!("unexpected error: {other:?}"),
    }
}
