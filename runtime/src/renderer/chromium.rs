// Copyright 2026 AWB Tracker Contributors
// SPDX-License-Identifier: Apache-2.0

//! Chromium-based renderer using chromiumoxide.

use super::{NavigationResult, RenderContext, RenderSession, Renderer, WaitUntil};
use crate::config::CHROMIUM_PATH_ENV;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{
    EventLoadingFailed, EventLoadingFinished, EventRequestWillBeSent,
};
use chromiumoxide::error::CdpError;
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::debug;

/// Delay between DOM polls while waiting for a selector.
const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Find the Chromium binary path.
pub fn find_chromium() -> Option<PathBuf> {
    // 1. AWB_TRACKER_CHROMIUM_PATH env
    if let Ok(p) = std::env::var(CHROMIUM_PATH_ENV) {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    // 2. System PATH
    for name in ["google-chrome", "chromium", "chromium-browser"] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    // 3. Common macOS location
    if cfg!(target_os = "macos") {
        let common =
            PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if common.exists() {
            return Some(common);
        }
    }

    None
}

/// Launches one headless Chromium process per session.
pub struct ChromiumRenderer {
    chromium_path: Option<PathBuf>,
}

impl ChromiumRenderer {
    /// `chromium_path` overrides discovery via [`find_chromium`].
    pub fn new(chromium_path: Option<PathBuf>) -> Self {
        Self { chromium_path }
    }

    fn executable(&self) -> Result<PathBuf> {
        match &self.chromium_path {
            Some(path) => Ok(path.clone()),
            None => find_chromium().with_context(|| {
                format!("Chromium not found. Set {CHROMIUM_PATH_ENV} or pass --chromium-path.")
            }),
        }
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn launch(&self) -> Result<Box<dyn RenderSession>> {
        let chrome_path = self.executable()?;

        // Each browser gets its own profile so concurrent sessions never collide.
        let profile = tempfile::Builder::new()
            .prefix("awb-tracker-profile-")
            .tempdir()
            .context("failed to create browser profile directory")?;

        let config = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .user_data_dir(profile.path())
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("failed to launch Chromium")?;

        // Spawn the handler task
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        debug!(profile = %profile.path().display(), "Chromium launched");

        Ok(Box::new(ChromiumSession {
            browser,
            handler,
            _profile: profile,
        }))
    }
}

/// A running Chromium process.
///
/// Dropping it without [`RenderSession::close`] still kills the child
/// process (chromiumoxide's `Browser` does that on drop).
pub struct ChromiumSession {
    browser: Browser,
    handler: JoinHandle<()>,
    _profile: TempDir,
}

#[async_trait]
impl RenderSession for ChromiumSession {
    async fn new_context(&mut self) -> Result<Box<dyn RenderContext>> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .context("failed to create new page")?;

        Ok(Box::new(ChromiumContext { page }))
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let mut this = *self;
        let closed = this.browser.close().await;
        if closed.is_err() {
            let _ = this.browser.kill().await;
        }
        let _ = this.browser.wait().await;
        this.handler.abort();
        debug!("Chromium closed");
        closed.context("failed to close Chromium")?;
        Ok(())
    }
}

/// A single Chromium page context.
pub struct ChromiumContext {
    page: Page,
}

#[async_trait]
impl RenderContext for ChromiumContext {
    async fn navigate(
        &mut self,
        url: &str,
        wait_until: WaitUntil,
        timeout: Duration,
    ) -> Result<NavigationResult> {
        let start = Instant::now();

        let result = tokio::time::timeout(timeout, goto(&self.page, url, wait_until)).await;

        let load_time_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(Ok(())) => {
                let final_url = self
                    .page
                    .url()
                    .await
                    .unwrap_or_default()
                    .unwrap_or_else(|| url.to_string());

                Ok(NavigationResult {
                    final_url,
                    load_time_ms,
                })
            }
            Ok(Err(e)) => bail!("navigation failed: {e:#}"),
            Err(_) => bail!("Navigation timeout of {} ms exceeded", timeout.as_millis()),
        }
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()> {
        let poll = async {
            loop {
                match self.page.find_element(selector).await {
                    Ok(_) => return Ok(()),
                    Err(e) if is_missing_element(&e) => {}
                    Err(e) => return Err(e),
                }
                tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
            }
        };

        match tokio::time::timeout(timeout, poll).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                Err(e).with_context(|| format!("Waiting for selector `{selector}` failed"))
            }
            Err(_) => bail!(
                "Waiting for selector `{selector}` failed: {}ms exceeded",
                timeout.as_millis()
            ),
        }
    }

    async fn get_html(&self) -> Result<String> {
        self.page.content().await.context("failed to get HTML")
    }
}

/// Whether a `find_element` failure only means the node is not there yet.
///
/// The page answers an unmatched query with a protocol error; transport
/// failures (crashed browser, dropped websocket) are anything else.
fn is_missing_element(err: &CdpError) -> bool {
    matches!(err, CdpError::Chrome(_) | CdpError::NotFound)
}

/// Navigate `page` and wait for the requested load condition.
async fn goto(page: &Page, url: &str, wait_until: WaitUntil) -> Result<()> {
    match wait_until {
        WaitUntil::Load => {
            page.goto(url).await?;
        }
        WaitUntil::NetworkIdle {
            max_inflight,
            quiet,
        } => {
            // Subscribe before navigating so no request slips past.
            let started = page.event_listener::<EventRequestWillBeSent>().await?;
            let finished = page.event_listener::<EventLoadingFinished>().await?;
            let failed = page.event_listener::<EventLoadingFailed>().await?;
            tokio::pin!(started, finished, failed);

            page.goto(url).await?;

            let mut tracker = InflightTracker::new(max_inflight, tokio::time::Instant::now());
            let idle = tokio::time::sleep(quiet);
            tokio::pin!(idle);

            loop {
                tokio::select! {
                    Some(ev) = started.next() => {
                        tracker.started(ev.request_id.inner(), tokio::time::Instant::now());
                    }
                    Some(ev) = finished.next() => {
                        tracker.finished(ev.request_id.inner(), tokio::time::Instant::now());
                    }
                    Some(ev) = failed.next() => {
                        tracker.finished(ev.request_id.inner(), tokio::time::Instant::now());
                    }
                    _ = &mut idle, if tracker.quiet_since().is_some() => break,
                    else => break,
                }
                if let Some(since) = tracker.quiet_since() {
                    idle.as_mut().reset(since + quiet);
                }
            }
        }
    }
    Ok(())
}

/// Requests currently in flight on a page, and since when the page has
/// been at or under the in-flight threshold.
///
/// The quiet window only restarts when the count drops back from above the
/// threshold; traffic that stays under it does not reset the window.
#[derive(Debug)]
struct InflightTracker {
    inflight: HashSet<String>,
    max_inflight: usize,
    quiet_since: Option<tokio::time::Instant>,
}

impl InflightTracker {
    fn new(max_inflight: usize, now: tokio::time::Instant) -> Self {
        Self {
            inflight: HashSet::new(),
            max_inflight,
            quiet_since: Some(now),
        }
    }

    /// Redirects reuse the request id, so a repeat start is a no-op.
    fn started(&mut self, request_id: &str, now: tokio::time::Instant) {
        self.inflight.insert(request_id.to_string());
        self.update(now);
    }

    fn finished(&mut self, request_id: &str, now: tokio::time::Instant) {
        self.inflight.remove(request_id);
        self.update(now);
    }

    fn update(&mut self, now: tokio::time::Instant) {
        if !self.is_idle() {
            self.quiet_since = None;
        } else if self.quiet_since.is_none() {
            self.quiet_since = Some(now);
        }
    }

    fn is_idle(&self) -> bool {
        self.inflight.len() <= self.max_inflight
    }

    fn quiet_since(&self) -> Option<tokio::time::Instant> {
        self.quiet_since
    }
}
