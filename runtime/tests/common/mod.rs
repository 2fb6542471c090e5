// Copyright 2026 AWB Tracker Contributors
// SPDX-License-Identifier: Apache-2.0

//! Scripted renderer shared by the integration suites.
//!
//! Serves canned HTML, can fail at any render step, and counts launches
//! and closes so tests can check the session lifecycle.

#![allow(dead_code)]

use anyhow::{bail, Result};
use async_trait::async_trait;
use awb_tracker::config::FetchConfig;
use awb_tracker::renderer::{NavigationResult, RenderContext, RenderSession, Renderer, WaitUntil};
use awb_tracker::tracking::TrackingFetcher;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Render step at which the scripted engine fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Launch,
    NewContext,
    Navigate,
    WaitForSelector,
    GetHtml,
    Close,
}

/// What the scripted engine observed.
#[derive(Debug, Default)]
pub struct Calls {
    pub launches: AtomicUsize,
    pub closes: AtomicUsize,
    pub urls: Mutex<Vec<String>>,
    pub selectors: Mutex<Vec<(String, Duration)>>,
}

impl Calls {
    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

pub struct ScriptedRenderer {
    html: String,
    fail_at: Option<FailAt>,
    calls: Arc<Calls>,
}

impl ScriptedRenderer {
    pub fn with_html(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            fail_at: None,
            calls: Arc::new(Calls::default()),
        }
    }

    pub fn failing_at(step: FailAt) -> Self {
        Self {
            fail_at: Some(step),
            ..Self::with_html(tracking_page(&[("DELIVERED", "D", "T")]))
        }
    }

    pub fn calls(&self) -> Arc<Calls> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl Renderer for ScriptedRenderer {
    async fn launch(&self) -> Result<Box<dyn RenderSession>> {
        if self.fail_at == Some(FailAt::Launch) {
            bail!("failed to launch Chromium: no such file or directory");
        }
        self.calls.launches.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedSession {
            html: self.html.clone(),
            fail_at: self.fail_at,
            calls: Arc::clone(&self.calls),
        }))
    }
}

struct ScriptedSession {
    html: String,
    fail_at: Option<FailAt>,
    calls: Arc<Calls>,
}

#[async_trait]
impl RenderSession for ScriptedSession {
    async fn new_context(&mut self) -> Result<Box<dyn RenderContext>> {
        if self.fail_at == Some(FailAt::NewContext) {
            bail!("failed to create new page");
        }
        Ok(Box::new(ScriptedContext {
            html: self.html.clone(),
            fail_at: self.fail_at,
            calls: Arc::clone(&self.calls),
        }))
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.calls.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_at == Some(FailAt::Close) {
            bail!("failed to close Chromium: connection reset");
        }
        Ok(())
    }
}

struct ScriptedContext {
    html: String,
    fail_at: Option<FailAt>,
    calls: Arc<Calls>,
}

#[async_trait]
impl RenderContext for ScriptedContext {
    async fn navigate(
        &mut self,
        url: &str,
        _wait_until: WaitUntil,
        timeout: Duration,
    ) -> Result<NavigationResult> {
        self.calls.urls.lock().unwrap().push(url.to_string());
        if self.fail_at == Some(FailAt::Navigate) {
            bail!("Navigation timeout of {} ms exceeded", timeout.as_millis());
        }
        Ok(NavigationResult {
            final_url: url.to_string(),
            load_time_ms: 1,
        })
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()> {
        self.calls
            .selectors
            .lock()
            .unwrap()
            .push((selector.to_string(), timeout));
        if self.fail_at == Some(FailAt::WaitForSelector) {
            bail!(
                "Waiting for selector `{selector}` failed: {}ms exceeded",
                timeout.as_millis()
            );
        }
        Ok(())
    }

    async fn get_html(&self) -> Result<String> {
        if self.fail_at == Some(FailAt::GetHtml) {
            bail!("failed to get HTML");
        }
        Ok(self.html.clone())
    }
}

/// A tracking page with one timeline row per `(status, description, timestamp)`.
pub fn tracking_page(rows: &[(&str, &str, &str)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(status, description, timestamp)| {
            format!(
                r#"<div class="flex items-start w-full">
                    <div class="font-semibold">{status}</div>
                    <div class="font-normal">{description}</div>
                    <div class="text-descriptions-placeholder">{timestamp}</div>
                </div>"#
            )
        })
        .collect();
    format!("<!DOCTYPE html><html><body><section>{rows}</section></body></html>")
}

/// A fetcher with default settings over `renderer`.
pub fn fetcher(renderer: ScriptedRenderer) -> (TrackingFetcher, Arc<Calls>) {
    let calls = renderer.calls();
    (
        TrackingFetcher::new(Arc::new(renderer), FetchConfig::default()),
        calls,
    )
}
