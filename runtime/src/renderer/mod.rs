// Copyright 2026 AWB Tracker Contributors
// SPDX-License-Identifier: Apache-2.0

//! Renderer abstraction for browser-based page rendering.
//!
//! Defines the `Renderer`, `RenderSession` and `RenderContext` traits that
//! abstract over the browser engine (currently Chromium via chromiumoxide).
//! A `Renderer` launches one browser process per `RenderSession`; sessions
//! are never shared between requests.

pub mod chromium;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// When a navigation counts as finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaitUntil {
    /// The `load` event fired.
    Load,
    /// No more than `max_inflight` requests for at least `quiet`.
    NetworkIdle { max_inflight: usize, quiet: Duration },
}

/// Result of navigating to a URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationResult {
    /// The final URL after any redirects.
    pub final_url: String,
    /// Time taken to load the page in milliseconds.
    pub load_time_ms: u64,
}

/// A browser engine that can launch isolated sessions.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Start a fresh browser process.
    async fn launch(&self) -> Result<Box<dyn RenderSession>>;
}

/// One running browser process.
///
/// Callers must call [`RenderSession::close`] once they are done, on the
/// failure path as well.
#[async_trait]
pub trait RenderSession: Send {
    /// Open a new page (tab).
    async fn new_context(&mut self) -> Result<Box<dyn RenderContext>>;
    /// Shut the browser down and release its resources.
    async fn close(self: Box<Self>) -> Result<()>;
}

/// A single page inside a session.
#[async_trait]
pub trait RenderContext: Send {
    /// Navigate to a URL and wait for `wait_until`, bounded by `timeout`.
    async fn navigate(
        &mut self,
        url: &str,
        wait_until: WaitUntil,
        timeout: Duration,
    ) -> Result<NavigationResult>;
    /// Wait until an element matching `selector` exists in the DOM.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()>;
    /// Get the full page HTML.
    async fn get_html(&self) -> Result<String>;
}
