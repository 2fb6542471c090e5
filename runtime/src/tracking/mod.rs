// Copyright 2026 AWB Tracker Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tracking fetcher: render the carrier page and extract status events.
//!
//! One fetch launches its own browser session, renders the tracking page,
//! closes the session, then parses the captured HTML offline.

pub mod extract;
pub mod types;

use crate::config::{FetchConfig, NETWORK_IDLE_MAX_INFLIGHT, NETWORK_IDLE_QUIET, ROW_SELECTOR};
use crate::error::{TrackingError, TrackingResult};
use crate::renderer::{RenderSession, Renderer, WaitUntil};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub use types::{TrackingEvent, TrackingRequest, TrackingResponse};

/// Fetches tracking events for an AWB id.
pub struct TrackingFetcher {
    renderer: Arc<dyn Renderer>,
    config: FetchConfig,
}

impl TrackingFetcher {
    pub fn new(renderer: Arc<dyn Renderer>, config: FetchConfig) -> Self {
        Self { renderer, config }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Handle a decoded request body.
    pub async fn handle(&self, request: &TrackingRequest) -> TrackingResult<TrackingResponse> {
        self.fetch(request.awb_id().as_deref()).await
    }

    /// Fetch the relevant tracking events for `awb_id`.
    ///
    /// A missing or empty id fails before any browser is launched. Every
    /// later failure becomes [`TrackingError::Fetch`].
    pub async fn fetch(&self, awb_id: Option<&str>) -> TrackingResult<TrackingResponse> {
        let awb_id = match awb_id {
            Some(id) if !id.is_empty() => id,
            _ => {
                debug!("rejected tracking request without AWB id");
                return Err(TrackingError::MissingAwbId);
            }
        };

        match self.fetch_events(awb_id).await {
            Ok(events) => {
                if events.is_empty() {
                    warn!(awb_id, "no relevant tracking details found");
                }
                Ok(TrackingResponse {
                    tracking_details: events,
                })
            }
            Err(e) => {
                let err = TrackingError::from(e);
                error!(awb_id, error = %err, "error fetching tracking details");
                Err(err)
            }
        }
    }

    async fn fetch_events(&self, awb_id: &str) -> Result<Vec<TrackingEvent>> {
        let url = self.config.tracking_url_for(awb_id)?;
        info!(awb_id, %url, "fetching tracking page");

        let html = self.render(url.as_str()).await?;
        extract::extract_tracking_events(&html)
    }

    /// Render `url` in a fresh browser session and return the page HTML.
    ///
    /// The session is closed exactly once, whatever the outcome of the
    /// render steps. A render error wins over a close error.
    async fn render(&self, url: &str) -> Result<String> {
        let mut session = self.renderer.launch().await?;

        let rendered = self.render_in(session.as_mut(), url).await;
        let closed = session.close().await;

        let html = rendered?;
        closed?;
        Ok(html)
    }

    async fn render_in(&self, session: &mut dyn RenderSession, url: &str) -> Result<String> {
        let mut page = session.new_context().await?;

        let nav = page
            .navigate(
                url,
                WaitUntil::NetworkIdle {
                    max_inflight: NETWORK_IDLE_MAX_INFLIGHT,
                    quiet: NETWORK_IDLE_QUIET,
                },
                self.config.navigation_timeout,
            )
            .await?;
        debug!(final_url = %nav.final_url, load_time_ms = nav.load_time_ms, "page loaded");

        page.wait_for_selector(ROW_SELECTOR, self.config.selector_timeout)
            .await?;

        page.get_html().await
    }
}
