// Copyright 2026 AWB Tracker Contributors
// SPDX-License-Identifier: Apache-2.0

//! Upstream-site constants and runtime configuration.
//!
//! Everything coupled to the carrier's markup lives here, so a redesign of
//! the tracking page is a one-file change.

use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Base of the carrier tracking page. The AWB id is appended as one path segment.
pub const TRACKING_URL_BASE: &str = "https://www.delhivery.com/track-v2/package/";

/// One row of the rendered tracking timeline. Also the readiness marker.
pub const ROW_SELECTOR: &str = ".flex.items-start.w-full";

/// Status label inside a row.
pub const STATUS_SELECTOR: &str = ".font-semibold";

/// Description label inside a row.
pub const DESCRIPTION_SELECTOR: &str = ".font-normal";

/// Timestamp label inside a row.
pub const TIMESTAMP_SELECTOR: &str = ".text-descriptions-placeholder";

/// Statuses reported to callers. Matched exactly, case-sensitive.
pub const RELEVANT_STATUSES: [&str; 3] = ["IN-TRANSIT", "OUT FOR DELIVERY", "DELIVERED"];

/// How long to wait for [`ROW_SELECTOR`] after navigation.
pub const SELECTOR_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on a single navigation (the automation engine's default).
pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Network is idle once no more than this many requests are in flight...
pub const NETWORK_IDLE_MAX_INFLIGHT: usize = 2;

/// ...for at least this long.
pub const NETWORK_IDLE_QUIET: Duration = Duration::from_millis(500);

/// Default HTTP listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Environment variable pointing at a Chromium binary.
pub const CHROMIUM_PATH_ENV: &str = "AWB_TRACKER_CHROMIUM_PATH";

/// Settings for one tracking fetch.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Base URL the AWB id is appended to.
    pub tracking_url: String,
    pub selector_timeout: Duration,
    pub navigation_timeout: Duration,
    /// Explicit Chromium binary. `None` means discover it.
    pub chromium_path: Option<PathBuf>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            tracking_url: TRACKING_URL_BASE.to_string(),
            selector_timeout: SELECTOR_TIMEOUT,
            navigation_timeout: NAVIGATION_TIMEOUT,
            chromium_path: None,
        }
    }
}

impl FetchConfig {
    /// Build the tracking page URL for `awb_id`.
    ///
    /// The id becomes a single percent-encoded path segment, so it can never
    /// escape the tracking path.
    pub fn tracking_url_for(&self, awb_id: &str) -> anyhow::Result<Url> {
        let mut url = Url::parse(&self.tracking_url)?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("tracking URL cannot be a base: {}", self.tracking_url))?
            .pop_if_empty()
            .push(awb_id);
        Ok(url)
    }
}

/// Settings for the HTTP listener.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
