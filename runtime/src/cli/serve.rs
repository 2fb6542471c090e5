// Copyright 2026 AWB Tracker Contributors
// SPDX-License-Identifier: Apache-2.0

//! `awb-tracker serve`: run the HTTP service.

use crate::config::{FetchConfig, ServerConfig};
use crate::renderer::chromium::{find_chromium, ChromiumRenderer};
use crate::renderer::Renderer;
use crate::rest::{self, AppState};
use crate::tracking::TrackingFetcher;
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Serve tracking requests until Ctrl-C.
pub async fn run(server: ServerConfig, fetch: FetchConfig) -> Result<()> {
    info!("starting awb-tracker v{}", env!("CARGO_PKG_VERSION"));

    // Chromium is launched per request; only warn here so the service still
    // answers health checks and validation errors without it.
    if fetch.chromium_path.is_none() && find_chromium().is_none() {
        warn!("Chromium not found; tracking requests will fail until it is installed");
    }

    let renderer: Arc<dyn Renderer> =
        Arc::new(ChromiumRenderer::new(fetch.chromium_path.clone()));
    let state = Arc::new(AppState {
        fetcher: TrackingFetcher::new(renderer, fetch),
    });

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("received shutdown signal");
    };

    rest::start(&server, state, shutdown).await?;

    info!("server stopped");
    Ok(())
}
