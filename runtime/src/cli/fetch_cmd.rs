// Copyright 2026 AWB Tracker Contributors
// SPDX-License-Identifier: Apache-2.0

//! `awb-tracker fetch <awb_id>`: run one tracking fetch and print JSON.

use crate::config::FetchConfig;
use crate::renderer::chromium::ChromiumRenderer;
use crate::tracking::TrackingFetcher;
use anyhow::{bail, Result};
use std::sync::Arc;

/// Print the response body the HTTP endpoint would return.
pub async fn run(awb_id: &str, fetch: FetchConfig) -> Result<()> {
    let renderer = Arc::new(ChromiumRenderer::new(fetch.chromium_path.clone()));
    let fetcher = TrackingFetcher::new(renderer, fetch);

    match fetcher.fetch(Some(awb_id)).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(e) => {
            println!("{}", serde_json::to_string_pretty(&e.to_json())?);
            bail!(e)
        }
    }
}
