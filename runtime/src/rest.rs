// Copyright 2026 AWB Tracker Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP REST API.
//!
//! `POST /get-tracking-details` runs one tracking fetch per request;
//! `GET /health` is a liveness probe that never touches a browser.

use crate::config::ServerConfig;
use crate::error::TrackingError;
use crate::tracking::{TrackingFetcher, TrackingRequest, TrackingResponse};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// State shared by all handlers.
pub struct AppState {
    pub fetcher: TrackingFetcher,
}

/// Build the axum Router with all REST endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/get-tracking-details", post(handle_tracking_details))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the REST API server and serve until `shutdown` resolves.
pub async fn start(
    config: &ServerConfig,
    state: Arc<AppState>,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let app = router(state);
    let addr = config.addr();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {addr}: {e}"))?;
    tracing::info!("Server is running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

// ── Handlers ────────────────────────────────────────────────────

async fn health() -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// A body that is missing or not a JSON object is treated like a request
/// without an AWB id.
async fn handle_tracking_details(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TrackingResponse>, TrackingError> {
    let request = match body {
        Ok(Json(value)) => TrackingRequest::from_json(&value),
        Err(rejection) => {
            tracing::debug!("unreadable tracking request body: {rejection}");
            TrackingRequest::default()
        }
    };

    state.fetcher.handle(&request).await.map(Json)
}
