// Copyright 2026 AWB Tracker Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error type surfaced by the tracking fetcher.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Message returned when the caller omits the AWB id.
pub const MISSING_AWB_ID_MESSAGE: &str = "AWB ID is required";

/// Top-level message for any downstream failure.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch tracking details";

/// All errors a tracking fetch can produce.
#[derive(thiserror::Error, Debug)]
pub enum TrackingError {
    /// The request carried no usable `awb_id`.
    #[error("AWB ID is required")]
    MissingAwbId,

    /// Launch, navigation, selector wait, capture or parsing failed.
    /// Carries the underlying message.
    #[error("Failed to fetch tracking details: {0}")]
    Fetch(String),
}

impl TrackingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TrackingError::MissingAwbId => StatusCode::BAD_REQUEST,
            TrackingError::Fetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The JSON body sent back to the client.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            TrackingError::MissingAwbId => json!({ "error": MISSING_AWB_ID_MESSAGE }),
            TrackingError::Fetch(details) => json!({
                "error": FETCH_FAILED_MESSAGE,
                "details": details,
            }),
        }
    }
}

impl From<anyhow::Error> for TrackingError {
    fn from(e: anyhow::Error) -> Self {
        TrackingError::Fetch(format!("{e:#}"))
    }
}

impl IntoResponse for TrackingError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

pub type TrackingResult<T> = Result<T, TrackingError>;
