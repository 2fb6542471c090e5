// Copyright 2026 AWB Tracker Contributors
// SPDX-License-Identifier: Apache-2.0

//! Request and response shapes for the tracking endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /get-tracking-details`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackingRequest {
    #[serde(default)]
    pub awb_id: Option<Value>,
}

impl TrackingRequest {
    pub fn new(awb_id: impl Into<String>) -> Self {
        Self {
            awb_id: Some(Value::String(awb_id.into())),
        }
    }

    /// Read a decoded request body. Only a JSON object can carry an id;
    /// arrays, strings and other scalars yield an empty request.
    pub fn from_json(body: &Value) -> Self {
        Self {
            awb_id: body.as_object().and_then(|o| o.get("awb_id")).cloned(),
        }
    }

    /// The AWB id, if one was supplied.
    ///
    /// Strings are taken as-is and numbers in their shortest decimal form
    /// (`1e3` is `"1000"`). `null`, `""`, `false`, `0` and anything else
    /// count as missing.
    pub fn awb_id(&self) -> Option<String> {
        match self.awb_id.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => number_id(n),
            _ => None,
        }
    }
}

fn number_id(n: &serde_json::Number) -> Option<String> {
    if let Some(i) = n.as_i64() {
        return (i != 0).then(|| i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.to_string());
    }
    // f64's Display drops a zero fraction: 1000.0 prints as "1000".
    let f = n.as_f64()?;
    (f != 0.0 && f.is_finite()).then(|| f.to_string())
}

/// One row of the carrier's tracking timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub status: String,
    pub description: String,
    pub timestamp: String,
}

/// Relevant tracking events in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingResponse {
    #[serde(rename = "trackingDetails")]
    pub tracking_details: Vec<TrackingEvent>,
}
