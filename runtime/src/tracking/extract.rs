// Copyright 2026 AWB Tracker Contributors
// SPDX-License-Identifier: Apache-2.0

//! Pull tracking events out of the rendered tracking page.
//!
//! Works on a detached `scraper` DOM; no browser is involved once the HTML
//! has been captured.

use super::types::TrackingEvent;
use crate::config::{
    DESCRIPTION_SELECTOR, RELEVANT_STATUSES, ROW_SELECTOR, STATUS_SELECTOR, TIMESTAMP_SELECTOR,
};
use anyhow::Result;
use scraper::{ElementRef, Html, Selector};

/// Compiled selectors for the tracking timeline.
struct TimelineSelectors {
    row: Selector,
    status: Selector,
    description: Selector,
    timestamp: Selector,
}

impl TimelineSelectors {
    fn compile() -> Result<Self> {
        Ok(Self {
            row: compile(ROW_SELECTOR)?,
            status: compile(STATUS_SELECTOR)?,
            description: compile(DESCRIPTION_SELECTOR)?,
            timestamp: compile(TIMESTAMP_SELECTOR)?,
        })
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| anyhow::anyhow!("invalid selector `{selector}`: {e:?}"))
}

/// Parse `html` and return the relevant tracking events in document order.
pub fn extract_tracking_events(html: &str) -> Result<Vec<TrackingEvent>> {
    let rows = extract_rows(html)?;
    Ok(filter_relevant(rows))
}

/// Every complete timeline row, regardless of status.
///
/// A row missing its status, description or timestamp element is skipped.
pub fn extract_rows(html: &str) -> Result<Vec<TrackingEvent>> {
    let selectors = TimelineSelectors::compile()?;
    let document = Html::parse_document(html);

    let rows = document
        .select(&selectors.row)
        .filter_map(|row| {
            Some(TrackingEvent {
                status: first_text(row, &selectors.status)?,
                description: first_text(row, &selectors.description)?,
                timestamp: first_text(row, &selectors.timestamp)?,
            })
        })
        .collect();

    Ok(rows)
}

/// Keep only events whose status is on the allow-list.
pub fn filter_relevant(events: Vec<TrackingEvent>) -> Vec<TrackingEvent> {
    events
        .into_iter()
        .filter(|e| is_relevant_status(&e.status))
        .collect()
}

pub fn is_relevant_status(status: &str) -> bool {
    RELEVANT_STATUSES.contains(&status)
}

/// Trimmed text content of the first descendant matching `selector`.
fn first_text(row: ElementRef<'_>, selector: &Selector) -> Option<String> {
    row.select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}
