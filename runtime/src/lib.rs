// Copyright 2026 AWB Tracker Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shipment tracking adapter.
//!
//! Renders a carrier's tracking page in headless Chromium, extracts the
//! status timeline from the rendered DOM and serves it over HTTP.

pub mod cli;
pub mod config;
pub mod error;
pub mod renderer;
pub mod rest;
pub mod tracking;
