// Copyright 2026 AWB Tracker Contributors
// SPDX-License-Identifier: Apache-2.0

//! Environment readiness check.

use crate::config::CHROMIUM_PATH_ENV;
use crate::renderer::chromium::find_chromium;
use anyhow::Result;
use std::path::PathBuf;

/// Check that a Chromium binary is available.
pub async fn run(explicit: Option<PathBuf>) -> Result<()> {
    println!("awb-tracker doctor");
    println!("==================");
    println!();

    println!("OS:   {}", std::env::consts::OS);
    println!("Arch: {}", std::env::consts::ARCH);
    println!();

    let chromium = match explicit {
        Some(path) if path.exists() => Some(path),
        Some(path) => {
            println!("[!!] --chromium-path does not exist: {}", path.display());
            None
        }
        None => find_chromium(),
    };

    match &chromium {
        Some(path) => println!("[OK] Chromium found: {}", path.display()),
        None => println!(
            "[!!] Chromium NOT found. Install Chrome/Chromium or set {CHROMIUM_PATH_ENV}."
        ),
    }

    println!();
    if chromium.is_some() {
        println!("Status: READY");
    } else {
        println!("Status: NOT READY");
    }

    Ok(())
}
