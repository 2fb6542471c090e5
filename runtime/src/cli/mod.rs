// Copyright 2026 AWB Tracker Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI subcommand implementations for the `awb-tracker` binary.

pub mod doctor;
pub mod fetch_cmd;
pub mod serve;

use tracing_subscriber::EnvFilter;

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Initialize tracing on stderr. `RUST_LOG` overrides `level`.
pub fn init_tracing(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
