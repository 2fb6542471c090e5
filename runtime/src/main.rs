// Copyright 2026 AWB Tracker Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use awb_tracker::cli::{self, LogFormat};
use awb_tracker::config::{
    FetchConfig, ServerConfig, CHROMIUM_PATH_ENV, DEFAULT_PORT, TRACKING_URL_BASE,
};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "awb-tracker",
    about = "awb-tracker: shipment tracking events from the carrier's tracking page",
    version,
    after_help = "Run 'awb-tracker <command> --help' for details on each command.\nRun 'awb-tracker' with no command to start the HTTP service."
)]
struct Cli {
    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// Address to bind (all interfaces by default; use 127.0.0.1 for local only)
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        /// Port to listen on
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        #[command(flatten)]
        fetch: FetchArgs,
    },
    /// Fetch tracking details for one AWB id and print them as JSON
    Fetch {
        /// Air waybill id
        awb_id: String,
        #[command(flatten)]
        fetch: FetchArgs,
    },
    /// Check environment and diagnose issues
    Doctor {
        /// Chromium binary to check instead of discovering one
        #[arg(long, env = CHROMIUM_PATH_ENV)]
        chromium_path: Option<PathBuf>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[derive(Args, Clone)]
struct FetchArgs {
    /// Chromium binary (discovered on PATH when omitted)
    #[arg(long, env = CHROMIUM_PATH_ENV)]
    chromium_path: Option<PathBuf>,
    /// Tracking page base URL; the AWB id is appended as a path segment
    #[arg(long, default_value = TRACKING_URL_BASE)]
    tracking_url: String,
    /// How long to wait for the tracking timeline to render
    #[arg(long, default_value_t = 10_000)]
    selector_timeout_ms: u64,
    /// Upper bound on page navigation
    #[arg(long, default_value_t = 30_000)]
    navigation_timeout_ms: u64,
}

impl Default for FetchArgs {
    fn default() -> Self {
        let defaults = FetchConfig::default();
        Self {
            chromium_path: std::env::var_os(CHROMIUM_PATH_ENV).map(PathBuf::from),
            tracking_url: defaults.tracking_url,
            selector_timeout_ms: defaults.selector_timeout.as_millis() as u64,
            navigation_timeout_ms: defaults.navigation_timeout.as_millis() as u64,
        }
    }
}

impl From<FetchArgs> for FetchConfig {
    fn from(args: FetchArgs) -> Self {
        FetchConfig {
            tracking_url: args.tracking_url,
            selector_timeout: Duration::from_millis(args.selector_timeout_ms),
            navigation_timeout: Duration::from_millis(args.navigation_timeout_ms),
            chromium_path: args.chromium_path,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_tracing(&cli.log_level, cli.log_format);

    let result = match cli.command {
        // No subcommand → serve with defaults
        None => cli::serve::run(ServerConfig::default(), FetchArgs::default().into()).await,

        Some(Commands::Serve { host, port, fetch }) => {
            cli::serve::run(ServerConfig { host, port }, fetch.into()).await
        }
        Some(Commands::Fetch { awb_id, fetch }) => cli::fetch_cmd::run(&awb_id, fetch.into()).await,
        Some(Commands::Doctor { chromium_path }) => cli::doctor::run(chromium_path).await,
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "awb-tracker", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        eprintln!("  Error: {e:#}");
        std::process::exit(1);
    }

    result
}
