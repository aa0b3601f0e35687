//! # Seedbed
//!
//! Headless front end for the Seedbed garden simulation.
//!
//! This binary ties together:
//! - Configuration loaded from TOML
//! - Logging through `tracing`
//! - A line-oriented command loop driving one simulation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod app;
mod config;
mod render;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Main entry point.
fn main() -> Result<()> {
    // stdout carries command output; logs go to stderr
    let json_logs = std::env::var("SEEDBED_LOG_FORMAT").is_ok_and(|v| v == "json");
    tracing_subscriber::registry()
        .with(json_logs.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json_logs).then(|| fmt::layer().with_writer(std::io::stderr)))
        .with(EnvFilter::from_default_env().add_directive("seedbed=info".parse()?))
        .init();

    info!("Seedbed starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    app::run()?;

    info!("Seedbed shutdown complete");
    Ok(())
}
