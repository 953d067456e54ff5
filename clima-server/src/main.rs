//! Binary crate for the `clima` HTTP service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Loading configuration
//! - Starting the server

use clap::Parser;
use clima_server::telemetry::init_tracing;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    init_tracing("info");
    cmd.run().await
}
