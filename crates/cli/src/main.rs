//! gxwf - Galaxy workflow client
//!
//! A command-line interface for listing, aliasing and invoking workflows on
//! Galaxy servers.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use gxwf::commands::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // --debug overrides RUST_LOG for our own crates
    let filter = if cli.debug {
        EnvFilter::new("gxwf=debug,gxwf_core=debug,gxwf_galaxy=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Runs on a worker thread, so it fires even while a prompt blocks
    tokio::spawn(async {
        if let Some(code) = commands::wait_for_interrupt(tokio::signal::ctrl_c()).await {
            tracing::debug!(%code, "interrupted");
            std::process::exit(code.as_i32());
        }
    });

    let exit_code = commands::execute(cli).await;
    tracing::debug!(%exit_code, "finished");

    std::process::exit(exit_code.as_i32());
}
