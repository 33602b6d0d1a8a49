//! # Zephyr Mirror CLI
//!
//! This is the binary entry point for the `zephyr-mirror` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Installing the interrupt handler (a user interrupt exits 0, it is not
//!   an error).
//! - Executing the appropriate command based on the parsed arguments.
//!
//! The core logic lives in the `zephyr_mirror` library crate; the binary is
//! a thin wrapper around it. A fatal error returned from a command reaches
//! `main`'s `Result` and terminates the process with exit code 1.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    ctrlc::set_handler(|| {
        log::warn!("interrupted by user");
        std::process::exit(0);
    })?;

    let cli = cli::Cli::parse();
    cli.execute()
}
