//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use zephyr_mirror::{defaults, logging};

use crate::commands;

/// Zephyr Mirror - Mirror and synchronize the Git repositories of a Zephyr workspace
#[derive(Parser, Debug)]
#[command(name = "zephyr-mirror")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (DEBUG, INFO, WARN, ERROR, CRITICAL)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "INFO")]
    log_level: String,

    /// Log file path (records are appended)
    #[arg(long, global = true, value_name = "PATH", default_value = defaults::LOG_FILE)]
    log_file: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize the local mirror (directory scan or west.yml resolution)
    Init(commands::init::InitArgs),

    /// Synchronize existing mirrors with their remotes
    Sync(commands::sync::SyncArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        logging::init(&self.log_level, &self.log_file)?;

        match self.command {
            Commands::Init(args) => commands::init::execute(args),
            Commands::Sync(args) => commands::sync::execute(args),
        }
    }
}
