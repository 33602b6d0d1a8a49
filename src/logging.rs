//! # Logging Setup
//!
//! Configures the `log` facade through `env_logger`, from the global
//! `--log-level` and `--log-file` flags. Every record is written to stderr
//! for the console and appended to the log file, through a tee writer
//! installed as the logger's pipe target.
//!
//! Accepted level names are `DEBUG`, `INFO`, `WARN`, `ERROR` and `CRITICAL`;
//! `CRITICAL` maps to error since the `log` facade has no critical level.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Target};
use log::LevelFilter;

use crate::error::Result;

/// Map a CLI level name to a `log` level filter. Unknown names fall back
/// to `Info`, matching the default.
pub fn level_from_str(level: &str) -> LevelFilter {
    match level.to_uppercase().as_str() {
        "DEBUG" => LevelFilter::Debug,
        "INFO" => LevelFilter::Info,
        "WARN" => LevelFilter::Warn,
        "ERROR" | "CRITICAL" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

/// Duplicates formatted log records to stderr and the log file.
struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

/// Initialize logging for the process.
///
/// Opens `log_file` in append mode and installs a global logger writing to
/// both stderr and the file. Fails only if the log file cannot be opened;
/// a logger that is already installed (as happens in tests) is kept.
pub fn init(level: &str, log_file: &Path) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let mut builder = Builder::new();
    builder
        .filter_level(level_from_str(level))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}: {}",
                buf.timestamp_seconds(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(Tee { file })));

    let _ = builder.try_init();
    Ok(())
}
