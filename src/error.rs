//! # Error Handling
//!
//! Centralized error type for the `zephyr-mirror` library, built with
//! `thiserror`. Only *fatal* conditions are represented here — the wrong
//! working directory, a missing `git` binary, an unreadable root manifest,
//! a directory that cannot be created, an empty repository set. These abort
//! the whole run with a nonzero exit.
//!
//! Per-repository failures (a clone or fetch that fails, a manifest entry
//! with no usable remote, a missing nested manifest) are deliberately *not*
//! errors: they are logged, counted, and the batch continues. The git
//! wrapper in [`crate::git`] returns a plain result value for the same
//! reason.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for zephyr-mirror operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The current directory is not a Zephyr workspace root.
    ///
    /// `init` must run where both `.west/` and `zephyr/` exist; `missing`
    /// names the marker directory that was not found.
    #[error("not a Zephyr workspace root: {} (missing '{missing}')", path.display())]
    NotProjectRoot { path: PathBuf, missing: String },

    /// The system `git` binary could not be executed.
    #[error("git is not available: {message}")]
    GitUnavailable { message: String },

    /// The root manifest file does not exist or is not a file.
    #[error("manifest file not found: {}", path.display())]
    ManifestNotFound { path: PathBuf },

    /// The root manifest could not be parsed as a west manifest document.
    #[error("failed to parse manifest {}: {message}", path.display())]
    ManifestParse { path: PathBuf, message: String },

    /// A required output directory could not be created.
    #[error("failed to create directory {}: {message}", path.display())]
    CreateDir { path: PathBuf, message: String },

    /// Discovery or resolution produced zero repositories.
    #[error("no repositories found: {context}")]
    NoRepositories { context: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_project_root() {
        let error = Error::NotProjectRoot {
            path: PathBuf::from("/tmp/somewhere"),
            missing: ".west".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("not a Zephyr workspace root"));
        assert!(display.contains("/tmp/somewhere"));
        assert!(display.contains(".west"));
    }

    #[test]
    fn test_error_display_manifest_parse() {
        let error = Error::ManifestParse {
            path: PathBuf::from("west.yml"),
            message: "mapping expected".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("west.yml"));
        assert!(display.contains("mapping expected"));
    }

    #[test]
    fn test_error_display_no_repositories() {
        let error = Error::NoRepositories {
            context: "directory scan found no Git repositories".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("no repositories found"));
        assert!(display.contains("directory scan"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: Error = io_error.into();
        let display = format!("{}", error);
        assert!(display.contains("I/O error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_from_yaml_error() {
        let yaml_error =
            serde_yaml::from_str::<serde_yaml::Value>("invalid: [unclosed").unwrap_err();
        let error: Error = yaml_error.into();
        let display = format!("{}", error);
        assert!(display.contains("YAML parsing error"));
    }
}
