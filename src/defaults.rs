//! Default values for zephyr-mirror configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::collections::HashSet;
use std::path::PathBuf;

/// Manifest file name looked up at the root and inside imported projects.
pub const MANIFEST_FILE: &str = "west.yml";

/// Subdirectory of the mirror root that holds the bare clones.
pub const REPOS_SUBDIR: &str = "repos";

/// Default log file, created in the current directory.
pub const LOG_FILE: &str = "zephyr-mirror.log";

/// Project path assumed for a nested import when the entry has no `path`.
pub const DEFAULT_IMPORT_PATH: &str = "zephyr";

/// Returns the default mirror root directory: `~/zephyr-mirror`.
///
/// Falls back to `zephyr-mirror` in the current directory if the home
/// directory cannot be determined. Overridden by the `--mirror-root` flag.
pub fn default_mirror_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("zephyr-mirror")
}

/// Directory names never descended into during a filesystem scan.
///
/// Covers VCS metadata, west's bookkeeping directory, and the build output
/// trees commonly present in a Zephyr workspace.
pub fn default_skip_dirs() -> HashSet<String> {
    [".git", ".west", "build", "twister-out", "__pycache__", "node_modules"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mirror_root_ends_with_zephyr_mirror() {
        let root = default_mirror_root();
        assert!(root.ends_with("zephyr-mirror"));
    }

    #[test]
    fn test_default_skip_dirs_contains_vcs_metadata() {
        let skip = default_skip_dirs();
        assert!(skip.contains(".git"));
        assert!(skip.contains(".west"));
        assert!(skip.contains("build"));
    }
}
