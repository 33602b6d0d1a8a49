//! # CLI Command Implementations
//!
//! One module per subcommand. Each module contains an `Args` struct derived
//! with `clap` and an `execute` function that orchestrates the library
//! components: precondition checks, directory setup, the per-repository
//! loop, and the final success/failure summary.

pub mod init;
pub mod sync;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;

use zephyr_mirror::error::Error;

/// Ensure `dir` exists, creating it (and parents) if needed.
///
/// Creation failure is fatal: without the mirror directories there is
/// nothing useful the run can do.
pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        log::info!("creating directory: {}", dir.display());
        std::fs::create_dir_all(dir).map_err(|e| Error::CreateDir {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;
    }
    Ok(())
}

/// Collect repeated NAME flags into the skip set, falling back to a default.
pub(crate) fn skip_set(names: Vec<String>, default: HashSet<String>) -> HashSet<String> {
    if names.is_empty() {
        default
    } else {
        names.into_iter().collect()
    }
}

/// The mirror clones live under `<mirror-root>/repos`.
pub(crate) fn repos_dir(mirror_root: &Path) -> PathBuf {
    mirror_root.join(zephyr_mirror::defaults::REPOS_SUBDIR)
}

/// Log the closing tally. The process still exits 0 when some repositories
/// failed: the exit code reports whether the batch ran, the tally reports
/// how it went.
pub(crate) fn log_summary(action: &str, success: usize, total: usize) {
    log::info!("{}", "=".repeat(60));
    log::info!("{} complete", action);
    log::info!("succeeded: {} | failed: {}", success, total - success);
    log::info!("{}", "=".repeat(60));
}
