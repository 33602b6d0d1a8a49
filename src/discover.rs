//! # Repository Discovery
//!
//! Recursive scan of a directory tree for Git working copies, used by the
//! scan-mode `init`. A directory that directly contains a `.git` directory
//! is a working copy root: it is recorded and its subtree is not descended
//! into, so nested repositories below a found one are not reported.
//! Directories named in the skip set are pruned entirely.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Find all Git working copies under `start`, in filesystem iteration order.
///
/// A missing or non-directory `start` logs a warning and yields an empty
/// list; it is the caller's job to treat an empty result as fatal.
pub fn find_git_repos(start: &Path, skip_dirs: &HashSet<String>) -> Vec<PathBuf> {
    let mut repos = Vec::new();

    if !start.is_dir() {
        log::warn!("scan directory does not exist: {}", start.display());
        return repos;
    }

    let mut walker = WalkDir::new(start).into_iter();
    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("skipping unreadable directory entry: {}", e);
                continue;
            }
        };
        // Depth 0 is `start` itself; only its descendants are candidates.
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if skip_dirs.contains(name.as_ref()) {
            log::debug!("skipping directory: {}", entry.path().display());
            walker.skip_current_dir();
            continue;
        }

        if entry.path().join(".git").is_dir() {
            let repo = std::fs::canonicalize(entry.path())
                .unwrap_or_else(|_| entry.path().to_path_buf());
            log::info!("found Git repository: {}", repo.display());
            repos.push(repo);
            walker.skip_current_dir();
        }
    }

    repos
}
