//! # Mirror Writing and Synchronization
//!
//! Produces bare mirror clones under the mirror `repos` directory and
//! refreshes existing ones. All per-repository operations return a bool:
//! one repository failing must never abort the batch, so failures are
//! logged and counted by the caller, not propagated.
//!
//! Mirror naming: a mirror is `<name>.git`. In scan mode the name is derived
//! from the source directory's base name, prefixed with `hal_` when "hal"
//! appears anywhere in the source path (case-insensitive) — vendor HAL
//! repositories commonly share base names and would otherwise collide.
//! Manifest modes use the manifest project name directly.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::git;

/// Derive the mirror name for a scanned working copy.
pub fn mirror_name(source: &Path) -> String {
    let base = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    if source.to_string_lossy().to_lowercase().contains("hal") {
        format!("hal_{}", base)
    } else {
        base
    }
}

/// Mirror a scanned working copy, deriving the mirror name from its path.
///
/// No pre-delete here: if the target already exists, git's own clone fails
/// and the failure is reported like any other.
pub fn mirror_scanned_repo(source: &Path, repos_dir: &Path) -> bool {
    let name = mirror_name(source);
    clone_into(&source.display().to_string(), repos_dir, &name)
}

/// Mirror a repository under an explicit name. `source` may be a working
/// copy path or a remote URL.
///
/// An existing mirror of the same name is removed first (best-effort) so the
/// clone always starts from scratch.
pub fn mirror_named_repo(source: &str, repos_dir: &Path, name: &str) -> bool {
    let dest = repos_dir.join(format!("{}.git", name));
    if dest.exists() {
        log::info!("mirror already exists, recreating: {}", dest.display());
        if let Err(e) = fs::remove_dir_all(&dest) {
            log::warn!("failed to remove old mirror {}: {}", dest.display(), e);
        }
    }
    clone_into(source, repos_dir, name)
}

fn clone_into(source: &str, repos_dir: &Path, name: &str) -> bool {
    let dest = repos_dir.join(format!("{}.git", name));
    log::info!(
        "creating mirror | source: {} | destination: {}",
        source,
        dest.display()
    );

    let output = git::clone_mirror(source, &dest);
    if output.success {
        if !output.stdout.is_empty() {
            log::debug!("{} clone output: {}", name, output.stdout);
        }
        log::info!(
            "✅ mirror created | source: {} | destination: {}",
            source,
            dest.display()
        );
        true
    } else {
        log::error!(
            "❌ mirror failed | source: {} | destination: {}",
            source,
            dest.display()
        );
        if !output.stderr.is_empty() {
            log::error!("error detail | repository: {} | {}", name, output.stderr);
        }
        false
    }
}

/// List the sync candidates in a mirror directory: every immediate
/// subdirectory named `*.git` that is not in the skip set.
pub fn find_bare_repos(repos_dir: &Path, skip_repos: &HashSet<String>) -> Vec<PathBuf> {
    let mut repos = Vec::new();

    let entries = match fs::read_dir(repos_dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::error!(
                "mirror directory not readable: {}: {}",
                repos_dir.display(),
                e
            );
            return repos;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();
        if !path.is_dir() || !name.ends_with(".git") {
            continue;
        }
        if skip_repos.contains(&name) {
            log::debug!("skipping repository: {}", name);
            continue;
        }
        log::debug!("found bare repository: {}", name);
        repos.push(path);
    }

    repos
}

/// Fetch all configured remotes of one mirror.
///
/// The candidate is verified to be a bare repository first; a directory that
/// merely ends in `.git` is a failure, not a fetch target.
pub fn sync_repo(repo: &Path) -> bool {
    let name = repo
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let origin = git::remote_url(repo).unwrap_or_else(|| "unknown remote".to_string());
    log::info!(
        "syncing mirror | local: {} | remote: {}",
        repo.display(),
        origin
    );

    if !git::is_bare_repository(repo) {
        log::error!("❌ {} is not a valid bare repository", name);
        return false;
    }

    let output = git::remote_update(repo);
    if output.success {
        if output.stdout.is_empty() {
            log::info!("✅ {} already up to date", name);
        } else {
            log::info!("{} sync report: {}", name, output.stdout);
        }
        true
    } else {
        log::error!("❌ {} sync failed", name);
        if !output.stderr.is_empty() {
            log::error!("error detail: {}", output.stderr);
        }
        false
    }
}
