//! # Sync Command Implementation
//!
//! Refreshes an existing mirror: every immediate `<name>.git` subdirectory
//! of the mirror's `repos` directory (minus `--skip-repos`) is verified to
//! be a bare repository and gets a `git remote update`. Failures are
//! per-repository; the batch always runs to completion.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use zephyr_mirror::error::Error;
use zephyr_mirror::{defaults, git, mirror};

use super::{ensure_dir, log_summary, repos_dir};

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Mirror root directory (default: ~/zephyr-mirror)
    #[arg(long, value_name = "DIR")]
    pub mirror_root: Option<PathBuf>,

    /// Mirror names (e.g. old_repo.git) excluded from the sync
    #[arg(long, value_name = "NAME", num_args = 1..)]
    pub skip_repos: Vec<String>,
}

/// Execute the `sync` command.
pub fn execute(args: SyncArgs) -> Result<()> {
    log::info!("{}", "=".repeat(60));
    log::info!("synchronizing Zephyr local mirror");

    let mirror_root = args
        .mirror_root
        .unwrap_or_else(defaults::default_mirror_root);
    let repos = repos_dir(&mirror_root);
    ensure_dir(&mirror_root)?;
    ensure_dir(&repos)?;
    log::info!("mirror directory: {}", repos.display());

    git::check_git_available()?;

    let skip: HashSet<String> = args.skip_repos.into_iter().collect();
    let candidates = mirror::find_bare_repos(&repos, &skip);
    if candidates.is_empty() {
        return Err(Error::NoRepositories {
            context: format!("no bare repositories to sync in {}", repos.display()),
        }
        .into());
    }
    log::info!("found {} bare repositories to sync", candidates.len());

    let mut success = 0;
    for repo in &candidates {
        if mirror::sync_repo(repo) {
            success += 1;
        }
    }

    log_summary("mirror synchronization", success, candidates.len());
    Ok(())
}
