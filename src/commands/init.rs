//! # Init Command Implementation
//!
//! Builds the local mirror from scratch, in one of three modes:
//!
//! - **Scan mode** (default): recursively search the current directory for
//!   Git working copies and mirror each one, deriving mirror names from the
//!   source paths.
//! - **Manifest mode** (`--west-yml PATH`): resolve the manifest into full
//!   remote URLs (remotes table, default remote, nested imports) and clone
//!   each URL under its manifest name.
//! - **Manifest local mode** (`--west-yml PATH --local`): map the manifest's
//!   projects to their working-copy paths in the workspace and mirror those
//!   instead of hitting the network.
//!
//! `init` must run at a Zephyr workspace root (both `.west/` and `zephyr/`
//! present). Preconditions are fatal; individual repository failures are
//! logged, counted, and skipped.

use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use zephyr_mirror::error::Error;
use zephyr_mirror::{defaults, discover, git, manifest, mirror};

use super::{ensure_dir, log_summary, repos_dir, skip_set};

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Resolve repositories from this west.yml instead of scanning the
    /// current directory
    #[arg(long, value_name = "PATH")]
    pub west_yml: Option<PathBuf>,

    /// With --west-yml: mirror the local working copies named by the
    /// manifest instead of cloning from the remote URLs
    #[arg(long, requires = "west_yml")]
    pub local: bool,

    /// Mirror root directory (default: ~/zephyr-mirror)
    #[arg(long, value_name = "DIR")]
    pub mirror_root: Option<PathBuf>,

    /// Remove the existing mirror directory before cloning
    #[arg(long)]
    pub clean_old: bool,

    /// Directory names skipped during the scan
    #[arg(long, value_name = "NAME", num_args = 1..)]
    pub skip_dirs: Vec<String>,
}

/// Execute the `init` command.
pub fn execute(args: InitArgs) -> Result<()> {
    log::info!("{}", "=".repeat(60));
    log::info!("initializing Zephyr local mirror");

    let cwd = env::current_dir()?;
    check_project_root(&cwd)?;
    git::check_git_available()?;

    let mirror_root = args
        .mirror_root
        .unwrap_or_else(defaults::default_mirror_root);
    let repos = repos_dir(&mirror_root);

    if args.clean_old && repos.exists() {
        log::warn!("removing old mirror directory: {}", repos.display());
        if let Err(e) = std::fs::remove_dir_all(&repos) {
            log::warn!("failed to remove old mirror directory: {}", e);
        }
    }
    ensure_dir(&mirror_root)?;
    ensure_dir(&repos)?;
    log::info!("mirror output directory: {}", repos.display());

    let (success, total) = match &args.west_yml {
        Some(path) if args.local => init_from_manifest_local(path, &repos)?,
        Some(path) => init_from_manifest_remote(path, &repos)?,
        None => {
            let skip = skip_set(args.skip_dirs, defaults::default_skip_dirs());
            init_from_scan(&cwd, &skip, &repos)?
        }
    };

    log_summary("mirror initialization", success, total);
    log::info!("mirrors stored in: {}", repos.display());
    Ok(())
}

/// `init` only makes sense at a workspace root; anywhere else the scan and
/// the manifest paths would be meaningless.
fn check_project_root(cwd: &Path) -> Result<()> {
    for marker in [".west", "zephyr"] {
        if !cwd.join(marker).is_dir() {
            return Err(Error::NotProjectRoot {
                path: cwd.to_path_buf(),
                missing: marker.to_string(),
            }
            .into());
        }
    }
    log::info!("confirmed Zephyr workspace root: {}", cwd.display());
    Ok(())
}

fn init_from_manifest_remote(west_yml: &Path, repos: &Path) -> Result<(usize, usize)> {
    log::info!("mode: west.yml resolution | manifest: {}", west_yml.display());

    let projects = manifest::resolve_remote(west_yml)?;
    if projects.is_empty() {
        return Err(Error::NoRepositories {
            context: format!("nothing resolved from {}", west_yml.display()),
        }
        .into());
    }

    let mut success = 0;
    for project in &projects {
        if mirror::mirror_named_repo(&project.url, repos, &project.name) {
            success += 1;
        }
    }
    Ok((success, projects.len()))
}

fn init_from_manifest_local(west_yml: &Path, repos: &Path) -> Result<(usize, usize)> {
    log::info!(
        "mode: west.yml resolution (local paths) | manifest: {}",
        west_yml.display()
    );

    let projects = manifest::resolve_local(west_yml)?;
    if projects.is_empty() {
        return Err(Error::NoRepositories {
            context: format!("nothing resolved from {}", west_yml.display()),
        }
        .into());
    }

    let mut success = 0;
    for project in &projects {
        if !project.path.join(".git").exists() {
            log::warn!(
                "local repository missing or not a working copy: {}",
                project.path.display()
            );
            continue;
        }
        if mirror::mirror_named_repo(
            &project.path.display().to_string(),
            repos,
            &project.name,
        ) {
            success += 1;
        }
    }
    Ok((success, projects.len()))
}

fn init_from_scan(
    start: &Path,
    skip_dirs: &HashSet<String>,
    repos: &Path,
) -> Result<(usize, usize)> {
    log::info!("mode: directory scan | start: {}", start.display());

    let found = discover::find_git_repos(start, skip_dirs);
    if found.is_empty() {
        return Err(Error::NoRepositories {
            context: format!("directory scan found no Git repositories under {}", start.display()),
        }
        .into());
    }
    log::info!("found {} Git repositories to mirror", found.len());

    let mut success = 0;
    for repo in &found {
        if mirror::mirror_scanned_repo(repo, repos) {
            success += 1;
        }
    }
    Ok((success, found.len()))
}
