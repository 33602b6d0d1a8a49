//! # Git Client Wrapper
//!
//! Thin, value-returning wrapper around the system `git` binary.
//!
//! This uses the system git command, which automatically handles:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Personal access tokens
//! - Any authentication configured in ~/.gitconfig
//!
//! Every invocation yields a [`GitOutput`] — a nonzero exit or a failure to
//! spawn the process is a value the caller inspects, never a raised error.
//! Mirroring and syncing loop over many repositories and must isolate each
//! one's failure; a result struct keeps those loops free of error-handling
//! machinery.

use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// Outcome of one git invocation.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Whether the process ran and exited zero.
    pub success: bool,
    /// Captured standard output, trimmed.
    pub stdout: String,
    /// Captured standard error, trimmed. Holds the spawn error message when
    /// the process could not be started at all.
    pub stderr: String,
}

/// Run `git` with the given arguments, optionally in a working directory.
pub fn run_git(args: &[&str], cwd: Option<&Path>) -> GitOutput {
    log::debug!(
        "running: git {} (cwd: {})",
        args.join(" "),
        cwd.map_or_else(|| ".".to_string(), |p| p.display().to_string())
    );

    let mut command = Command::new("git");
    command.args(args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    match command.output() {
        Ok(output) => GitOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        },
        Err(e) => GitOutput {
            success: false,
            stdout: String::new(),
            stderr: e.to_string(),
        },
    }
}

/// Check that the system git binary is present and runnable.
///
/// Fatal when it is not: nothing else in the tool can work without it.
pub fn check_git_available() -> Result<()> {
    let output = run_git(&["--version"], None);
    if output.success {
        log::info!("git environment check passed ({})", output.stdout);
        Ok(())
    } else {
        Err(Error::GitUnavailable {
            message: output.stderr,
        })
    }
}

/// Clone `source` (a local path or a remote URL) as a bare mirror at `dest`.
pub fn clone_mirror(source: &str, dest: &Path) -> GitOutput {
    run_git(
        &["clone", "--mirror", source, &dest.display().to_string()],
        None,
    )
}

/// Query the `origin` remote URL of a repository, if it has one.
pub fn remote_url(repo: &Path) -> Option<String> {
    let output = run_git(&["remote", "get-url", "origin"], Some(repo));
    if output.success && !output.stdout.is_empty() {
        Some(output.stdout)
    } else {
        None
    }
}

/// Whether `repo` is a bare repository according to git itself.
pub fn is_bare_repository(repo: &Path) -> bool {
    let output = run_git(&["rev-parse", "--is-bare-repository"], Some(repo));
    output.success && output.stdout == "true"
}

/// Fetch all configured remotes of a repository (`git remote update`).
pub fn remote_update(repo: &Path) -> GitOutput {
    run_git(&["remote", "update"], Some(repo))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn git_present() -> bool {
        run_git(&["--version"], None).success
    }

    #[test]
    fn test_run_git_version_reports_success() {
        if !git_present() {
            eprintln!("skipping: git not installed");
            return;
        }
        let output = run_git(&["--version"], None);
        assert!(output.success);
        assert!(output.stdout.contains("git version"));
    }

    #[test]
    fn test_run_git_bad_subcommand_is_a_value_not_an_error() {
        if !git_present() {
            eprintln!("skipping: git not installed");
            return;
        }
        let output = run_git(&["definitely-not-a-subcommand"], None);
        assert!(!output.success);
        assert!(!output.stderr.is_empty());
    }

    #[test]
    fn test_is_bare_repository_false_for_plain_directory() {
        if !git_present() {
            eprintln!("skipping: git not installed");
            return;
        }
        let temp = tempfile::TempDir::new().unwrap();
        assert!(!is_bare_repository(temp.path()));
    }

    #[test]
    fn test_remote_url_none_for_plain_directory() {
        if !git_present() {
            eprintln!("skipping: git not installed");
            return;
        }
        let temp = tempfile::TempDir::new().unwrap();
        assert_eq!(remote_url(temp.path()), None);
    }
}
