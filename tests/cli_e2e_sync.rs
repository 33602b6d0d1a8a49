//! End-to-end tests for the `sync` subcommand: candidate discovery,
//! `--skip-repos`, and failure isolation for non-bare directories.

mod common;
use common::prelude::*;

use std::fs;
use std::path::Path;

/// Create a bare repository named `<name>.git` under `repos_dir`.
fn make_bare(repos_dir: &Path, name: &str) {
    fs::create_dir_all(repos_dir).unwrap();
    common::git(repos_dir, &["init", "--bare", "--quiet", &format!("{}.git", name)]);
}

/// Sync runs over every bare repository in the mirror directory.
#[test]
fn test_sync_all_mirrors() {
    if !git_available() {
        eprintln!("skipping: git not installed");
        return;
    }
    let temp = assert_fs::TempDir::new().unwrap();
    let mirror_root = temp.path().join("mirror");
    let repos = mirror_root.join("repos");
    make_bare(&repos, "a");
    make_bare(&repos, "b");

    let mut cmd = cargo_bin_cmd!("zephyr-mirror");

    cmd.current_dir(temp.path())
        .arg("sync")
        .arg("--mirror-root")
        .arg(&mirror_root)
        .assert()
        .code(0)
        .stderr(predicate::str::contains("found 2 bare repositories"))
        .stderr(predicate::str::contains("succeeded: 2 | failed: 0"));
}

/// `--skip-repos` excludes mirrors by name: with `b.git` skipped, exactly
/// one fetch is attempted, against `a.git`.
#[test]
fn test_sync_skip_repos() {
    if !git_available() {
        eprintln!("skipping: git not installed");
        return;
    }
    let temp = assert_fs::TempDir::new().unwrap();
    let mirror_root = temp.path().join("mirror");
    let repos = mirror_root.join("repos");
    make_bare(&repos, "a");
    make_bare(&repos, "b");

    let mut cmd = cargo_bin_cmd!("zephyr-mirror");

    cmd.current_dir(temp.path())
        .arg("sync")
        .arg("--mirror-root")
        .arg(&mirror_root)
        .arg("--skip-repos")
        .arg("b.git")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("found 1 bare repositories"))
        .stderr(predicate::str::contains("a.git"))
        .stderr(predicate::str::contains("b.git").not());
}

/// A directory that merely ends in `.git` fails its check but does not
/// abort the rest of the batch.
#[test]
fn test_sync_non_bare_candidate_is_isolated_failure() {
    if !git_available() {
        eprintln!("skipping: git not installed");
        return;
    }
    let temp = assert_fs::TempDir::new().unwrap();
    let mirror_root = temp.path().join("mirror");
    let repos = mirror_root.join("repos");
    make_bare(&repos, "good");
    fs::create_dir_all(repos.join("fake.git")).unwrap();

    let mut cmd = cargo_bin_cmd!("zephyr-mirror");

    cmd.current_dir(temp.path())
        .arg("sync")
        .arg("--mirror-root")
        .arg(&mirror_root)
        .assert()
        .code(0)
        .stderr(predicate::str::contains("is not a valid bare repository"))
        .stderr(predicate::str::contains("succeeded: 1 | failed: 1"));
}

/// End-to-end round trip: mirror a workspace, then sync the mirror after
/// the upstream gains a commit.
#[test]
fn test_sync_after_init_fetches_updates() {
    if !git_available() {
        eprintln!("skipping: git not installed");
        return;
    }
    let fixture = WorkspaceFixture::new();
    fixture.add_repo("app");
    let app = fixture.path().join("app");
    common::git(&app, &["-c", "user.name=t", "-c", "user.email=t@example.com", "commit", "--allow-empty", "-m", "first", "--quiet"]);

    let mut init = cargo_bin_cmd!("zephyr-mirror");
    init.current_dir(fixture.path())
        .arg("init")
        .arg("--mirror-root")
        .arg(fixture.mirror_root())
        .assert()
        .code(0);

    common::git(&app, &["-c", "user.name=t", "-c", "user.email=t@example.com", "commit", "--allow-empty", "-m", "second", "--quiet"]);

    let mut sync = cargo_bin_cmd!("zephyr-mirror");
    sync.current_dir(fixture.path())
        .arg("sync")
        .arg("--mirror-root")
        .arg(fixture.mirror_root())
        .assert()
        .code(0)
        .stderr(predicate::str::contains("succeeded: 1 | failed: 0"));
}
