//! Shared test utilities for CLI end-to-end tests.
//!
//! Add `mod common;` to a test file, then `use common::prelude::*;`.
//! Tests that exercise real clones and fetches call [`git_available`] first
//! and return early when no `git` binary is installed.

use std::path::Path;
use std::process::Command;

use assert_fs::prelude::*;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{git, git_available, WorkspaceFixture};
}

/// True when a runnable `git` binary is on the PATH.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Run git during test setup, panicking on failure.
#[allow(dead_code)]
pub fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// A temporary directory laid out like a Zephyr workspace root, i.e. with
/// the `.west/` and `zephyr/` marker directories `init` requires.
pub struct WorkspaceFixture {
    pub temp: assert_fs::TempDir,
}

#[allow(dead_code)]
impl WorkspaceFixture {
    pub fn new() -> Self {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child(".west").create_dir_all().unwrap();
        temp.child("zephyr").create_dir_all().unwrap();
        Self { temp }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Create an (empty) Git working copy at `relative`.
    pub fn add_repo(&self, relative: &str) {
        let dir = self.temp.child(relative);
        dir.create_dir_all().unwrap();
        git(dir.path(), &["init", "--quiet"]);
    }

    /// The mirror root used by tests, inside the fixture.
    pub fn mirror_root(&self) -> std::path::PathBuf {
        self.temp.path().join("mirror")
    }
}
