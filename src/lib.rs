//! # Zephyr Mirror Library
//!
//! This library provides the core functionality for mirroring and
//! synchronizing the Git repositories of a Zephyr workspace. It is used by
//! the `zephyr-mirror` command-line tool but can also be embedded by other
//! tools that need to maintain a set of bare mirror clones.
//!
//! ## Core Concepts
//!
//! - **Manifest resolution (`manifest`)**: Parses a `west.yml` manifest —
//!   remote aliases, a default remote, project entries, nested imports with
//!   allow-lists — into a flat, de-duplicated repository list, either as
//!   full clone URLs or as workspace-local paths.
//! - **Repository discovery (`discover`)**: Recursively scans a directory
//!   tree for Git working copies, stopping descent at each one found.
//! - **Git client (`git`)**: Value-returning wrapper over the system `git`
//!   binary; a failed invocation is data, not an error.
//! - **Mirroring (`mirror`)**: Creates and refreshes bare mirror clones
//!   under `<mirror-root>/repos/<name>.git`, one repository at a time, with
//!   per-repository failure isolation.
//!
//! ## Execution Flow
//!
//! The `init` pipeline resolves or discovers repositories and clones each
//! one as a bare mirror; the `sync` pipeline finds the existing mirrors and
//! fetches all their remotes. Both run strictly sequentially and report a
//! success/failure tally; a single bad repository never aborts the batch.

pub mod defaults;
pub mod discover;
pub mod error;
pub mod git;
pub mod logging;
pub mod manifest;
pub mod mirror;
