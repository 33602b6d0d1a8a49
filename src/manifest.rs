//! # Manifest Resolution
//!
//! Parses a west manifest (`west.yml`) and flattens it into the list of
//! repositories to mirror. Two passes exist over the same document shape:
//!
//! - [`resolve_remote`] composes full Git URLs from the manifest's remote
//!   table, following nested imports depth-first in document order. This is
//!   the mode used to mirror straight from the upstream servers.
//! - [`resolve_local`] maps each project to its working-copy path inside the
//!   workspace, ignoring remotes and imports. This is the mode used to mirror
//!   from already checked-out trees.
//!
//! ## Resolution rules
//!
//! A project's effective remote is, in priority order: its own `remote`
//! field, the remote inherited from the importing parent entry, the
//! document's default remote. An entry with no resolvable remote, or one
//! naming a remote absent from the table, is skipped with a warning — never
//! a fatal error. Project names are unique across the whole walk: the first
//! occurrence (pre-order, parent document before its imports) wins and later
//! duplicates are dropped silently, imports included.
//!
//! An `import` mapping on an entry pulls in `<path>/west.yml` relative to
//! the *root* document's directory (defaulting the path to `zephyr`). Its
//! `name-allowlist` restricts which nested entries are considered; an empty
//! or absent allow-list imports everything. A nested manifest that is
//! missing or malformed logs a warning and the walk continues.
//!
//! Only the root document failing to read or parse is fatal.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::defaults;
use crate::error::{Error, Result};

/// A repository resolved to a full remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteProject {
    /// Manifest project name; the mirror is named `<name>.git`.
    pub name: String,
    /// The remote alias the URL was composed from.
    pub remote: String,
    /// Full clone URL: `<url-base>/<repo-path>.git`.
    pub url: String,
}

/// A repository resolved to a working-copy path inside the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalProject {
    /// Manifest project name; the mirror is named `<name>.git`.
    pub name: String,
    /// Workspace-relative path of the working copy.
    pub path: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Document {
    manifest: ManifestSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ManifestSection {
    remotes: Vec<RemoteEntry>,
    #[serde(rename = "default-remote")]
    default_remote: Option<String>,
    defaults: DefaultsSection,
    /// Kept as raw values so one malformed entry is skipped, not fatal.
    projects: Vec<serde_yaml::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DefaultsSection {
    remote: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RemoteEntry {
    name: Option<String>,
    #[serde(rename = "url-base")]
    url_base: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProjectEntry {
    name: Option<String>,
    remote: Option<String>,
    #[serde(rename = "repo-path")]
    repo_path: Option<String>,
    path: Option<String>,
    import: Option<ImportValue>,
}

/// west allows `import: true` and `import: <file>` forms as well; only the
/// mapping form with an optional allow-list participates in resolution.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImportValue {
    Spec(ImportSpec),
    Other(serde_yaml::Value),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ImportSpec {
    #[serde(rename = "name-allowlist")]
    name_allowlist: Vec<String>,
}

/// Accumulator threaded through the recursive walk: the ordered output and
/// the names already emitted, shared across root and imported documents.
#[derive(Debug, Default)]
struct ResolveAcc {
    seen: HashSet<String>,
    resolved: Vec<RemoteProject>,
}

/// Resolve a manifest into remote-URL repositories.
///
/// Fatal only if the root document cannot be read or parsed; every per-entry
/// problem is logged and skipped.
pub fn resolve_remote(manifest_path: &Path) -> Result<Vec<RemoteProject>> {
    let section = load_manifest(manifest_path)?;

    let mut remotes: HashMap<String, String> = HashMap::new();
    for remote in &section.remotes {
        if let (Some(name), Some(url_base)) = (&remote.name, &remote.url_base) {
            remotes.insert(name.clone(), url_base.clone());
        }
    }
    // The original tool reads `default-remote`; upstream west puts it under
    // `defaults: {remote}`. Accept both, the former taking precedence.
    let default_remote = section
        .default_remote
        .clone()
        .or_else(|| section.defaults.remote.clone());
    log::debug!(
        "manifest remotes: {:?} | default remote: {:?}",
        remotes.keys().collect::<Vec<_>>(),
        default_remote
    );

    let root_dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));
    let mut acc = ResolveAcc::default();
    walk_projects(
        &section.projects,
        None,
        &remotes,
        default_remote.as_deref(),
        root_dir,
        &mut acc,
    );

    log::info!(
        "resolved {} repositories from {}",
        acc.resolved.len(),
        manifest_path.display()
    );
    for project in &acc.resolved {
        log::info!(
            "repository: {} | remote: {} | url: {}",
            project.name,
            project.remote,
            project.url
        );
    }
    Ok(acc.resolved)
}

/// Resolve a manifest into workspace-local repository paths.
///
/// The local variant consults neither the remote table nor imports; it maps
/// each top-level project to `path` (falling back to `name`). The same
/// missing-name and first-wins rules apply as in [`resolve_remote`].
pub fn resolve_local(manifest_path: &Path) -> Result<Vec<LocalProject>> {
    let section = load_manifest(manifest_path)?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut projects = Vec::new();
    for value in &section.projects {
        let entry = match deserialize_entry(value) {
            Some(entry) => entry,
            None => continue,
        };
        let name = match valid_name(&entry) {
            Some(name) => name,
            None => continue,
        };
        if !seen.insert(name.clone()) {
            continue;
        }
        let path = PathBuf::from(entry.path.as_deref().unwrap_or(&name));
        log::debug!("project: {} | path: {}", name, path.display());
        projects.push(LocalProject { name, path });
    }

    log::info!(
        "resolved {} projects from {}",
        projects.len(),
        manifest_path.display()
    );
    Ok(projects)
}

fn load_manifest(manifest_path: &Path) -> Result<ManifestSection> {
    if !manifest_path.is_file() {
        return Err(Error::ManifestNotFound {
            path: manifest_path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(manifest_path)?;
    let document: Document =
        serde_yaml::from_str(&text).map_err(|e| Error::ManifestParse {
            path: manifest_path.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok(document.manifest)
}

fn deserialize_entry(value: &serde_yaml::Value) -> Option<ProjectEntry> {
    match serde_yaml::from_value::<ProjectEntry>(value.clone()) {
        Ok(entry) => Some(entry),
        Err(e) => {
            log::warn!("skipping malformed project entry: {}", e);
            None
        }
    }
}

fn valid_name(entry: &ProjectEntry) -> Option<String> {
    match entry.name.as_deref() {
        Some(name) if !name.is_empty() => Some(name.to_string()),
        _ => {
            log::warn!("skipping project entry without a name");
            None
        }
    }
}

/// Depth-first, pre-order walk over one document's project list. Nested
/// imports recurse with the importing entry's remote as the parent remote;
/// `acc` carries the seen-name set across the whole walk.
fn walk_projects(
    projects: &[serde_yaml::Value],
    parent_remote: Option<&str>,
    remotes: &HashMap<String, String>,
    default_remote: Option<&str>,
    root_dir: &Path,
    acc: &mut ResolveAcc,
) {
    for value in projects {
        let entry = match deserialize_entry(value) {
            Some(entry) => entry,
            None => continue,
        };
        let name = match valid_name(&entry) {
            Some(name) => name,
            None => continue,
        };
        // First occurrence wins; a duplicate's import is not followed either.
        if acc.seen.contains(&name) {
            continue;
        }

        let effective_remote = match entry
            .remote
            .as_deref()
            .or(parent_remote)
            .or(default_remote)
        {
            Some(remote) => remote.to_string(),
            None => {
                log::warn!(
                    "skipping project {}: no remote (own, parent or default)",
                    name
                );
                continue;
            }
        };
        let url_base = match remotes.get(&effective_remote) {
            Some(url_base) => url_base,
            None => {
                log::warn!(
                    "skipping project {}: remote '{}' is not defined",
                    name,
                    effective_remote
                );
                continue;
            }
        };

        let repo_path = entry.repo_path.as_deref().unwrap_or(&name);
        let url = format!("{}/{}.git", url_base.trim_end_matches('/'), repo_path);
        log::debug!(
            "project: {} | remote: {} | url: {}",
            name,
            effective_remote,
            url
        );
        acc.seen.insert(name.clone());
        acc.resolved.push(RemoteProject {
            name,
            remote: effective_remote.clone(),
            url,
        });

        if let Some(ImportValue::Spec(spec)) = &entry.import {
            follow_import(
                &entry,
                spec,
                &effective_remote,
                remotes,
                default_remote,
                root_dir,
                acc,
            );
        } else if let Some(ImportValue::Other(other)) = &entry.import {
            log::debug!("ignoring unsupported import form: {:?}", other);
        }
    }
}

/// Locate and walk one nested manifest. Missing or malformed nested files
/// warn and return; they never fail the overall resolution.
fn follow_import(
    entry: &ProjectEntry,
    spec: &ImportSpec,
    parent_remote: &str,
    remotes: &HashMap<String, String>,
    default_remote: Option<&str>,
    root_dir: &Path,
    acc: &mut ResolveAcc,
) {
    let import_dir = entry
        .path
        .as_deref()
        .unwrap_or(defaults::DEFAULT_IMPORT_PATH);
    let nested_path = root_dir.join(import_dir).join(defaults::MANIFEST_FILE);
    if !nested_path.is_file() {
        log::warn!(
            "nested manifest not found, skipping import: {}",
            nested_path.display()
        );
        return;
    }

    let nested = match std::fs::read_to_string(&nested_path)
        .map_err(|e| e.to_string())
        .and_then(|text| {
            serde_yaml::from_str::<Document>(&text).map_err(|e| e.to_string())
        }) {
        Ok(document) => document.manifest,
        Err(e) => {
            log::warn!(
                "failed to parse nested manifest {}: {}",
                nested_path.display(),
                e
            );
            return;
        }
    };

    let filtered: Vec<serde_yaml::Value> = if spec.name_allowlist.is_empty() {
        nested.projects
    } else {
        nested
            .projects
            .into_iter()
            .filter(|value| {
                value
                    .get("name")
                    .and_then(|n| n.as_str())
                    .is_some_and(|n| spec.name_allowlist.iter().any(|a| a == n))
            })
            .collect()
    };

    walk_projects(
        &filtered,
        Some(parent_remote),
        remotes,
        default_remote,
        root_dir,
        acc,
    );
}
