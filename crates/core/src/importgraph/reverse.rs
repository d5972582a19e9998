// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reverse-dependency index (component H): for every source file, which
//! other source files import it. Built once per repository scan and
//! cached behind [`ReverseDepCache`] so concurrent callers block on a
//! single build rather than racing duplicate scans.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Condvar, Mutex};
use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;

use crate::cancel::CancellationToken;
use crate::categorize::categorize;
use crate::error::AnalysisError;
use crate::gateway::RepoGateway;
use crate::model::FileCategory;

#[allow(clippy::expect_used)]
static IMPORT_SPECIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:import\s[^'"\n]*?from\s*|import\s*|export\s[^'"\n]*?from\s*|require\()['"]([^'"]+)['"]"#,
    )
    .expect("valid regex")
});

const RESOLVABLE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

#[derive(Debug, Default)]
pub struct ReverseDependencyMap {
    map: HashMap<PathBuf, Vec<PathBuf>>,
}

impl ReverseDependencyMap {
    /// Looks up importers of `path` by the same extension-stripped
    /// canonical key the map is built with, so a query against the
    /// extensionful file path (`src/foo.ts`) matches regardless of
    /// whether `src/foo.ts` still exists (it may have been deleted or
    /// renamed in the PR being analyzed).
    pub fn importers_of(&self, path: &Path) -> &[PathBuf] {
        self.map.get(&strip_resolvable_extension(path)).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[cfg(test)]
    pub fn from_edges(edges: Vec<(PathBuf, PathBuf)>) -> Self {
        let mut map: HashMap<PathBuf, Vec<PathBuf>> = HashMap::new();
        for (target, importer) in edges {
            let importers = map.entry(strip_resolvable_extension(&target)).or_default();
            if !importers.contains(&importer) {
                importers.push(importer);
            }
        }
        Self { map }
    }
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut stack: Vec<std::path::Component> = Vec::new();
    for component in path.components() {
        match component {
            std::path::Component::ParentDir => {
                stack.pop();
            }
            std::path::Component::CurDir => {}
            other => stack.push(other),
        }
    }
    stack.iter().collect()
}

/// Strips a recognized source extension off `path`, producing the
/// canonical module key spec.md §4.H normalizes both specifiers and
/// lookup paths to. Paths without a recognized extension pass through
/// unchanged.
fn strip_resolvable_extension(path: &Path) -> PathBuf {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if RESOLVABLE_EXTENSIONS.contains(&ext) => path.with_extension(""),
        _ => path.to_path_buf(),
    }
}

/// Resolves a relative specifier to the canonical (extension-stripped)
/// module key of its target, without requiring the target to still
/// exist in `known`. `known` — the set of source files enumerated at
/// `head_ref` — is consulted only to disambiguate an extensionless
/// specifier between a plain-file and a directory-index resolution;
/// when neither form is found there (most commonly because the PR
/// deleted the target), the plain-file key is assumed so the same
/// canonical key a lookup against the deleted path produces is still
/// recorded.
fn resolve_specifier(importer: &Path, specifier: &str, known: &HashSet<PathBuf>) -> Option<PathBuf> {
    if !(specifier.starts_with("./") || specifier.starts_with("../")) {
        return None;
    }
    let base_dir = importer.parent().unwrap_or_else(|| Path::new(""));
    let joined = normalize_path(&base_dir.join(specifier));

    // An explicit, recognized extension in the specifier makes the key
    // unambiguous; no existence check is needed or wanted here, since
    // requiring membership in `known` would drop edges to files the PR
    // deleted from head.
    if let Some(ext) = joined.extension().and_then(|e| e.to_str()) {
        if RESOLVABLE_EXTENSIONS.contains(&ext) {
            return Some(joined.with_extension(""));
        }
    }

    for ext in RESOLVABLE_EXTENSIONS {
        if known.contains(&joined.with_extension(ext)) {
            return Some(joined);
        }
    }
    for ext in RESOLVABLE_EXTENSIONS {
        if known.contains(&joined.join(format!("index.{ext}"))) {
            return Some(normalize_path(&joined.join("index")));
        }
    }
    // Neither form is currently on disk at `head_ref` — most likely the
    // target was deleted in this PR. Default to the plain-file key so the
    // edge is still recorded under the key a lookup against the deleted
    // path will produce, rather than silently dropping it.
    Some(joined)
}

fn extract_targets(content: &str, importer: &Path, known: &HashSet<PathBuf>) -> Vec<PathBuf> {
    IMPORT_SPECIFIER
        .captures_iter(content)
        .filter_map(|m| resolve_specifier(importer, &m[1], known))
        .collect()
}

/// Scans every source file in the repository at `head_ref` and builds the
/// reverse-dependency map. File enumeration and per-file parsing are both
/// deterministic, so two builds against the same ref always produce an
/// equal map.
pub fn build_reverse_dependency_map(
    gateway: &dyn RepoGateway,
    head_ref: &str,
    cancel: &CancellationToken,
) -> Result<ReverseDependencyMap, AnalysisError> {
    if cancel.is_cancelled() {
        return Err(AnalysisError::Cancelled);
    }

    let mut files = gateway.enumerate_all_files()?;
    files.retain(|f| categorize(f) == FileCategory::Source);
    files.sort();

    let known: HashSet<PathBuf> = files.iter().cloned().collect();

    let cancelled = std::sync::atomic::AtomicBool::new(false);
    let per_file: Vec<Vec<PathBuf>> = files
        .par_iter()
        .map(|importer| {
            if cancel.is_cancelled() {
                cancelled.store(true, std::sync::atomic::Ordering::SeqCst);
                return Vec::new();
            }
            match gateway.read_at(head_ref, importer) {
                Ok(bytes) => {
                    let content = String::from_utf8_lossy(&bytes);
                    extract_targets(&content, importer, &known)
                }
                Err(_) => Vec::new(),
            }
        })
        .collect();

    if cancelled.load(std::sync::atomic::Ordering::SeqCst) {
        return Err(AnalysisError::Cancelled);
    }

    let mut map: HashMap<PathBuf, Vec<PathBuf>> = HashMap::new();
    for (importer, targets) in files.iter().zip(per_file.into_iter()) {
        for target in targets {
            let importers = map.entry(target).or_default();
            if !importers.contains(importer) {
                importers.push(importer.clone());
            }
        }
    }

    tracing::debug!(files = files.len(), targets = map.len(), "built reverse-dependency map");
    Ok(ReverseDependencyMap { map })
}

enum BuildState {
    Absent,
    Building,
    Ready(Arc<ReverseDependencyMap>),
}

/// Process-scoped single-builder cache: concurrent callers during
/// construction block on the one in-flight build instead of racing
/// duplicate scans. A build that errors (including cancellation) leaves
/// the cache fully `Absent`, never a torn partial result.
pub struct ReverseDepCache {
    state: Mutex<BuildState>,
    condvar: Condvar,
}

impl Default for ReverseDepCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ReverseDepCache {
    pub fn new() -> Self {
        Self { state: Mutex::new(BuildState::Absent), condvar: Condvar::new() }
    }

    pub fn get_or_build(
        &self,
        gateway: &dyn RepoGateway,
        head_ref: &str,
        cancel: &CancellationToken,
    ) -> Result<Arc<ReverseDependencyMap>, AnalysisError> {
        loop {
            let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
            match &*guard {
                BuildState::Ready(map) => return Ok(Arc::clone(map)),
                BuildState::Building => {
                    guard = self.condvar.wait(guard).unwrap_or_else(|e| e.into_inner());
                    drop(guard);
                    continue;
                }
                BuildState::Absent => {
                    *guard = BuildState::Building;
                    break;
                }
            }
        }

        let result = build_reverse_dependency_map(gateway, head_ref, cancel);
        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        match result {
            Ok(map) => {
                let arc = Arc::new(map);
                *guard = BuildState::Ready(Arc::clone(&arc));
                self.condvar.notify_all();
                Ok(arc)
            }
            Err(e) => {
                *guard = BuildState::Absent;
                self.condvar.notify_all();
                Err(e)
            }
        }
    }

    /// Drops any cached map, forcing the next `get_or_build` to rescan.
    pub fn reset(&self) {
        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        *guard = BuildState::Absent;
        self.condvar.notify_all();
    }
}

#[cfg(test)]
#[path = "reverse_tests.rs"]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests;
