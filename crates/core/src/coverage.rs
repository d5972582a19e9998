// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test/source correlation checker (component I). Generates candidate
//! test locations for each changed source file and probes the filesystem
//! (or an injected oracle, for testing) for their existence.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use dashmap::DashMap;

use crate::model::{ChangedFile, CoverageGap, FileCategory, TestCoverageReport};

const TEST_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

/// Lets the coverage checker run against a real filesystem or a fixed set
/// of paths in tests, without caring which.
pub trait PathOracle: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
}

/// Per-run existence cache: each changed source file probes several
/// candidate test paths, and siblings under the same directory often
/// repeat the same `__tests__` lookup, so memoizing avoids redundant
/// stats.
pub struct FilesystemOracle {
    root: PathBuf,
    exists: DashMap<PathBuf, bool>,
}

impl FilesystemOracle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), exists: DashMap::new() }
    }
}

impl PathOracle for FilesystemOracle {
    fn exists(&self, path: &Path) -> bool {
        if let Some(result) = self.exists.get(path) {
            return *result;
        }
        let result = self.root.join(path).exists();
        self.exists.insert(path.to_path_buf(), result);
        result
    }
}

fn stripped_subpath(source_path: &Path) -> PathBuf {
    let as_str = source_path.to_string_lossy();
    let stripped = as_str
        .strip_prefix("src/")
        .or_else(|| as_str.strip_prefix("lib/"))
        .unwrap_or(&as_str);
    PathBuf::from(stripped)
}

/// Generates every candidate test path a source file might be covered by:
/// `base.test.ext` / `base.spec.ext` siblings, `__tests__/` siblings, and
/// top-level `test/`/`tests/` mirrors with a `src/`/`lib/` prefix
/// stripped (`src/utils/parser.ts` → `test/utils/parser.ext`).
pub fn candidate_test_paths(source_path: &Path) -> Vec<PathBuf> {
    let stem = source_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    let parent = source_path.parent().unwrap_or_else(|| Path::new(""));
    let mut candidates = Vec::new();

    for ext in TEST_EXTENSIONS {
        candidates.push(parent.join(format!("{stem}.test.{ext}")));
        candidates.push(parent.join(format!("{stem}.spec.{ext}")));
        let tests_dir = parent.join("__tests__");
        candidates.push(tests_dir.join(format!("{stem}.{ext}")));
        candidates.push(tests_dir.join(format!("{stem}.test.{ext}")));
        candidates.push(tests_dir.join(format!("{stem}.spec.{ext}")));
    }

    let sub = stripped_subpath(source_path);
    for top in ["test", "tests"] {
        for ext in TEST_EXTENSIONS {
            candidates.push(PathBuf::from(top).join(&sub).with_extension(ext));
        }
    }

    candidates
}

pub fn check_coverage(changed_files: &[ChangedFile], oracle: &dyn PathOracle) -> TestCoverageReport {
    let sources: Vec<&ChangedFile> =
        changed_files.iter().filter(|f| f.category == FileCategory::Source).collect();
    let changed_test_paths: HashSet<&Path> = changed_files
        .iter()
        .filter(|f| f.category == FileCategory::Test)
        .map(|f| f.path.as_path())
        .collect();

    let mut gaps = Vec::with_capacity(sources.len());
    let mut covered = 0usize;

    for source in &sources {
        let candidates = candidate_test_paths(&source.path);
        let existing: Vec<PathBuf> = candidates.iter().filter(|c| oracle.exists(c)).cloned().collect();
        let test_file_exists = !existing.is_empty();
        let test_file_changed = existing.iter().any(|c| changed_test_paths.contains(c.as_path()));
        if test_file_exists && test_file_changed {
            covered += 1;
        }
        gaps.push(CoverageGap {
            source_file: source.path.clone(),
            expected_test_files: candidates,
            test_file_exists,
            test_file_changed,
        });
    }

    let changed_source_files = sources.len();
    let coverage_ratio =
        if changed_source_files == 0 { 1.0 } else { covered as f64 / changed_source_files as f64 };

    TestCoverageReport { changed_source_files, source_files_with_test_changes: covered, coverage_ratio, gaps }
}

#[cfg(test)]
#[path = "coverage_tests.rs"]
mod tests;
