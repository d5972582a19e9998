// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration surface: `AnalysisOptions`, its optional `pr-impact.toml`
//! backing, and the centralized default constants. Repo-root discovery is
//! kept separate from the named default constants so every checker
//! references the same constant instead of a literal scattered through
//! its own module.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::importgraph::reverse::ReverseDepCache;

/// Named default constants, kept separate from the structs so every
/// checker references the same constant instead of repeating a literal.
pub mod defaults {
    pub const MAX_IMPACT_DEPTH: u32 = 3;
    pub const CONFIG_FILE_NAME: &str = "pr-impact.toml";

    /// Names considered too generic to match on bare word boundaries in
    /// doc-staleness scanning; they additionally require path-like context
    /// (adjacent `/`, `.`, or a backtick).
    pub const GENERIC_SYMBOL_NAMES: &[&str] =
        &["types", "utils", "index", "helpers", "config", "common", "lib"];

    /// Config file basenames/path fragments treated as CI/build-critical
    /// when scoring the config-file-touched risk factor.
    pub const CI_CRITICAL_CONFIG_PATTERNS: &[&str] = &[
        ".github/workflows/",
        "Dockerfile",
        "docker-compose",
        "webpack.config",
        "rollup.config",
        "vite.config",
        "turbo.json",
        "nx.json",
    ];

    pub const LARGE_DIFF_MEDIUM_LINES: u32 = 100;
    pub const LARGE_DIFF_HIGH_LINES: u32 = 500;
    pub const LARGE_DIFF_MAX_LINES: u32 = 1000;

    pub const RISK_LOW_MAX: u8 = 25;
    pub const RISK_MEDIUM_MAX: u8 = 50;
    pub const RISK_HIGH_MAX: u8 = 75;
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub base_branch: Option<String>,
    pub head_branch: Option<String>,
    pub skip_breaking: bool,
    pub skip_coverage: bool,
    pub skip_docs: bool,
    pub max_depth: u32,
    pub generic_symbol_names: Vec<String>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            base_branch: None,
            head_branch: None,
            skip_breaking: false,
            skip_coverage: false,
            skip_docs: false,
            max_depth: defaults::MAX_IMPACT_DEPTH,
            generic_symbol_names: defaults::GENERIC_SYMBOL_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Typed options for one `analyze_pr` call.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub repo_path: PathBuf,
    pub base_branch: Option<String>,
    pub head_branch: Option<String>,
    pub skip_breaking: bool,
    pub skip_coverage: bool,
    pub skip_docs: bool,
    pub max_depth: u32,
    pub generic_symbol_names: Vec<String>,
    /// Shared reverse-dependency cache. Supply the same instance across
    /// repeated calls against one repo to avoid rescanning; left `None`
    /// to get a fresh, call-scoped cache.
    pub reverse_dep_cache: Option<Arc<ReverseDepCache>>,
}

impl AnalysisOptions {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        let defaults = FileConfig::default();
        Self {
            repo_path: repo_path.into(),
            base_branch: defaults.base_branch,
            head_branch: defaults.head_branch,
            skip_breaking: defaults.skip_breaking,
            skip_coverage: defaults.skip_coverage,
            skip_docs: defaults.skip_docs,
            max_depth: defaults.max_depth,
            generic_symbol_names: defaults.generic_symbol_names,
            reverse_dep_cache: None,
        }
    }

    /// Applies a discovered `pr-impact.toml`, overriding unset fields.
    pub fn apply_file_config(&mut self, file: FileConfig) {
        self.base_branch = self.base_branch.take().or(file.base_branch);
        self.head_branch = self.head_branch.take().or(file.head_branch);
        self.skip_breaking = file.skip_breaking;
        self.skip_coverage = file.skip_coverage;
        self.skip_docs = file.skip_docs;
        self.max_depth = file.max_depth;
        if !file.generic_symbol_names.is_empty() {
            self.generic_symbol_names = file.generic_symbol_names;
        }
    }
}

/// Walks from `start` up to (and including) the directory containing
/// `.git`, looking for `pr-impact.toml`.
pub fn discover_config_path(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(d) = dir {
        let candidate = d.join(defaults::CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if d.join(".git").exists() {
            return None;
        }
        dir = d.parent();
    }
    None
}

pub fn load_config(path: &Path) -> anyhow::Result<FileConfig> {
    let text = fs::read_to_string(path)?;
    let config: FileConfig = toml::from_str(&text)?;
    Ok(config)
}

#[cfg(test)]
#[path = "config_tests.rs"]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests;
