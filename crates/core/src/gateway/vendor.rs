// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Vendor/build/VCS directory exclusion for repo-wide scans. Bare
//! directory names are normalized into `dir/**` globs: a fast
//! first-component check backed by a full `GlobSet` fallback for nested
//! matches.

use std::path::Path;
use std::sync::LazyLock;

use globset::{Glob, GlobSet, GlobSetBuilder};

const FAST_PREFIXES: &[&str] = &["node_modules", "target", "dist", "build", ".git"];

#[allow(clippy::expect_used)]
static EXCLUDE_SET: LazyLock<GlobSet> = LazyLock::new(|| {
    let mut builder = GlobSetBuilder::new();
    for prefix in FAST_PREFIXES {
        builder.add(Glob::new(&format!("{prefix}/**")).expect("valid glob"));
        builder.add(Glob::new(prefix).expect("valid glob"));
    }
    builder.build().expect("valid glob set")
});

/// True when `relative_path` (relative to the repo root) falls under a
/// vendor, build-output, or VCS directory that repo-wide scans should
/// never descend into.
pub fn is_excluded(relative_path: &Path) -> bool {
    if let Some(std::path::Component::Normal(first)) = relative_path.components().next() {
        if let Some(name) = first.to_str() {
            if FAST_PREFIXES.contains(&name) {
                return true;
            }
        }
    }
    EXCLUDE_SET.is_match(relative_path)
}
