// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `export * from` barrel resolution. Expressed as a single recursive
//! routine bounded by depth and a visited-set, so the caller's resolver
//! can be blocking or non-blocking without this module caring either way.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::model::FileExports;

use super::extractor::extract_exports;
use super::patterns::{self, EXPORT_STAR_BARE};

const MAX_BARREL_DEPTH: u32 = 10;

/// Resolves a module specifier as written in source to the target file's
/// path and raw text, or `None` if it can't be resolved (missing file,
/// external package, etc).
pub trait ReexportResolver {
    fn resolve(&self, from_file: &Path, specifier: &str) -> Option<(PathBuf, String)>;
}

/// Extracts exports the way [`extract_exports`] does, additionally
/// recursing into bare `export * from` directives via `resolver`.
pub fn extract_exports_with_resolver(
    content: &str,
    file_path: &Path,
    resolver: &dyn ReexportResolver,
) -> FileExports {
    let mut visited = HashSet::new();
    extract_with_depth(content, file_path, resolver, 0, &mut visited)
}

fn extract_with_depth(
    content: &str,
    file_path: &Path,
    resolver: &dyn ReexportResolver,
    depth: u32,
    visited: &mut HashSet<PathBuf>,
) -> FileExports {
    let mut exports = extract_exports(content, file_path);

    if depth >= MAX_BARREL_DEPTH {
        return exports;
    }
    if !visited.insert(file_path.to_path_buf()) {
        return exports;
    }

    let stripped = patterns::strip_comments(content);
    for m in EXPORT_STAR_BARE.captures_iter(&stripped) {
        let specifier = &m[1];
        let Some((target_path, target_text)) = resolver.resolve(file_path, specifier) else {
            continue;
        };
        let resolved = extract_with_depth(&target_text, &target_path, resolver, depth + 1, visited);
        for symbol in resolved.symbols {
            if symbol.is_default {
                continue;
            }
            exports.insert(symbol);
        }
    }
    // Namespace re-exports (`export * as ns from`) never recurse; the
    // namespace symbol itself is already added by extract_exports above.

    exports
}
