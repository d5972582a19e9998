// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use crate::model::{ExportedSymbol, FileExports, SymbolKind};

use super::patterns::{self, EXPORT_STAR_NAMESPACE};

/// Extracts the exports of one file's content, without resolving any
/// `export * from` barrels (those contribute nothing without a resolver;
/// `export * as ns from` always contributes its namespace symbol).
pub fn extract_exports(content: &str, file_path: &Path) -> FileExports {
    let mut exports = FileExports::new(file_path.to_path_buf());
    let stripped = patterns::strip_comments(content);

    let mut symbols = Vec::new();
    patterns::run_named_and_default_patterns(&stripped, &mut symbols);
    for symbol in symbols {
        exports.insert(symbol);
    }

    for m in EXPORT_STAR_NAMESPACE.captures_iter(&stripped) {
        let alias = m[1].to_string();
        exports.insert(ExportedSymbol {
            name: alias,
            kind: SymbolKind::Variable,
            signature: None,
            is_default: false,
        });
    }

    exports
}

#[cfg(test)]
#[path = "extractor_tests.rs"]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests;
