// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashMap;

use crate::model::{ExportedSymbol, FileExports};

#[derive(Debug, Clone, Default)]
pub struct ExportDiff {
    pub removed: Vec<ExportedSymbol>,
    pub added: Vec<ExportedSymbol>,
    pub modified: Vec<(ExportedSymbol, ExportedSymbol)>,
}

/// Three-way diff of two export tables, keyed by identity
/// (`isDefault`, `name`). A symbol present in both with a different kind
/// or a different normalized signature is reported as modified.
pub fn diff_exports(base: &FileExports, head: &FileExports) -> ExportDiff {
    let head_map: HashMap<(bool, &str), &ExportedSymbol> =
        head.symbols.iter().map(|s| (s.identity_key(), s)).collect();
    let base_map: HashMap<(bool, &str), &ExportedSymbol> =
        base.symbols.iter().map(|s| (s.identity_key(), s)).collect();

    let mut diff = ExportDiff::default();

    for base_symbol in &base.symbols {
        match head_map.get(&base_symbol.identity_key()) {
            None => diff.removed.push(base_symbol.clone()),
            Some(head_symbol) => {
                if base_symbol.kind != head_symbol.kind || base_symbol.signature != head_symbol.signature {
                    diff.modified.push(((*base_symbol).clone(), (*head_symbol).clone()));
                }
            }
        }
    }
    for head_symbol in &head.symbols {
        if !base_map.contains_key(&head_symbol.identity_key()) {
            diff.added.push(head_symbol.clone());
        }
    }

    diff
}

#[cfg(test)]
mod tests {
    use crate::model::SymbolKind;

    use super::*;

    fn symbol(name: &str, kind: SymbolKind, signature: Option<&str>, is_default: bool) -> ExportedSymbol {
        ExportedSymbol { name: name.to_string(), kind, signature: signature.map(String::from), is_default }
    }

    #[test]
    fn detects_removed_added_and_modified() {
        let mut base = FileExports::new("a.ts");
        base.insert(symbol("foo", SymbolKind::Function, Some("(a: number): void"), false));
        base.insert(symbol("bar", SymbolKind::Const, Some("string"), false));

        let mut head = FileExports::new("a.ts");
        head.insert(symbol("foo", SymbolKind::Function, Some("(a: string): void"), false));
        head.insert(symbol("baz", SymbolKind::Const, Some("string"), false));

        let diff = diff_exports(&base, &head);
        assert_eq!(diff.removed.len(), 1);
        assert_eq!(diff.removed[0].name, "bar");
        assert_eq!(diff.added.len(), 1);
        assert_eq!(diff.added[0].name, "baz");
        assert_eq!(diff.modified.len(), 1);
        assert_eq!(diff.modified[0].0.name, "foo");
    }

    #[test]
    fn default_and_named_of_same_name_are_independent() {
        let mut base = FileExports::new("a.ts");
        base.insert(symbol("foo", SymbolKind::Variable, None, true));
        base.insert(symbol("foo", SymbolKind::Variable, None, false));

        let mut head = FileExports::new("a.ts");
        head.insert(symbol("foo", SymbolKind::Variable, None, true));

        let diff = diff_exports(&base, &head);
        assert_eq!(diff.removed.len(), 1);
        assert!(!diff.removed[0].is_default);
    }
}
