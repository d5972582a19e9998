// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The ordered `(pattern, handler)` battery lexical export extraction runs
//! against one file's text. Built once behind a `LazyLock` so the regex
//! set is compiled a single time per process rather than per file.

// Every pattern string below is a fixed literal compiled once at startup,
// and every `.get(0)` is group 0 of an already-successful match — both are
// infallible by construction.
#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{ExportedSymbol, SymbolKind};

/// Strips `//` line comments and `/* */` block comments before the
/// pattern battery runs, so a commented-out `export` never registers.
/// Does not attempt to understand string/template literals containing
/// comment-like text; good enough for a lexical extractor, not a parser.
pub fn strip_comments(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let bytes = content.as_bytes();
    let mut i = 0usize;
    while i < bytes.len() {
        let c = content[i..].chars().next().unwrap_or('\0');
        if c == '/' && bytes.get(i + 1) == Some(&b'/') {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
            continue;
        }
        if c == '/' && bytes.get(i + 1) == Some(&b'*') {
            i += 2;
            while i < bytes.len() && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                i += 1;
            }
            i += 2;
            continue;
        }
        out.push(c);
        i += c.len_utf8();
    }
    out
}

/// Finds the matching `)` for the `(` at `open_idx`, then an optional
/// `: ReturnType` up to (but not including) the opening `{` of the body,
/// returning the raw signature slice `"(params)[: ReturnType]"` and the
/// byte index just past it.
pub fn capture_signature_after(text: &str, open_idx: usize) -> Option<(String, usize)> {
    let mut depth = 0i32;
    let mut close = None;
    for (idx, c) in text.char_indices().skip(open_idx) {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(idx);
                    break;
                }
            }
            _ => {}
        }
    }
    let close = close?;
    let mut end = close + 1;
    let rest = &text[end..];
    if let Some(brace_idx) = rest.find(['{', ';']) {
        end += brace_idx;
    } else {
        end = text.len();
    }
    let signature = text[open_idx..end].trim().to_string();
    Some((signature, end))
}

static DEFAULT_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*export\s+default\s+(?:async\s+)?function\*?\s*([A-Za-z_$][\w$]*)?\s*\(")
        .expect("valid regex")
});

static DEFAULT_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*export\s+default\s+(?:abstract\s+)?class\s+([A-Za-z_$][\w$]*)?")
        .expect("valid regex")
});

static DEFAULT_EXPRESSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*export\s+default\s+([A-Za-z_$][\w$]*)\s*;").expect("valid regex")
});

static NAMED_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*export\s+(?:async\s+)?function\*?\s+([A-Za-z_$][\w$]*)\s*\(")
        .expect("valid regex")
});

static NAMED_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*export\s+(?:abstract\s+)?(?:declare\s+)?class\s+([A-Za-z_$][\w$]*)")
        .expect("valid regex")
});

static ENUM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*export\s+(?:const\s+)?enum\s+([A-Za-z_$][\w$]*)").expect("valid regex")
});

static INTERFACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*export\s+interface\s+([A-Za-z_$][\w$]*)").expect("valid regex")
});

static TYPE_ALIAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*export\s+type\s+([A-Za-z_$][\w$]*)\s*=").expect("valid regex")
});

static VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*export\s+(const|let|var)\s+([A-Za-z_$][\w$]*)\s*(?::\s*([^=;]+))?\s*(?:=|;)")
        .expect("valid regex")
});

static OBJECT_DESTRUCTURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*export\s+(const|let|var)\s*\{([^}]*)\}\s*=").expect("valid regex")
});

static ARRAY_DESTRUCTURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*export\s+(const|let|var)\s*\[([^\]]*)\]\s*=").expect("valid regex")
});

static NAMED_BLOCK_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*export\s+type\s*\{([^}]*)\}").expect("valid regex")
});

static NAMED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*export\s*\{([^}]*)\}").expect("valid regex")
});

pub static EXPORT_STAR_NAMESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*export\s*\*\s*as\s+([A-Za-z_$][\w$]*)\s*from\s*['"]([^'"]+)['"]"#)
        .expect("valid regex")
});

pub static EXPORT_STAR_BARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*export\s*\*\s*from\s*['"]([^'"]+)['"]"#).expect("valid regex")
});

fn variable_kind(keyword: &str) -> SymbolKind {
    if keyword == "const" { SymbolKind::Const } else { SymbolKind::Variable }
}

/// Runs the full ordered battery against already comment-stripped `content`,
/// appending discovered symbols to `exports` (which applies identity-key
/// dedup with first-seen-wins).
pub fn run_named_and_default_patterns(content: &str, exports: &mut Vec<ExportedSymbol>) {
    for m in DEFAULT_FUNCTION.captures_iter(content) {
        let name = m.get(1).map(|g| g.as_str().to_string()).unwrap_or_else(|| "default".to_string());
        let open = m.get(0).expect("match").end() - 1;
        let signature = capture_signature_after(content, open).map(|(sig, _)| sig);
        exports.push(ExportedSymbol { name, kind: SymbolKind::Function, signature, is_default: true });
    }
    for m in DEFAULT_CLASS.captures_iter(content) {
        let name = m.get(1).map(|g| g.as_str().to_string()).unwrap_or_else(|| "default".to_string());
        exports.push(ExportedSymbol { name, kind: SymbolKind::Class, signature: None, is_default: true });
    }
    for m in DEFAULT_EXPRESSION.captures_iter(content) {
        let name = m[1].to_string();
        exports.push(ExportedSymbol { name, kind: SymbolKind::Variable, signature: None, is_default: true });
    }
    for m in NAMED_FUNCTION.captures_iter(content) {
        let name = m[1].to_string();
        let open = m.get(0).expect("match").end() - 1;
        let signature = capture_signature_after(content, open).map(|(sig, _)| sig);
        exports.push(ExportedSymbol { name, kind: SymbolKind::Function, signature, is_default: false });
    }
    for m in NAMED_CLASS.captures_iter(content) {
        let name = m[1].to_string();
        exports.push(ExportedSymbol { name, kind: SymbolKind::Class, signature: None, is_default: false });
    }
    for m in ENUM.captures_iter(content) {
        let name = m[1].to_string();
        exports.push(ExportedSymbol { name, kind: SymbolKind::Enum, signature: None, is_default: false });
    }
    for m in INTERFACE.captures_iter(content) {
        let name = m[1].to_string();
        exports.push(ExportedSymbol { name, kind: SymbolKind::Interface, signature: None, is_default: false });
    }
    for m in TYPE_ALIAS.captures_iter(content) {
        let name = m[1].to_string();
        exports.push(ExportedSymbol { name, kind: SymbolKind::Type, signature: None, is_default: false });
    }
    for m in VARIABLE.captures_iter(content) {
        let keyword = &m[1];
        let name = m[2].to_string();
        let signature = m.get(3).map(|g| g.as_str().trim().to_string());
        exports.push(ExportedSymbol { name, kind: variable_kind(keyword), signature, is_default: false });
    }
    for m in OBJECT_DESTRUCTURE.captures_iter(content) {
        let keyword = &m[1];
        let kind = variable_kind(keyword);
        for entry in m[2].split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let entry = entry.split('=').next().unwrap_or(entry).trim();
            let entry = entry.trim_start_matches("...");
            let name = match entry.split_once(':') {
                Some((_, renamed)) => renamed.trim().to_string(),
                None => entry.to_string(),
            };
            if name.is_empty() {
                continue;
            }
            exports.push(ExportedSymbol { name, kind, signature: None, is_default: false });
        }
    }
    for m in ARRAY_DESTRUCTURE.captures_iter(content) {
        let keyword = &m[1];
        let kind = variable_kind(keyword);
        for entry in m[2].split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let entry = entry.split('=').next().unwrap_or(entry).trim();
            let entry = entry.trim_start_matches("...");
            if entry.is_empty() {
                continue;
            }
            exports.push(ExportedSymbol { name: entry.to_string(), kind, signature: None, is_default: false });
        }
    }
    for m in NAMED_BLOCK_TYPE.captures_iter(content) {
        push_named_block_entries(&m[1], SymbolKind::Type, exports);
    }
    // `export type { ... }` never matches this pattern: it requires `{`
    // immediately (modulo whitespace) after `export`, and `type` sits in
    // between.
    for m in NAMED_BLOCK.captures_iter(content) {
        push_named_block_entries(&m[1], SymbolKind::Variable, exports);
    }
}

fn push_named_block_entries(body: &str, kind: SymbolKind, exports: &mut Vec<ExportedSymbol>) {
    for entry in body.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        match entry.split_once(" as ") {
            Some((original, alias)) if alias.trim() == "default" => {
                exports.push(ExportedSymbol {
                    name: original.trim().to_string(),
                    kind,
                    signature: None,
                    is_default: true,
                });
            }
            Some((_, alias)) => {
                exports.push(ExportedSymbol {
                    name: alias.trim().to_string(),
                    kind,
                    signature: None,
                    is_default: false,
                });
            }
            None => {
                exports.push(ExportedSymbol {
                    name: entry.to_string(),
                    kind,
                    signature: None,
                    is_default: false,
                });
            }
        }
    }
}
