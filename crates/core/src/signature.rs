// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Signature differ (component D). Compares two normalized signature
//! strings structurally: parameter count, per-parameter declared type,
//! and return type, falling back to a generic "signature changed" when
//! normalized text differs but no specific structural difference is
//! found.

/// Result of comparing a base/head signature pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureDiff {
    pub changed: bool,
    pub details: String,
}

fn normalize(sig: &str) -> String {
    sig.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Depth counter treating `<`, `(`, `[`, `{` as openers and their mirrored
/// characters as closers; used both to find the outer parameter-list
/// parens and to split the parameter list on top-level commas only.
fn bracket_depth_delta(c: char) -> i32 {
    match c {
        '<' | '(' | '[' | '{' => 1,
        '>' | ')' | ']' | '}' => -1,
        _ => 0,
    }
}

struct Parsed {
    params: Vec<Param>,
    return_type: Option<String>,
    has_param_list: bool,
}

struct Param {
    name: String,
    type_str: String,
}

fn find_matching_close(text: &str, open_idx: usize) -> Option<usize> {
    let mut depth = 0i32;
    for (idx, c) in text.char_indices().skip(open_idx) {
        depth += bracket_depth_delta(c);
        if idx == open_idx {
            continue;
        }
        if depth == 0 {
            return Some(idx);
        }
    }
    None
}

fn split_top_level_commas(text: &str) -> Vec<&str> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (idx, c) in text.char_indices() {
        depth += bracket_depth_delta(c);
        if c == ',' && depth == 0 {
            parts.push(&text[start..idx]);
            start = idx + 1;
        }
    }
    parts.push(&text[start..]);
    parts
}

fn parse_param(raw: &str) -> Param {
    let raw = raw.trim();
    let rest = raw.strip_prefix("...").unwrap_or(raw);
    match find_top_level_colon(rest) {
        Some(idx) => Param {
            name: rest[..idx].trim().to_string(),
            type_str: rest[idx + 1..].trim().to_string(),
        },
        None => Param { name: raw.to_string(), type_str: raw.to_string() },
    }
}

fn find_top_level_colon(text: &str) -> Option<usize> {
    let mut depth = 0i32;
    for (idx, c) in text.char_indices() {
        depth += bracket_depth_delta(c);
        if c == ':' && depth == 0 {
            return Some(idx);
        }
    }
    None
}

fn parse_signature(sig: &str) -> Parsed {
    let Some(open) = sig.find('(') else {
        return Parsed { params: Vec::new(), return_type: Some(sig.to_string()), has_param_list: false };
    };
    let Some(close) = find_matching_close(sig, open) else {
        return Parsed { params: Vec::new(), return_type: Some(sig.to_string()), has_param_list: false };
    };
    let params_raw = &sig[open + 1..close];
    let params = split_top_level_commas(params_raw).into_iter().map(parse_param).collect();

    let rest = sig[close + 1..].trim();
    let return_type = rest.strip_prefix(':').map(|s| s.trim().to_string());

    Parsed { params, return_type, has_param_list: true }
}

pub fn diff_signatures(base: Option<&str>, head: Option<&str>) -> SignatureDiff {
    match (base, head) {
        (None, None) => SignatureDiff { changed: false, details: "unchanged".to_string() },
        (Some(_), None) => SignatureDiff { changed: true, details: "signature removed".to_string() },
        (None, Some(_)) => SignatureDiff { changed: true, details: "signature added".to_string() },
        (Some(b), Some(h)) => {
            if normalize(b) == normalize(h) {
                return SignatureDiff { changed: false, details: "unchanged".to_string() };
            }
            diff_structural(b, h)
        }
    }
}

fn diff_structural(base: &str, head: &str) -> SignatureDiff {
    let base_parsed = parse_signature(base);
    let head_parsed = parse_signature(head);

    if !base_parsed.has_param_list && !head_parsed.has_param_list {
        let bt = base_parsed.return_type.unwrap_or_default();
        let ht = head_parsed.return_type.unwrap_or_default();
        return SignatureDiff {
            changed: true,
            details: format!("type changed from '{bt}' to '{ht}'"),
        };
    }

    let mut messages = Vec::new();

    if base_parsed.params.len() != head_parsed.params.len() {
        messages.push(format!(
            "parameter count changed from {} to {}",
            base_parsed.params.len(),
            head_parsed.params.len()
        ));
    }

    for (b, h) in base_parsed.params.iter().zip(head_parsed.params.iter()) {
        if b.type_str != h.type_str {
            messages.push(format!(
                "parameter '{}' type changed from '{}' to '{}'",
                b.name, b.type_str, h.type_str
            ));
        }
    }

    match (&base_parsed.return_type, &head_parsed.return_type) {
        (None, Some(h)) => messages.push(format!("return type added: '{h}'")),
        (Some(_), None) => messages.push("return type removed".to_string()),
        (Some(b), Some(h)) if b != h => {
            messages.push(format!("return type changed from '{b}' to '{h}'"))
        }
        _ => {}
    }

    if messages.is_empty() {
        SignatureDiff { changed: true, details: "signature changed".to_string() }
    } else {
        SignatureDiff { changed: true, details: messages.join("; ") }
    }
}

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
