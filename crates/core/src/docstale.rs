// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Doc staleness checker (component J): flags documentation that still
//! references a file or symbol the PR removed, renamed, or deleted.

use crate::categorize::categorize;
use crate::error::PerFileFailure;
use crate::exports::{diff_exports, extract_exports};
use crate::gateway::RepoGateway;
use crate::model::{ChangeStatus, ChangedFile, DocStalenessReport, FileCategory, StaleReference};

enum Matcher {
    Literal(String),
    Symbol(String),
    /// A deleted file's filename stem: always matched in path-like context,
    /// regardless of whether the stem happens to collide with a generic name.
    Stem(String),
}

struct Reference {
    matcher: Matcher,
    reason: String,
    /// For a [`Matcher::Stem`], the full deleted path whose literal match on
    /// the same line already accounts for this occurrence; suppresses the
    /// redundant stem hit so a bare path mention isn't counted twice under
    /// the same "file was deleted" reason.
    subsumed_by: Option<String>,
}

fn is_generic(name: &str, generic_names: &[String]) -> bool {
    generic_names.iter().any(|g| g.eq_ignore_ascii_case(name))
}

fn find_with_boundary(line: &str, needle: &str, path_context_only: bool) -> bool {
    if needle.is_empty() {
        return false;
    }
    let mut start = 0usize;
    while let Some(pos) = line[start..].find(needle) {
        let idx = start + pos;
        let before = if idx == 0 { None } else { line[..idx].chars().last() };
        let after_idx = idx + needle.len();
        let after = line.get(after_idx..).and_then(|s| s.chars().next());

        let matched = if path_context_only {
            let is_boundary = |c: Option<char>| matches!(c, Some('/') | Some('.') | Some('`'));
            is_boundary(before) || is_boundary(after)
        } else {
            let is_word = |c: char| c.is_alphanumeric() || c == '_';
            let before_ok = before.map(|c| !is_word(c)).unwrap_or(true);
            let after_ok = after.map(|c| !is_word(c)).unwrap_or(true);
            before_ok && after_ok
        };
        if matched {
            return true;
        }
        start = idx + 1;
        if start > line.len() {
            break;
        }
    }
    false
}

fn matches_line(matcher: &Matcher, line: &str, generic_names: &[String]) -> bool {
    match matcher {
        Matcher::Literal(path) => line.contains(path.as_str()),
        Matcher::Symbol(name) => {
            let path_context_only = is_generic(name, generic_names);
            find_with_boundary(line, name, path_context_only)
        }
        Matcher::Stem(name) => find_with_boundary(line, name, true),
    }
}

fn collect_references(
    changed_files: &[ChangedFile],
    gateway: &dyn RepoGateway,
    base_ref: &str,
    head_ref: &str,
    warnings: &mut Vec<PerFileFailure>,
) -> Vec<Reference> {
    let mut references = Vec::new();

    for file in changed_files {
        match file.status {
            ChangeStatus::Deleted => {
                let path_str = file.path.to_string_lossy().to_string();
                references.push(Reference {
                    matcher: Matcher::Literal(path_str.clone()),
                    reason: "referenced file was deleted".to_string(),
                    subsumed_by: None,
                });
                if let Some(stem) = file.path.file_stem().and_then(|s| s.to_str()) {
                    references.push(Reference {
                        matcher: Matcher::Stem(stem.to_string()),
                        reason: "referenced file was deleted".to_string(),
                        subsumed_by: Some(path_str.clone()),
                    });
                }
                if let Ok(bytes) = gateway.read_at(base_ref, &file.path) {
                    if let Ok(content) = String::from_utf8(bytes) {
                        let exports = extract_exports(&content, &file.path);
                        for symbol in &exports.symbols {
                            references.push(Reference {
                                matcher: Matcher::Symbol(symbol.name.clone()),
                                reason: format!("referenced symbol was removed from {path_str}"),
                                subsumed_by: None,
                            });
                        }
                    }
                } else {
                    warnings.push(PerFileFailure::new(&file.path, "could not read deleted file at base"));
                }
            }
            ChangeStatus::Renamed => {
                let Some(old_path) = &file.old_path else { continue };
                let old_str = old_path.to_string_lossy().to_string();
                let new_str = file.path.to_string_lossy().to_string();
                references.push(Reference {
                    matcher: Matcher::Literal(old_str),
                    reason: format!("renamed to {new_str}"),
                    subsumed_by: None,
                });
            }
            ChangeStatus::Modified => {
                let base_path = file.old_path.as_deref().unwrap_or(&file.path);
                let base_text = gateway.read_at(base_ref, base_path).ok().and_then(|b| String::from_utf8(b).ok());
                let head_text = gateway.read_at(head_ref, &file.path).ok().and_then(|b| String::from_utf8(b).ok());
                let (Some(base_text), Some(head_text)) = (base_text, head_text) else { continue };
                let base_exports = extract_exports(&base_text, base_path);
                let head_exports = extract_exports(&head_text, &file.path);
                let diff = diff_exports(&base_exports, &head_exports);
                let path_str = file.path.to_string_lossy().to_string();
                for symbol in &diff.removed {
                    references.push(Reference {
                        matcher: Matcher::Symbol(symbol.name.clone()),
                        reason: format!("referenced symbol was removed from {path_str}"),
                        subsumed_by: None,
                    });
                }
            }
            ChangeStatus::Added | ChangeStatus::Copied => {}
        }
    }

    references
}

pub fn check_doc_staleness(
    changed_files: &[ChangedFile],
    gateway: &dyn RepoGateway,
    base_ref: &str,
    head_ref: &str,
    generic_names: &[String],
) -> (DocStalenessReport, Vec<PerFileFailure>) {
    let mut warnings = Vec::new();
    let references = collect_references(changed_files, gateway, base_ref, head_ref, &mut warnings);

    let doc_files: Vec<_> = match gateway.enumerate_all_files() {
        Ok(files) => files.into_iter().filter(|f| categorize(f) == FileCategory::Doc).collect(),
        Err(_) => Vec::new(),
    };
    let checked_files = doc_files.len();

    if references.is_empty() {
        return (DocStalenessReport { stale_references: Vec::new(), checked_files }, warnings);
    }

    let mut stale_references = Vec::new();
    for doc_file in &doc_files {
        let Ok(bytes) = gateway.read_at(head_ref, doc_file) else {
            warnings.push(PerFileFailure::new(doc_file, "could not read doc file"));
            continue;
        };
        let Ok(content) = String::from_utf8(bytes) else { continue };
        for (line_no, line) in content.lines().enumerate() {
            for reference in &references {
                if let Some(full_path) = &reference.subsumed_by {
                    if line.contains(full_path.as_str()) {
                        continue;
                    }
                }
                if matches_line(&reference.matcher, line, generic_names) {
                    stale_references.push(StaleReference {
                        doc_file: doc_file.clone(),
                        line: (line_no + 1) as u32,
                        reference: match &reference.matcher {
                            Matcher::Literal(s) | Matcher::Symbol(s) | Matcher::Stem(s) => s.clone(),
                        },
                        reason: reference.reason.clone(),
                    });
                }
            }
        }
    }

    (DocStalenessReport { stale_references, checked_files }, warnings)
}

#[cfg(test)]
#[path = "docstale_tests.rs"]
mod tests;
